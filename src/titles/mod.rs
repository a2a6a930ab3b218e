// Title suggestion.
//
// An external collaborator from the core's perspective: either the Gemini
// API or a local deterministic template generator produces candidate titles
// for the predicted board. Both sit behind the TitleGenerator trait.

pub mod gemini;
pub mod template;
pub mod traits;

use crate::category::Category;

/// Writing-style guide for one board, used both in the Gemini prompt and by
/// the local template generator.
pub struct BoardStyle {
    pub description: &'static str,
    pub tone: &'static str,
    pub examples: &'static [&'static str],
}

/// The style guide for a board.
pub fn board_style(category: Category) -> &'static BoardStyle {
    match category {
        Category::Mood => &MOOD_STYLE,
        Category::Relationship => &RELATIONSHIP_STYLE,
        Category::Talk => &TALK_STYLE,
    }
}

static MOOD_STYLE: BoardStyle = BoardStyle {
    description: "心情板主要分享個人情緒、心情感受和日常生活",
    tone: "真誠、表達情感、個人化",
    examples: &[
        "今天的小確幸：一杯熱奶茶和陽光",
        "考完試的解脫感⋯⋯終於可以好好睡一覺了",
        "獨自一人的週末，其實也很美好",
        "總是習慣性太在意別人的看法",
        "我好像忘了怎麼和人相處",
    ],
};

static RELATIONSHIP_STYLE: BoardStyle = BoardStyle {
    description: "感情板討論兩性關係、戀愛話題、情感困擾",
    tone: "情感豐富、尋求建議、探討關係",
    examples: &[
        "男友和他的女性朋友太親密，該介意嗎？",
        "分手後該如何徹底忘記對方？",
        "喜歡上有女友的學長...該怎麼辦",
        "戀愛中最讓你感到安心的瞬間是什麼",
        "交往三年，他突然說想要空間...",
    ],
};

static TALK_STYLE: BoardStyle = BoardStyle {
    description: "閒聊板包含各種輕鬆話題、分享想法、討論時事",
    tone: "輕鬆、好奇、討論型",
    examples: &[
        "有哪些冷知識是大家不太知道的？",
        "你們會在意另一半的過去嗎？",
        "有推薦的追劇APP嗎？",
        "一個人旅行真的很爽欸！",
        "最近有什麼好看的電影推薦？",
    ],
};
