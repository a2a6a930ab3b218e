// Local template-based title generation.
//
// The no-API-key fallback. Finds board-specific seed keywords in the post,
// then fills two-slot title templates. Everything cycles in fixed order —
// same post, same board, same titles — so the degraded path is reproducible
// and testable.

use anyhow::Result;
use async_trait::async_trait;

use super::board_style;
use super::traits::TitleGenerator;
use crate::category::Category;

/// Seed keywords to look for in the post, per board.
fn seed_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Mood => &[
            "心情", "感受", "難過", "開心", "煩惱", "壓力", "生活", "疲倦", "孤單", "焦慮",
        ],
        Category::Relationship => &[
            "男友", "女友", "感情", "戀愛", "分手", "告白", "交往", "曖昧", "前任", "喜歡",
        ],
        Category::Talk => &[
            "問題", "大家", "推薦", "心得", "分享", "求助", "想問", "經驗", "建議", "討論",
        ],
    }
}

/// Two-slot title templates, per board. `{}` placeholders are filled with
/// seed keywords found in the post.
fn templates(category: Category) -> &'static [&'static str] {
    match category {
        Category::Mood => &[
            "今天的{}，讓我有點{}",
            "為什麼我總是{}的時候感到{}",
            "分享一下關於{}的小{}",
            "突然間感到{}，是不是因為{}",
            "{}時的那種{}感覺，有人懂嗎",
            "對於{}，我的{}心情",
        ],
        Category::Relationship => &[
            "當{}遇到{}，我該怎麼辦",
            "和{}之間的{}問題",
            "{}後他的{}舉動，這代表什麼",
            "對於{}，你們會選擇{}嗎",
            "{}中的{}困擾，求解答",
            "關於{}的{}問題，想聽聽大家意見",
        ],
        Category::Talk => &[
            "有沒有人知道關於{}的{}",
            "想問問大家對{}的{}看法",
            "{}時有什麼推薦的{}嗎",
            "分享一下我的{}{}經驗",
            "大家都怎麼處理{}的{}情況",
            "關於{}，有什麼{}建議",
        ],
    }
}

/// Deterministic local title generator.
pub struct TemplateTitleGenerator;

impl TemplateTitleGenerator {
    pub fn new() -> Self {
        Self
    }

    fn generate(&self, text: &str, category: Category, count: usize) -> Vec<String> {
        let seeds = seed_keywords(category);

        // Seed keywords actually present in the post, in list order
        let mut found: Vec<&str> = seeds.iter().copied().filter(|kw| text.contains(kw)).collect();
        if found.is_empty() {
            found = seeds[..3.min(seeds.len())].to_vec();
        }

        let board_templates = templates(category);
        let mut titles: Vec<String> = Vec::new();

        for i in 0..count.max(1) * 2 {
            if titles.len() >= count {
                break;
            }
            let template = board_templates[i % board_templates.len()];
            let first = found[i % found.len()];
            let second = found[(i + 1) % found.len()];
            let title = fill_template(template, first, second);
            if !titles.contains(&title) {
                titles.push(title);
            }
        }

        // Top up from the style-guide examples if templates ran out of
        // distinct combinations
        let style = board_style(category);
        for example in style.examples {
            if titles.len() >= count {
                break;
            }
            let example = example.to_string();
            if !titles.contains(&example) {
                titles.push(example);
            }
        }

        titles.truncate(count);
        titles
    }
}

impl Default for TemplateTitleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TitleGenerator for TemplateTitleGenerator {
    async fn suggest(&self, text: &str, category: Category, count: usize) -> Result<Vec<String>> {
        Ok(self.generate(text, category, count))
    }
}

/// Fill the first two `{}` slots of a template.
fn fill_template(template: &str, first: &str, second: &str) -> String {
    template.replacen("{}", first, 1).replacen("{}", second, 1)
}
