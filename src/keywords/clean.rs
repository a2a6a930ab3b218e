// Text cleanup and segmentation.
//
// The extraction strategies (and the classifier's feature builder) expect
// whitespace-delimited tokens, but Dcard posts are Chinese running text.
// Cleaning strips URLs and punctuation, splits the post into sentence-sized
// documents, and segments each with jieba. The output is one line per
// sentence with words joined by single spaces.

use jieba_rs::Jieba;
use regex_lite::Regex;

/// Sentence-ending characters used to split a post into documents for
/// per-sentence IDF computation.
const SENTENCE_BREAKS: [char; 8] = ['。', '！', '？', '；', '!', '?', ';', '\n'];

/// Traditional Chinese supplement lexicon. jieba's bundled dictionary is
/// Simplified, so common Traditional forms like 壓力 or 溝通 would otherwise
/// fragment into single characters and never reach the extractor or the
/// classifier vocabulary.
const TRADITIONAL_DICT: &str = include_str!("../../data/dict_tw.txt");

pub struct TextCleaner {
    url_re: Regex,
    jieba: Jieba,
}

impl TextCleaner {
    pub fn new() -> Self {
        let mut jieba = Jieba::new();
        jieba
            .load_dict(&mut TRADITIONAL_DICT.as_bytes())
            .expect("embedded dictionary");
        Self {
            url_re: Regex::new(r"(https?://|www\.)\S+").expect("static regex"),
            jieba,
        }
    }

    /// Clean and segment a post.
    ///
    /// Returns sentence lines of space-separated words, e.g.
    /// "最近 和 男友 吵架\n他 說 溝通 有 問題". Empty or URL-only input
    /// yields an empty string.
    pub fn clean(&self, text: &str) -> String {
        let without_urls = self.url_re.replace_all(text, " ");

        let mut lines = Vec::new();
        for sentence in without_urls.split(SENTENCE_BREAKS) {
            // Strip punctuation and symbols, keep letters/digits/whitespace
            let stripped: String = sentence
                .chars()
                .map(|c| {
                    if c.is_alphanumeric() || c.is_whitespace() {
                        c
                    } else {
                        ' '
                    }
                })
                .collect();

            if stripped.trim().is_empty() {
                continue;
            }

            let words: Vec<&str> = self
                .jieba
                .cut(&stripped, false)
                .into_iter()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .collect();

            if !words.is_empty() {
                lines.push(words.join(" "));
            }
        }

        lines.join("\n")
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}
