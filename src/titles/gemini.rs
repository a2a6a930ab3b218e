// Gemini title generation.
//
// Calls the generateContent endpoint with a board-style prompt and parses
// numbered title lines out of the response. The API is flaky enough that we
// retry a fixed number of times with a short delay, then fall back to
// deterministic default titles — a failed title call must never fail the
// whole prediction request.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex_lite::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::traits::TitleGenerator;
use super::{board_style, BoardStyle};
use crate::category::Category;

const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// How much of the post goes into the prompt — longer posts are truncated
/// to keep token usage bounded.
const PROMPT_TEXT_CHARS: usize = 500;

/// Gemini API title generator.
pub struct GeminiTitleGenerator {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiTitleGenerator {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the generator at a different endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    async fn call_once(&self, prompt: &str) -> Result<Vec<String>> {
        let url = format!("{}?key={}", self.endpoint, self.api_key);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to call the Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse the Gemini API response")?;

        let raw = result
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default();

        Ok(parse_numbered_titles(&raw))
    }
}

#[async_trait]
impl TitleGenerator for GeminiTitleGenerator {
    async fn suggest(&self, text: &str, category: Category, count: usize) -> Result<Vec<String>> {
        let style = board_style(category);
        let prompt = build_prompt(text, category, style, count);

        for attempt in 1..=MAX_RETRIES {
            match self.call_once(&prompt).await {
                Ok(titles) if !titles.is_empty() => {
                    debug!(attempt, titles = titles.len(), "Gemini returned titles");
                    return Ok(titles.into_iter().take(count).collect());
                }
                Ok(_) => {
                    warn!(attempt, "Gemini response contained no parseable titles");
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Gemini title generation failed");
                }
            }
            if attempt < MAX_RETRIES {
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }

        // Retries exhausted: deterministic fallback, not an error
        Ok(fallback_titles(category))
    }
}

/// Build the generation prompt from the board style guide.
fn build_prompt(text: &str, category: Category, style: &BoardStyle, count: usize) -> String {
    let summary: String = text.chars().take(PROMPT_TEXT_CHARS).collect();
    let truncated = if text.chars().count() > PROMPT_TEXT_CHARS {
        "..."
    } else {
        ""
    };
    let sample_titles = style.examples[..3.min(style.examples.len())].join("、");

    format!(
        "請幫我為以下文章內容生成{count}個適合在{description}發布的標題。\n\n\
         文章內容：\n{summary}{truncated}\n\n\
         標題風格要求：\n\
         - 符合{tone}的語調\n\
         - 吸引人且能引起共鳴\n\
         - 長度控制在15-25個字以內\n\
         - 符合{board}的風格\n\n\
         參考標題範例：\n{sample_titles}\n\n\
         請直接給出{count}個標題，每個標題一行，以數字編號，不要有額外的說明。",
        count = count,
        description = style.description,
        summary = summary,
        truncated = truncated,
        tone = style.tone,
        board = category.board_name(),
        sample_titles = sample_titles,
    )
}

/// Extract titles from numbered lines like "1. 標題" or "2、標題".
pub fn parse_numbered_titles(raw: &str) -> Vec<String> {
    let re = Regex::new(r"(?m)^\s*\d+[.、)]?\s*(.+)$").expect("static regex");
    re.captures_iter(raw)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Default titles served when the API is unavailable. Deterministic so the
/// degraded path stays reproducible.
pub fn fallback_titles(category: Category) -> Vec<String> {
    vec![
        "想聽聽大家的看法".to_string(),
        format!("關於{}的一些想法", category.board_name()),
        "分享我最近的心情".to_string(),
    ]
}

// --- Gemini API request/response types ---

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_titles() {
        let raw = "1. 分手後的第一個週末\n2、還是會想起他\n3) 該怎麼放下呢";
        let titles = parse_numbered_titles(raw);
        assert_eq!(
            titles,
            vec!["分手後的第一個週末", "還是會想起他", "該怎麼放下呢"]
        );
    }

    #[test]
    fn test_parse_ignores_unnumbered_lines() {
        let raw = "以下是標題：\n1. 第一個標題\n謝謝使用";
        let titles = parse_numbered_titles(raw);
        assert_eq!(titles, vec!["第一個標題"]);
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse_numbered_titles("").is_empty());
        assert!(parse_numbered_titles("沒有編號的回應").is_empty());
    }

    #[test]
    fn test_fallback_titles_deterministic() {
        assert_eq!(
            fallback_titles(Category::Mood),
            fallback_titles(Category::Mood)
        );
        assert_eq!(fallback_titles(Category::Mood).len(), 3);
    }

    #[test]
    fn test_prompt_truncates_long_posts() {
        // 累 appears nowhere in the prompt scaffolding or the style
        // examples, so every occurrence comes from the post summary
        let long_text = "累".repeat(600);
        let prompt = build_prompt(&long_text, Category::Mood, board_style(Category::Mood), 3);
        assert!(prompt.contains("..."));
        assert_eq!(
            prompt.chars().filter(|&c| c == '累').count(),
            PROMPT_TEXT_CHARS
        );
    }
}
