// Colored terminal output for predictions and keyword lists.
//
// This module handles all terminal-specific formatting. The main.rs
// display paths delegate here.

use colored::Colorize;

use crate::classifier::traits::Prediction;
use crate::keywords::traits::WeightedKeyword;
use crate::recommend::Recommendations;
use crate::scoring::relevance::HotKeyword;

/// Display a full prediction: board, probabilities, titles, keywords.
pub fn display_prediction(
    prediction: &Prediction,
    titles: &[String],
    recommendations: &Recommendations,
    degraded_reason: Option<&str>,
) {
    println!(
        "\n{}",
        format!(
            "=== 預測結果：{} ({}) ===",
            prediction.category.board_name(),
            prediction.category.label()
        )
        .bold()
    );
    println!();

    for (category, probability) in &prediction.probabilities {
        let bar = "█".repeat((probability * 20.0).round() as usize);
        let line = format!(
            "  {:<14} {:>6.1}%  {}",
            category.board_name(),
            probability * 100.0,
            bar
        );
        if *category == prediction.category {
            println!("{}", line.bold());
        } else {
            println!("{}", line.dimmed());
        }
    }

    if !titles.is_empty() {
        println!("\n{}", "建議標題：".bold());
        for (i, title) in titles.iter().enumerate() {
            println!("  {}. {}", i + 1, title);
        }
    }

    display_keyword_lists(
        &recommendations.extracted_keywords,
        &recommendations.recommended_keywords,
    );

    if let Some(reason) = degraded_reason {
        println!(
            "\n  {} {}",
            "~".yellow(),
            format!("推薦結果為降級回退（{reason}）").dimmed()
        );
    }
}

/// Display extracted keywords with weights plus the hot keyword table.
pub fn display_weighted_keywords(extracted: &[WeightedKeyword], hot: &[HotKeyword]) {
    if extracted.is_empty() {
        println!("{}", "沒有可提取的關鍵詞。".dimmed());
    } else {
        println!("\n{}", "提取的關鍵詞：".bold());
        for (term, weight) in extracted {
            println!("  {:<12} {:>6.3}", term, weight);
        }
    }

    display_hot_keywords(hot);
}

fn display_keyword_lists(extracted: &[String], hot: &[HotKeyword]) {
    if !extracted.is_empty() {
        println!("\n{}", "提取的關鍵詞：".bold());
        println!("  {}", extracted.join("、"));
    }

    display_hot_keywords(hot);
}

fn display_hot_keywords(hot: &[HotKeyword]) {
    if hot.is_empty() {
        return;
    }

    println!("\n{}", "推薦熱門關鍵字：".bold());
    println!(
        "  {:<14} {:>6}  {}",
        "關鍵字".dimmed(),
        "熱門度".dimmed(),
        "相關詞".dimmed()
    );
    println!("  {}", "-".repeat(48).dimmed());
    for keyword in hot {
        println!(
            "  {:<14} {:>5}%  {}",
            keyword.keyword,
            keyword.popularity,
            keyword.related.join("、").dimmed()
        );
    }
}
