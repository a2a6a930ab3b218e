// Curated popularity tables — the reference data for hot keyword ranking.
//
// One ordered entry list per board plus a board-agnostic general list.
// Loaded once at startup (embedded JSON by default, file override via
// EMBER_REFERENCE_PATH) and never mutated afterwards. The engine receives
// the set by reference — no global state.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The popularity tables shipped with the binary. Kept in a data file rather
/// than source literals so the tables can be regenerated from board analytics
/// without touching code.
const EMBEDDED_REFERENCE: &str = include_str!("../data/popular_keywords.json");

/// A single curated entry: a hot keyword, how popular it currently is on the
/// board (0-100), and the related terms it should match against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularEntry {
    pub keyword: String,
    pub popularity: u8,
    pub related: Vec<String>,
}

/// The full reference dataset: per-board lists plus the general fallback list.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceSet {
    boards: HashMap<String, Vec<PopularEntry>>,
    general: Vec<PopularEntry>,
}

impl ReferenceSet {
    /// Load the dataset embedded at compile time.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_REFERENCE).context("Embedded popularity tables are invalid")
    }

    /// Load a dataset from a JSON file (EMBER_REFERENCE_PATH override).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read popularity tables from {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Popularity tables in {} are invalid", path.display()))
    }

    fn from_json(raw: &str) -> Result<Self> {
        let set: ReferenceSet = serde_json::from_str(raw)?;
        set.validate()?;
        Ok(set)
    }

    /// The entry list for a board label. An unrecognized label is not an
    /// error — it degrades to the general list, same as a board that has no
    /// curated entries yet.
    pub fn for_board(&self, board: &str) -> &[PopularEntry] {
        match self.boards.get(board) {
            Some(entries) if !entries.is_empty() => entries,
            _ => &self.general,
        }
    }

    /// The board-agnostic general list.
    pub fn general(&self) -> &[PopularEntry] {
        &self.general
    }

    /// Board labels with dedicated entry lists.
    pub fn board_labels(&self) -> impl Iterator<Item = &str> {
        self.boards.keys().map(String::as_str)
    }

    fn validate(&self) -> Result<()> {
        if self.general.is_empty() {
            anyhow::bail!("Reference data has no general fallback list");
        }
        for (board, entries) in self
            .boards
            .iter()
            .chain(std::iter::once((&"general".to_string(), &self.general)))
        {
            for entry in entries {
                if entry.keyword.is_empty() {
                    anyhow::bail!("Reference list '{board}' contains an empty keyword");
                }
                if entry.popularity > 100 {
                    anyhow::bail!(
                        "Reference entry '{}' in '{board}' has popularity {} (max 100)",
                        entry.keyword,
                        entry.popularity
                    );
                }
            }
        }
        Ok(())
    }
}
