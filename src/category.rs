// Board categories.
//
// The classifier assigns every post to one of three boards. Labels are the
// stable machine-readable identifiers used in model artifacts and API
// responses; board names are the Chinese display strings shown to users.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three boards a post can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mood,
    Relationship,
    Talk,
}

impl Category {
    /// All categories in canonical order. The first entry doubles as the
    /// default when a model emits a label outside the valid set.
    pub const ALL: [Category; 3] = [Category::Mood, Category::Relationship, Category::Talk];

    /// Stable machine-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Mood => "mood",
            Category::Relationship => "relationship",
            Category::Talk => "talk",
        }
    }

    /// Chinese board name for display.
    pub fn board_name(self) -> &'static str {
        match self {
            Category::Mood => "心情板",
            Category::Relationship => "感情板",
            Category::Talk => "閒聊板",
        }
    }

    /// Parse a label. Returns None for anything outside the valid set —
    /// callers decide whether that degrades to a default or a fallback list.
    pub fn from_label(label: &str) -> Option<Category> {
        match label {
            "mood" => Some(Category::Mood),
            "relationship" => Some(Category::Relationship),
            "talk" => Some(Category::Talk),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(Category::from_label("sports"), None);
        assert_eq!(Category::from_label(""), None);
    }

    #[test]
    fn test_board_names() {
        assert_eq!(Category::Mood.board_name(), "心情板");
        assert_eq!(Category::Relationship.board_name(), "感情板");
        assert_eq!(Category::Talk.board_name(), "閒聊板");
    }
}
