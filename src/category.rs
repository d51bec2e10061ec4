// 🏷️ Expense Categories - fixed, closed set
//
// The category picker, the summary, and the pie chart all iterate the same
// set, so the enum is the single source of truth for both the display names
// and the persisted strings.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of expense categories.
///
/// Serialized by name (e.g. `"Food"`) in the expenses file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Bills,
    Shopping,
    Other,
}

/// All categories, in the order shown by the form's picker.
pub const ALL_CATEGORIES: [Category; 6] = [
    Category::Food,
    Category::Transport,
    Category::Entertainment,
    Category::Bills,
    Category::Shopping,
    Category::Other,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// Position within `ALL_CATEGORIES`, used by the picker to cycle.
    pub fn index(&self) -> usize {
        ALL_CATEGORIES
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    /// The next category in picker order (wraps around).
    pub fn next(&self) -> Category {
        ALL_CATEGORIES[(self.index() + 1) % ALL_CATEGORIES.len()]
    }

    /// The previous category in picker order (wraps around).
    pub fn previous(&self) -> Category {
        let len = ALL_CATEGORIES.len();
        ALL_CATEGORIES[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Food" => Ok(Category::Food),
            "Transport" => Ok(Category::Transport),
            "Entertainment" => Ok(Category::Entertainment),
            "Bills" => Ok(Category::Bills),
            "Shopping" => Ok(Category::Shopping),
            "Other" => Ok(Category::Other),
            bad => bail!("Unknown category '{bad}'"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for category in ALL_CATEGORIES {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert!("Groceries".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Category::Transport).unwrap();
        assert_eq!(json, "\"Transport\"");

        let back: Category = serde_json::from_str("\"Bills\"").unwrap();
        assert_eq!(back, Category::Bills);
    }

    #[test]
    fn test_picker_cycle_wraps() {
        assert_eq!(Category::Food.next(), Category::Transport);
        assert_eq!(Category::Other.next(), Category::Food);
        assert_eq!(Category::Food.previous(), Category::Other);
    }
}
