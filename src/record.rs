// 🧾 Expense Record - stable identity + display-format codec
//
// "Record name fields are VALUES, the record UUID is IDENTITY"
//
// Records persisted by earlier versions of the tracker carry no id; the
// deserializer backfills a fresh one so old files load unchanged.

use crate::category::Category;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical on-disk and on-screen date format.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Legacy date format found in files written by old versions. Accepted on
/// load, never written back.
pub const LEGACY_DATE_FORMAT: &str = "%Y-%m-%d";

/// One expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Stable identity, assigned at creation - never changes.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Day the expense occurred. Stored as `dd/mm/yyyy`.
    #[serde(with = "display_date")]
    pub date: NaiveDate,

    /// One of the fixed category set.
    pub category: Category,

    /// Positive amount in whole currency units.
    pub amount: f64,

    /// Free-form note.
    pub description: String,
}

impl Expense {
    /// Create a new record with a fresh id.
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Expense {
            id: Uuid::new_v4(),
            date,
            category,
            amount,
            description: description.into(),
        }
    }

    /// The amount as shown in the list view, e.g. `$12.50`.
    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount)
    }

    /// The date as shown in the list view, e.g. `01/06/2024`.
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Formats an amount the way every display surface does: `$X.XX`.
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Parses a date in the canonical `dd/mm/yyyy` format, falling back to the
/// legacy `yyyy-mm-dd` format. This is the whole of the legacy-file
/// migration: reads accept both, writes always produce the canonical form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, LEGACY_DATE_FORMAT))
        .map_err(|_| anyhow!("Invalid date '{s}' (expected dd/mm/yyyy)"))
}

// ============================================================================
// DATE CODEC
// ============================================================================

/// Serde codec for `date` fields: writes `dd/mm/yyyy`, reads that or the
/// legacy `yyyy-mm-dd` form.
mod display_date {
    use super::{parse_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_date(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_canonical_date() {
        assert_eq!(parse_date("01/06/2024").unwrap(), date(2024, 6, 1));
    }

    #[test]
    fn test_parse_legacy_date() {
        assert_eq!(parse_date("2024-06-01").unwrap(), date(2024, 6, 1));
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_date("31/02/2024").is_err());
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_serialize_date_is_canonical() {
        let expense = Expense::new(date(2024, 6, 1), Category::Food, 12.5, "lunch");
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"01/06/2024\""));
    }

    #[test]
    fn test_deserialize_legacy_date_normalizes() {
        let json = r#"{"date":"2024-06-01","category":"Food","amount":12.5,"description":"lunch"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.date, date(2024, 6, 1));
        assert_eq!(expense.formatted_date(), "01/06/2024");
    }

    #[test]
    fn test_deserialize_backfills_id() {
        let json = r#"{"date":"01/06/2024","category":"Food","amount":12.5,"description":"lunch"}"#;
        let a: Expense = serde_json::from_str(json).unwrap();
        let b: Expense = serde_json::from_str(json).unwrap();
        assert!(!a.id.is_nil());
        // Backfilled ids are fresh, not derived from the fields.
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_round_trip_preserves_id() {
        let expense = Expense::new(date(2024, 6, 2), Category::Transport, 5.0, "bus");
        let json = serde_json::to_string(&expense).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_formatted_amount() {
        let expense = Expense::new(date(2024, 6, 1), Category::Food, 12.5, "lunch");
        assert_eq!(expense.formatted_amount(), "$12.50");
        assert_eq!(format_amount(5.0), "$5.00");
        assert_eq!(format_amount(1234.567), "$1234.57");
    }
}
