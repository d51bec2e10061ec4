// 📊 Summary - derived totals over the record sequence
//
// Pure functions of the record slice: nothing here touches the store or the
// display. The summary panel and the pie chart both consume this output.

use crate::category::Category;
use crate::record::Expense;

/// Summed amount for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Derived totals: grand total plus per-category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Arithmetic sum of all record amounts. 0.0 for an empty store.
    pub total: f64,

    /// Per-category totals, ordered by first appearance in the records.
    pub by_category: Vec<CategoryTotal>,
}

impl Summary {
    /// The category with the largest summed amount, ties broken by first
    /// appearance. `None` when there are no records.
    pub fn highest(&self) -> Option<&CategoryTotal> {
        let mut highest: Option<&CategoryTotal> = None;
        for entry in &self.by_category {
            match highest {
                Some(current) if entry.total <= current.total => {}
                _ => highest = Some(entry),
            }
        }
        highest
    }
}

/// Computes the summary for a record sequence in insertion order.
pub fn summarize(records: &[Expense]) -> Summary {
    let mut total = 0.0;
    let mut by_category: Vec<CategoryTotal> = Vec::new();

    for record in records {
        total += record.amount;
        match by_category
            .iter_mut()
            .find(|e| e.category == record.category)
        {
            Some(entry) => entry.total += record.amount,
            None => by_category.push(CategoryTotal {
                category: record.category,
                total: record.amount,
            }),
        }
    }

    Summary { total, by_category }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(category: Category, amount: f64) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            category,
            amount,
            "",
        )
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0.0);
        assert!(summary.by_category.is_empty());
        assert!(summary.highest().is_none());
    }

    #[test]
    fn test_total_is_sum_of_amounts() {
        let records = vec![
            expense(Category::Food, 12.5),
            expense(Category::Transport, 5.0),
            expense(Category::Food, 7.5),
        ];

        let summary = summarize(&records);
        assert!((summary.total - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_per_category_totals_in_first_seen_order() {
        let records = vec![
            expense(Category::Transport, 5.0),
            expense(Category::Food, 12.5),
            expense(Category::Transport, 3.0),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, Category::Transport);
        assert!((summary.by_category[0].total - 8.0).abs() < f64::EPSILON);
        assert_eq!(summary.by_category[1].category, Category::Food);
    }

    #[test]
    fn test_highest_category() {
        let records = vec![
            expense(Category::Transport, 5.0),
            expense(Category::Food, 12.5),
        ];

        let summary = summarize(&records);
        let highest = summary.highest().unwrap();
        assert_eq!(highest.category, Category::Food);
        assert!((highest.total - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_highest_tie_breaks_by_first_seen() {
        let records = vec![
            expense(Category::Bills, 10.0),
            expense(Category::Shopping, 10.0),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.highest().unwrap().category, Category::Bills);
    }
}
