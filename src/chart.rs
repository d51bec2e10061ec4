// 🥧 Pie chart geometry
//
// Turns per-category totals into slice angles. Pure data in, pure data out:
// the UI decides colors and does the painting, and nothing here can mutate
// the store.

use crate::category::Category;
use crate::summary::CategoryTotal;
use std::f64::consts::TAU;

/// One pie slice: a category's share of the grand total, with its angular
/// extent around the circle (radians, 0..TAU, clockwise from the top is the
/// renderer's business - angles here just accumulate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub category: Category,
    pub total: f64,
    /// Share of the grand total, in 0..=1.
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    /// The slice's share as a percentage, e.g. `71.4`.
    pub fn percentage(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Computes pie slices from category totals.
///
/// Returns an empty vec when there is nothing to chart (no categories, or a
/// non-positive grand total) - the UI shows its empty-state message instead.
pub fn pie_slices(by_category: &[CategoryTotal]) -> Vec<PieSlice> {
    let grand_total: f64 = by_category.iter().map(|c| c.total).sum();
    if grand_total <= 0.0 {
        return Vec::new();
    }

    let mut slices = Vec::with_capacity(by_category.len());
    let mut start_angle = 0.0;

    for entry in by_category {
        let fraction = entry.total / grand_total;
        let end_angle = start_angle + TAU * fraction;

        slices.push(PieSlice {
            category: entry.category,
            total: entry.total,
            fraction,
            start_angle,
            end_angle,
        });

        start_angle = end_angle;
    }

    slices
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(Category, f64)]) -> Vec<CategoryTotal> {
        entries
            .iter()
            .map(|&(category, total)| CategoryTotal { category, total })
            .collect()
    }

    #[test]
    fn test_no_categories_no_slices() {
        assert!(pie_slices(&[]).is_empty());
    }

    #[test]
    fn test_single_category_is_full_circle() {
        let slices = pie_slices(&totals(&[(Category::Food, 12.5)]));
        assert_eq!(slices.len(), 1);
        assert!((slices[0].fraction - 1.0).abs() < 1e-9);
        assert!((slices[0].end_angle - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_fractions_sum_to_one_and_angles_are_contiguous() {
        let slices = pie_slices(&totals(&[
            (Category::Food, 12.5),
            (Category::Transport, 5.0),
            (Category::Bills, 7.5),
        ]));

        let fraction_sum: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((fraction_sum - 1.0).abs() < 1e-9);

        assert_eq!(slices[0].start_angle, 0.0);
        for pair in slices.windows(2) {
            assert!((pair[0].end_angle - pair[1].start_angle).abs() < 1e-9);
        }
        assert!((slices.last().unwrap().end_angle - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_percentages() {
        let slices = pie_slices(&totals(&[
            (Category::Food, 12.5),
            (Category::Transport, 5.0),
        ]));

        assert!((slices[0].percentage() - 71.42857142857143).abs() < 1e-9);
        assert!((slices[1].percentage() - 28.571428571428573).abs() < 1e-9);
    }
}
