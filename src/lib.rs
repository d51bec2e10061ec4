// Expense Ledger - Core Library
// Exposes the store and its derived views for use in the UI and tests

pub mod category;
pub mod chart;
pub mod record;
pub mod store;
pub mod summary;

// Re-export commonly used types
pub use category::{Category, ALL_CATEGORIES};
pub use chart::{pie_slices, PieSlice};
pub use record::{format_amount, parse_date, Expense, DATE_FORMAT, LEGACY_DATE_FORMAT};
pub use store::{ExpenseStore, STORE_FILE};
pub use summary::{summarize, CategoryTotal, Summary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
