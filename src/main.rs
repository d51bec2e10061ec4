// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;

// Use library instead of local modules
use expense_ledger::{ExpenseStore, STORE_FILE};

fn main() -> Result<()> {
    // No flags, no subcommands: the only entry point launches the UI.
    run_ui_mode()
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("💰 Loading Expense Ledger...\n");

    // A missing file just means a fresh ledger. A corrupt or unreadable one
    // is reported and the ledger starts empty.
    let (store, load_warning) = match ExpenseStore::load(STORE_FILE) {
        Ok(store) => {
            println!("✓ Loaded {} expenses from {}\n", store.len(), STORE_FILE);
            (store, None)
        }
        Err(e) => (
            ExpenseStore::empty(STORE_FILE),
            Some(format!("Could not load expenses: {e:#}")),
        ),
    };

    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(store, load_warning);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
