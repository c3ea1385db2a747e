// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;

use absence_tracker::{FileStore, DEFAULT_DATA_FILE};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Optional positional argument overrides the backing file
    let data_file = args.get(1).map(String::as_str).unwrap_or(DEFAULT_DATA_FILE);

    run_ui_mode(data_file)
}

#[cfg(feature = "tui")]
fn run_ui_mode(data_file: &str) -> Result<()> {
    println!("🧑‍🏫 Teacher Absence Tracker");
    println!("📂 Data file: {}", data_file);
    println!("Starting UI... (Press 'q' to quit)\n");

    let store = FileStore::new(data_file);
    let mut app = ui::App::new(Box::new(store));
    ui::run_ui(&mut app)?;

    println!("✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_data_file: &str) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
