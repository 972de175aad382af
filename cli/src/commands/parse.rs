use std::path::{Path, PathBuf};

use capmap_common::config::Config;
use capmap_core::ops;
use colored::*;

pub fn run(capture: &Path, store: Option<PathBuf>, include_local: bool) -> anyhow::Result<()> {
    let store = store.unwrap_or_else(ops::default_store_path);
    let cfg = Config { include_local };

    let inserted = ops::parse(capture, &store, &cfg)?;

    let unit: &str = if inserted == 1 { "host" } else { "hosts" };
    println!(
        "{} new {unit} registered in {}",
        inserted.to_string().green().bold(),
        store.display()
    );
    Ok(())
}
