use std::path::PathBuf;

use capmap_core::ops;
use colored::*;

pub fn run(store: Option<PathBuf>) -> anyhow::Result<()> {
    let store = store.unwrap_or_else(ops::default_store_path);
    let total = ops::count(&store)?;

    let unit: &str = if total == 1 { "host" } else { "hosts" };
    println!("{} stored {unit}", total.to_string().green().bold());
    Ok(())
}
