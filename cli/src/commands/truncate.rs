use std::path::PathBuf;

use capmap_core::ops;
use colored::*;

pub fn run(store: Option<PathBuf>) -> anyhow::Result<()> {
    let store = store.unwrap_or_else(ops::default_store_path);
    if ops::truncate(&store)? {
        println!("{}", "truncated.".yellow().bold());
    } else {
        println!("nothing to truncate.");
    }
    Ok(())
}
