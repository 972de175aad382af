use std::path::PathBuf;

use capmap_core::ops;

pub fn run(store: Option<PathBuf>) -> anyhow::Result<()> {
    let store = store.unwrap_or_else(ops::default_store_path);
    for line in ops::list_all(&store)? {
        println!("{line}");
    }
    Ok(())
}
