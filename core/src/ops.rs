//! # Operations Facade
//!
//! The entry points the command surface drives. Each call opens the store
//! for its own duration; the repository handle is scoped, so the store is
//! released on every exit path.

use std::path::{Path, PathBuf};

use anyhow::Context;
use capmap_common::config::Config;
use capmap_common::record::HostRecord;
use tracing::info;

use crate::extract::RecordStream;
use crate::repo::HostRepository;

/// File name of the per-user store, placed in the home directory.
const STORE_FILE_NAME: &str = ".capmapdb";

/// Header emitted ahead of the listing lines.
pub const LISTING_HEADER: &str = "address,host,protocolValue,protocolName";

pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORE_FILE_NAME)
}

/// Runs the extraction pipeline over `capture` and registers every emitted
/// record. Returns how many records were newly stored.
pub fn parse(capture: &Path, store: &Path, cfg: &Config) -> anyhow::Result<usize> {
    let repository = HostRepository::open(store)?;

    let mut inserted = 0;
    for record in RecordStream::open(capture, cfg) {
        if repository.register(&record)? {
            inserted += 1;
        }
    }

    info!("{inserted} new hosts from {}", capture.display());
    Ok(inserted)
}

/// One line per stored record, preceded by [`LISTING_HEADER`].
pub fn list_all(store: &Path) -> anyhow::Result<Vec<String>> {
    let repository = HostRepository::open(store)?;

    let mut lines = vec![LISTING_HEADER.to_string()];
    for record in repository.find_all()? {
        lines.push(listing_line(&record?));
    }
    Ok(lines)
}

/// Number of distinct stored hosts. Creates an empty store when none
/// exists, so a truncated store counts as zero.
pub fn count(store: &Path) -> anyhow::Result<u64> {
    HostRepository::open(store)?.count()
}

/// Removes the store file. Returns whether a file was deleted; a missing
/// store is a silent success, not an error.
pub fn truncate(store: &Path) -> anyhow::Result<bool> {
    match std::fs::remove_file(store) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            Err(e).with_context(|| format!("removing host store {}", store.display()))
        }
    }
}

/// Listing row for one record.
///
/// `host` and the protocol value are joined by a period while everything
/// else uses commas. That mismatch is the long-standing output contract of
/// this interface and existing consumers parse it, so it stays.
pub fn listing_line(record: &HostRecord) -> String {
    format!(
        "{},{}.{},{}",
        record.address, record.host, record.protocol_value, record.protocol_name
    )
}
