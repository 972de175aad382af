//! # Host Repository
//!
//! Durable single-file key-value store of unique hosts, keyed by address.
//! The on-disk layout belongs to the redb engine; this module only deals in
//! the address → serialized-record mapping.

use std::path::Path;

use anyhow::Context;
use capmap_common::record::{HostRecord, RecordError};
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};

const HOSTS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("hosts");

/// Exclusive, process-local handle on the host store.
///
/// The backing file (and the hosts table) is created on first open.
/// Dropping the repository closes the store; release is scoped, so every
/// exit path of an operation closes exactly once. Committed writes are
/// durable, and an abrupt process end leaves redb to recover from its own
/// journal on the next open.
pub struct HostRepository {
    db: Database,
}

impl HostRepository {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let db = Database::create(path)
            .with_context(|| format!("opening host store {}", path.display()))?;

        // Create the hosts table up front so reads on a fresh store see an
        // empty mapping instead of a missing one.
        let txn = db.begin_write()?;
        txn.open_table(HOSTS_TABLE)?;
        txn.commit()?;

        Ok(Self { db })
    }

    /// Insert-if-absent registration.
    ///
    /// The first write for an address wins; duplicate packets and dedup
    /// cache misses land here as no-ops and never overwrite. Returns
    /// whether a row was actually added.
    pub fn register(&self, record: &HostRecord) -> anyhow::Result<bool> {
        let txn = self.db.begin_write()?;
        let inserted = {
            let mut table = txn.open_table(HOSTS_TABLE)?;
            let known = table.get(record.address.as_str())?.is_some();
            if known {
                false
            } else {
                table.insert(record.address.as_str(), record.serialize().as_str())?;
                true
            }
        };
        txn.commit()?;
        Ok(inserted)
    }

    /// All stored records, deserialized lazily, in engine order (which is
    /// not insertion order).
    ///
    /// A value that does not decode surfaces its [`RecordError`]: that is
    /// corrupt internal data, not input to be skipped quietly.
    pub fn find_all(
        &self,
    ) -> anyhow::Result<impl Iterator<Item = Result<HostRecord, RecordError>> + use<>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(HOSTS_TABLE)?;

        let mut values = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            values.push(value.value().to_string());
        }

        Ok(values
            .into_iter()
            .map(|value| HostRecord::deserialize(&value)))
    }

    /// Number of distinct stored addresses.
    pub fn count(&self) -> anyhow::Result<u64> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(HOSTS_TABLE)?;
        Ok(table.len()?)
    }
}
