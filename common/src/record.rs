//! # Host Record Model
//!
//! The persisted unit of this tool: one record per distinct IPv4 destination
//! seen in a capture, stored as a comma-joined string under its address.

use thiserror::Error;

const FIELD_DELIMITER: char = ',';
const FIELD_COUNT: usize = 4;

/// Failure to decode a stored record value.
///
/// Stored values are written exclusively by [`HostRecord::serialize`], so a
/// value that does not decode means the store was corrupted or written by
/// something else. Callers surface these instead of skipping the record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed host record (expected {FIELD_COUNT} fields): {0:?}")]
    Format(String),
    #[error("protocol value {value:?} is not an integer in 0..=255 in record {record:?}")]
    Protocol { value: String, record: String },
}

/// A destination host observed in IPv4 traffic.
///
/// `address` is the unique store key. `host` equals the address literal when
/// no name was resolved. Stored records are immutable: registration is
/// insert-if-absent and there is no update path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub address: String,
    pub host: String,
    pub protocol_value: u8,
    pub protocol_name: String,
}

impl HostRecord {
    /// Encodes the record as `address,host,protocolValue,protocolName`.
    ///
    /// The delimiter is not escaped: a `host` or `protocol_name` containing
    /// a comma will not survive a round trip.
    pub fn serialize(&self) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}",
            self.address,
            self.host,
            self.protocol_value,
            self.protocol_name,
            d = FIELD_DELIMITER,
        )
    }

    /// Rebuilds a record from its serialized form.
    pub fn deserialize(value: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = value.split(FIELD_DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordError::Format(value.to_string()));
        }

        let protocol_value: u8 = fields[2].parse().map_err(|_| RecordError::Protocol {
            value: fields[2].to_string(),
            record: value.to_string(),
        })?;

        Ok(Self {
            address: fields[0].to_string(),
            host: fields[1].to_string(),
            protocol_value,
            protocol_name: fields[3].to_string(),
        })
    }
}
