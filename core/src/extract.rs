//! # Extraction Pipeline
//!
//! Turns a capture into a lazy stream of unique destination hosts: IPv4
//! payloads only, destination address pulled from the header, recently seen
//! and (by default) site-local destinations dropped.

use std::fs::File;
use std::io::{BufReader, Read};
use std::net::Ipv4Addr;
use std::path::Path;

use capmap_common::config::Config;
use capmap_common::network::protocol;
use capmap_common::record::HostRecord;
use pcap_parser::Linktype;
use pcap_parser::data::{PacketData, get_packetdata};
use pnet::packet::Packet;
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::packet::ipv4::Ipv4Packet;
use tracing::{debug, error};

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_WINDOW, DedupCache};
use crate::capture::FrameSource;

/// Maps a destination address to a display name.
///
/// The default implementation resolves nothing, which keeps the pipeline
/// free of network side effects; records then carry the address literal as
/// their `host`. A resolving implementation can be plugged in per stream.
pub trait Resolver {
    fn resolve(&self, address: Ipv4Addr) -> Option<String>;
}

/// The no-op [`Resolver`].
pub struct AddressLiteral;

impl Resolver for AddressLiteral {
    fn resolve(&self, _address: Ipv4Addr) -> Option<String> {
        None
    }
}

/// Lazy, single-consumer, forward-only stream of [`HostRecord`]s.
///
/// Not restartable: once the underlying capture is exhausted or fails, the
/// stream stays empty. Duplicate suppression within one pass is handled by
/// the [`DedupCache`]; the repository enforces uniqueness across passes.
pub struct RecordStream<R: Read> {
    source: Option<FrameSource<R>>,
    cache: DedupCache,
    resolver: Box<dyn Resolver>,
    include_local: bool,
}

impl RecordStream<BufReader<File>> {
    /// Opens `path` for extraction.
    ///
    /// A capture that cannot be opened yields an empty stream; the failure
    /// is logged, not propagated, so callers can still report results.
    pub fn open(path: &Path, cfg: &Config) -> Self {
        let source = match FrameSource::open(path) {
            Ok(source) => Some(source),
            Err(e) => {
                error!("cannot read capture: {e:#}");
                None
            }
        };
        Self::assemble(source, cfg)
    }
}

impl<R: Read> RecordStream<R> {
    pub fn from_source(source: FrameSource<R>, cfg: &Config) -> Self {
        Self::assemble(Some(source), cfg)
    }

    fn assemble(source: Option<FrameSource<R>>, cfg: &Config) -> Self {
        Self {
            source,
            cache: DedupCache::new(DEFAULT_CAPACITY, DEFAULT_WINDOW),
            resolver: Box::new(AddressLiteral),
            include_local: cfg.include_local,
        }
    }

    /// Swaps the dedup cache, e.g. for one with a pinned clock.
    pub fn with_cache(mut self, cache: DedupCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_resolver(mut self, resolver: Box<dyn Resolver>) -> Self {
        self.resolver = resolver;
        self
    }

    fn record_from_frame(&self, frame: &[u8], linktype: Linktype) -> Option<HostRecord> {
        match get_packetdata(frame, linktype, frame.len())? {
            PacketData::L2(l2) => {
                let ethernet = EthernetPacket::new(l2)?;
                if ethernet.get_ethertype() != EtherTypes::Ipv4 {
                    return None;
                }
                self.candidate(Ipv4Packet::new(ethernet.payload())?)
            }
            PacketData::L3(ethertype, l3) => {
                if ethertype != EtherTypes::Ipv4.0 {
                    return None;
                }
                self.candidate(Ipv4Packet::new(l3)?)
            }
            _ => None,
        }
    }

    fn candidate(&self, ipv4: Ipv4Packet<'_>) -> Option<HostRecord> {
        let destination = ipv4.get_destination();
        let address = destination.to_string();

        if self.cache.contains(&address) {
            return None;
        }
        if !self.include_local && destination.is_private() {
            return None;
        }

        let host = self
            .resolver
            .resolve(destination)
            .unwrap_or_else(|| address.clone());
        let next_level = ipv4.get_next_level_protocol();
        let record = HostRecord {
            address: address.clone(),
            host: host.clone(),
            protocol_value: next_level.0,
            protocol_name: protocol::name(next_level).to_string(),
        };

        self.cache.insert(address, host);
        debug!("extracted {record:?}");
        Some(record)
    }
}

impl<R: Read> Iterator for RecordStream<R> {
    type Item = HostRecord;

    fn next(&mut self) -> Option<HostRecord> {
        loop {
            let (frame, linktype) = {
                let source = self.source.as_mut()?;
                let frame = source.next_frame()?;
                (frame, source.linktype())
            };
            if let Some(record) = self.record_from_frame(&frame, linktype) {
                return Some(record);
            }
        }
    }
}
