//! End-to-end runs of the parse → store → query flow over synthesized
//! captures and scratch stores.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use capmap_common::config::Config;
use capmap_core::ops;
use pnet::packet::ip::IpNextHeaderProtocols;
use tempfile::TempDir;

use crate::util::{arp_frame, ipv4_frame, write_capture};

struct Workspace {
    _dir: TempDir,
    capture: PathBuf,
    store: PathBuf,
}

impl Workspace {
    fn with_frames(frames: &[Vec<u8>]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("traffic.pcap");
        let store = dir.path().join("hosts.capmapdb");
        write_capture(&capture, frames);
        Self {
            _dir: dir,
            capture,
            store,
        }
    }
}

#[test]
fn parse_stores_one_record_per_unique_public_destination() {
    // Site-local destination, a public one, and a repeat of the public one
    // inside the dedup window: exactly one record must come out.
    let ws = Workspace::with_frames(&[
        ipv4_frame(Ipv4Addr::new(10, 0, 0, 5), IpNextHeaderProtocols::Tcp),
        ipv4_frame(Ipv4Addr::new(93, 184, 216, 34), IpNextHeaderProtocols::Tcp),
        ipv4_frame(Ipv4Addr::new(93, 184, 216, 34), IpNextHeaderProtocols::Tcp),
    ]);

    let inserted = ops::parse(&ws.capture, &ws.store, &Config::default()).unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(ops::count(&ws.store).unwrap(), 1);

    let lines = ops::list_all(&ws.store).unwrap();
    assert_eq!(lines[0], "address,host,protocolValue,protocolName");
    assert_eq!(lines[1], "93.184.216.34,93.184.216.34.6,TCP");
}

#[test]
fn reparsing_the_same_capture_adds_nothing() {
    let ws = Workspace::with_frames(&[
        ipv4_frame(Ipv4Addr::new(93, 184, 216, 34), IpNextHeaderProtocols::Tcp),
        ipv4_frame(Ipv4Addr::new(1, 1, 1, 1), IpNextHeaderProtocols::Udp),
    ]);

    assert_eq!(
        ops::parse(&ws.capture, &ws.store, &Config::default()).unwrap(),
        2
    );
    assert_eq!(
        ops::parse(&ws.capture, &ws.store, &Config::default()).unwrap(),
        0
    );
    assert_eq!(ops::count(&ws.store).unwrap(), 2);
}

#[test]
fn include_local_stores_private_destinations() {
    let ws = Workspace::with_frames(&[ipv4_frame(
        Ipv4Addr::new(10, 0, 0, 5),
        IpNextHeaderProtocols::Tcp,
    )]);
    let cfg = Config {
        include_local: true,
    };

    assert_eq!(ops::parse(&ws.capture, &ws.store, &cfg).unwrap(), 1);

    let lines = ops::list_all(&ws.store).unwrap();
    assert_eq!(lines[1], "10.0.0.5,10.0.0.5.6,TCP");
}

#[test]
fn non_ip_traffic_registers_nothing() {
    let ws = Workspace::with_frames(&[arp_frame(), arp_frame()]);

    assert_eq!(
        ops::parse(&ws.capture, &ws.store, &Config::default()).unwrap(),
        0
    );
    assert_eq!(ops::count(&ws.store).unwrap(), 0);
}

#[test]
fn missing_capture_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("hosts.capmapdb");
    let capture = dir.path().join("never-written.pcap");

    // The pipeline logs the open failure and yields nothing; the operation
    // itself succeeds so partial workflows can continue.
    assert_eq!(ops::parse(&capture, &store, &Config::default()).unwrap(), 0);
    assert_eq!(ops::count(&store).unwrap(), 0);
}

#[test]
fn truncate_then_count_starts_from_zero() {
    let ws = Workspace::with_frames(&[
        ipv4_frame(Ipv4Addr::new(8, 8, 8, 8), IpNextHeaderProtocols::Udp),
        ipv4_frame(Ipv4Addr::new(9, 9, 9, 9), IpNextHeaderProtocols::Tcp),
    ]);

    ops::parse(&ws.capture, &ws.store, &Config::default()).unwrap();
    assert_eq!(ops::count(&ws.store).unwrap(), 2);

    assert!(ops::truncate(&ws.store).unwrap());
    assert!(!ws.store.exists());
    assert_eq!(ops::count(&ws.store).unwrap(), 0);

    // Truncating again is a silent no-op.
    assert!(!ops::truncate(&ws.store).unwrap());
}

#[test]
fn listing_reports_protocols_by_name_and_number() {
    let ws = Workspace::with_frames(&[
        ipv4_frame(Ipv4Addr::new(1, 1, 1, 1), IpNextHeaderProtocols::Udp),
        ipv4_frame(Ipv4Addr::new(2, 2, 2, 2), IpNextHeaderProtocols::Icmp),
    ]);

    ops::parse(&ws.capture, &ws.store, &Config::default()).unwrap();

    let mut lines = ops::list_all(&ws.store).unwrap();
    let header = lines.remove(0);
    lines.sort();

    assert_eq!(header, "address,host,protocolValue,protocolName");
    assert_eq!(
        lines,
        vec![
            "1.1.1.1,1.1.1.1.17,UDP".to_string(),
            "2.2.2.2,2.2.2.2.1,ICMP".to_string(),
        ],
    );
}
