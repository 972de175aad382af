//! Capture fixtures: minimal legacy pcap files assembled in memory.

use std::net::Ipv4Addr;
use std::path::Path;

use pnet::packet::ethernet::{EtherTypes, MutableEthernetPacket};
use pnet::packet::ip::IpNextHeaderProtocol;
use pnet::packet::ipv4::MutableIpv4Packet;
use pnet::util::MacAddr;

const ETH_HDR_LEN: usize = 14;
const IP_V4_HDR_LEN: usize = 20;

/// Serializes `frames` into legacy pcap bytes (Ethernet linktype, little
/// endian, zeroed timestamps).
pub fn pcap_bytes(frames: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0xa1b2_c3d4u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&4u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&65_535u32.to_le_bytes());
    bytes.extend_from_slice(&1u32.to_le_bytes());

    for frame in frames {
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        bytes.extend_from_slice(frame);
    }
    bytes
}

pub fn write_capture(path: &Path, frames: &[Vec<u8>]) {
    std::fs::write(path, pcap_bytes(frames)).expect("writing capture fixture");
}

/// An Ethernet frame carrying a minimal IPv4 header to `destination`.
pub fn ipv4_frame(destination: Ipv4Addr, next_level: IpNextHeaderProtocol) -> Vec<u8> {
    let mut buffer = vec![0u8; ETH_HDR_LEN + IP_V4_HDR_LEN];
    {
        let mut ethernet = MutableEthernetPacket::new(&mut buffer[..ETH_HDR_LEN]).unwrap();
        ethernet.set_destination(MacAddr::new(0xde, 0xad, 0xbe, 0xef, 0, 1));
        ethernet.set_source(MacAddr::new(0xde, 0xad, 0xbe, 0xef, 0, 2));
        ethernet.set_ethertype(EtherTypes::Ipv4);
    }
    {
        let mut ipv4 = MutableIpv4Packet::new(&mut buffer[ETH_HDR_LEN..]).unwrap();
        ipv4.set_version(4);
        ipv4.set_header_length(5);
        ipv4.set_total_length(IP_V4_HDR_LEN as u16);
        ipv4.set_ttl(64);
        ipv4.set_next_level_protocol(next_level);
        ipv4.set_source(Ipv4Addr::new(192, 0, 2, 1));
        ipv4.set_destination(destination);
    }
    buffer
}

/// A non-IP frame (ARP ethertype over a zeroed body).
pub fn arp_frame() -> Vec<u8> {
    let mut buffer = vec![0u8; ETH_HDR_LEN + 28];
    let mut ethernet = MutableEthernetPacket::new(&mut buffer[..ETH_HDR_LEN]).unwrap();
    ethernet.set_ethertype(EtherTypes::Arp);
    drop(ethernet);
    buffer
}
