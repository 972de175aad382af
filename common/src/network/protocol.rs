use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};

/// Display name for an IPv4 next-level protocol number.
///
/// Covers the transport protocols that show up in real captures; anything
/// else reports as `UNKNOWN`, which also keeps the name free of the record
/// delimiter.
pub fn name(protocol: IpNextHeaderProtocol) -> &'static str {
    match protocol {
        IpNextHeaderProtocols::Icmp => "ICMP",
        IpNextHeaderProtocols::Igmp => "IGMP",
        IpNextHeaderProtocols::Tcp => "TCP",
        IpNextHeaderProtocols::Udp => "UDP",
        IpNextHeaderProtocols::Ipv6 => "IPV6",
        IpNextHeaderProtocols::Gre => "GRE",
        IpNextHeaderProtocols::Esp => "ESP",
        IpNextHeaderProtocols::Ah => "AH",
        IpNextHeaderProtocols::Icmpv6 => "ICMPV6",
        IpNextHeaderProtocols::Sctp => "SCTP",
        _ => "UNKNOWN",
    }
}
