use etherparse::{LaxNetSlice, LaxSlicedPacket, TransportSlice};
use std::fmt;

use crate::sniff::{CapturedPacket, LinkLayer};

/// Network-layer endpoint type, named the way address families are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkProtocol {
    Ipv4,
    Ipv6,
}

impl NetworkProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkProtocol::Ipv4 => "IPv4",
            NetworkProtocol::Ipv6 => "IPv6",
        }
    }
}

impl fmt::Display for NetworkProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedPacket<'a> {
    pub network: Option<NetworkProtocol>,
    /// TCP/UDP payload, only when non-empty.
    pub payload: Option<&'a [u8]>,
    pub length: usize,
}

const SLL_HEADER_LEN: usize = 16;
const NULL_HEADER_LEN: usize = 4;
const ETHERTYPE_IPV4: [u8; 2] = [0x08, 0x00];
const ETHERTYPE_IPV6: [u8; 2] = [0x86, 0xdd];

/// Slices leniently: frames cut short by the snap length still report their
/// network layer, and the transport payload is whatever was captured.
pub fn decode(packet: &CapturedPacket) -> DecodedPacket<'_> {
    let data = &packet.data[..];
    let sliced = match packet.link {
        LinkLayer::Ethernet => LaxSlicedPacket::from_ethernet(data).ok(),
        LinkLayer::RawIp => LaxSlicedPacket::from_ip(data).ok(),
        LinkLayer::LinuxSll => sll_ip_payload(data).and_then(|ip| LaxSlicedPacket::from_ip(ip).ok()),
        LinkLayer::Null => data
            .get(NULL_HEADER_LEN..)
            .and_then(|ip| LaxSlicedPacket::from_ip(ip).ok()),
        LinkLayer::Unsupported => None,
    };

    let mut decoded = DecodedPacket {
        network: None,
        payload: None,
        length: packet.len(),
    };
    let Some(sliced) = sliced else {
        return decoded;
    };

    decoded.network = match &sliced.net {
        Some(LaxNetSlice::Ipv4(_)) => Some(NetworkProtocol::Ipv4),
        Some(LaxNetSlice::Ipv6(_)) => Some(NetworkProtocol::Ipv6),
        _ => None,
    };

    let payload = match &sliced.transport {
        Some(TransportSlice::Udp(udp)) => udp.payload(),
        Some(TransportSlice::Tcp(tcp)) => tcp.payload(),
        _ => &[],
    };
    if !payload.is_empty() {
        decoded.payload = Some(payload);
    }

    decoded
}

// Linux cooked capture: the protocol field closes the 16 byte header.
fn sll_ip_payload(data: &[u8]) -> Option<&[u8]> {
    let protocol = data.get(SLL_HEADER_LEN - 2..SLL_HEADER_LEN)?;
    if protocol == ETHERTYPE_IPV4 || protocol == ETHERTYPE_IPV6 {
        data.get(SLL_HEADER_LEN..)
    } else {
        None
    }
}
