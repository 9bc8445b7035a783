//! packetforge: a packet dissector and TLS 1.2 handshake synthesizer for
//! building replayable test traffic.
//!
//! The crate is built from two halves that share a layer/error vocabulary
//! but run in opposite directions:
//!
//! * **Dissection** ([`dissect`], [`packet_info`], [`packet`]) walks a raw
//!   captured frame and classifies it layer by layer (Ethernet, VLAN, MPLS,
//!   IPv4/IPv6 and its extension headers, TCP/UDP, ICMPv6), then locates the
//!   outermost non-tunnelled L3/L4 position for a replay emitter to act on.
//! * **Synthesis** ([`tls`]) builds byte-exact TLS 1.2 handshake messages
//!   (ClientHello through Finished) from a pre-generated certificate/key
//!   database and fits them into a flow's remaining packet/byte budget.
//!
//! Both halves report failures through a single [`error::CoreError`].
//!
//! ```
//! use packetforge::dissect::dissect;
//! use packetforge::layer::{LayerType, LinkType};
//! use packetforge::raw_packet::RawPacket;
//!
//! let mut frame = vec![0u8; 14];
//! frame[12] = 0x08;
//! frame[13] = 0x00; // IPv4
//! let packet = RawPacket::new(0, &frame);
//! // A truncated IPv4 header after the ethertype is a malformed packet,
//! // not a panic.
//! assert!(dissect(packet, LayerType::Link(LinkType::Ethernet)).is_err());
//! ```

pub mod cli;
pub mod dissect;
pub mod error;
pub mod external;
pub mod flow_plan;
pub mod header;
pub mod layer;
pub mod packet;
pub mod packet_info;
pub mod random;
pub mod raw_packet;
pub mod tls;

pub use error::{CoreError, Result};
pub use layer::{Layer, LayerNumber, LayerType};
pub use packet::Packet;
pub use packet_info::PacketInfo;
pub use raw_packet::RawPacket;
