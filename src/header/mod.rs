//! Packed byte-layout views over borrowed slices (C1). Each view is a pure
//! accessor over someone else's memory: no write-back, no checksum
//! validation, no options decoding — those are out of scope for a dissector
//! that only needs to walk and classify, not reassemble or revalidate.

pub mod ethernet;
pub mod icmpv6;
pub mod ipv4;
pub mod ipv6;
pub mod ipv6_ext;
pub mod mpls;
pub mod tcp;
pub mod udp;
pub mod vlan;

pub use ethernet::EthernetSlice;
pub use icmpv6::Icmpv6Slice;
pub use ipv4::{FragmentType, Ipv4Slice};
pub use ipv6::Ipv6Slice;
pub use ipv6_ext::{Ipv6ExtSlice, Ipv6FragmentSlice};
pub use mpls::MplsSlice;
pub use tcp::TcpSlice;
pub use udp::UdpSlice;
pub use vlan::VlanSlice;
