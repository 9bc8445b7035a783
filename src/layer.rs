//! The tagged-union layer taxonomy the dissector emits (C2).

/// Link-layer framing. Only Ethernet II is recognised.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LinkType {
    Ethernet,
}

/// EtherType values relevant to the dissector. Carries the raw u16 so unknown
/// values can still be reported in an error message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EtherType {
    IPv4,
    VLAN,
    IPv6,
    MPLS,
    MPLSUpstream,
    VLANSTag,
}

impl EtherType {
    pub const IPV4: u16 = 0x0800;
    pub const VLAN_TAG: u16 = 0x8100;
    pub const IPV6: u16 = 0x86DD;
    pub const MPLS_VAL: u16 = 0x8847;
    pub const MPLS_UPSTREAM: u16 = 0x8848;
    pub const VLAN_S_TAG: u16 = 0x88A8;

    pub fn from_u16(value: u16) -> Option<EtherType> {
        match value {
            Self::IPV4 => Some(EtherType::IPv4),
            Self::VLAN_TAG => Some(EtherType::VLAN),
            Self::IPV6 => Some(EtherType::IPv6),
            Self::MPLS_VAL => Some(EtherType::MPLS),
            Self::MPLS_UPSTREAM => Some(EtherType::MPLSUpstream),
            Self::VLAN_S_TAG => Some(EtherType::VLANSTag),
            _ => None,
        }
    }
}

/// IP protocol numbers the dissector understands as a "ProtocolType" layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProtocolType {
    IPv6HopOpt,
    IPv4,
    TCP,
    UDP,
    IPv6,
    IPv6Route,
    IPv6Frag,
    IPv6NoNext,
    IPv6Dest,
    ICMPv6,
    Unknown,
}

impl ProtocolType {
    pub fn from_u8(value: u8) -> ProtocolType {
        match value {
            0 => ProtocolType::IPv6HopOpt,
            4 => ProtocolType::IPv4,
            6 => ProtocolType::TCP,
            17 => ProtocolType::UDP,
            41 => ProtocolType::IPv6,
            43 => ProtocolType::IPv6Route,
            44 => ProtocolType::IPv6Frag,
            58 => ProtocolType::ICMPv6,
            59 => ProtocolType::IPv6NoNext,
            60 => ProtocolType::IPv6Dest,
            _ => ProtocolType::Unknown,
        }
    }
}

/// Terminal, non-header payload classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PayloadType {
    Unknown,
    IPFragment,
    AppData,
}

/// The tagged union over all four layer-tag families.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LayerType {
    Link(LinkType),
    Ether(EtherType),
    Protocol(ProtocolType),
    Payload(PayloadType),
}

/// Coarse OSI-ish bucket used only to find "the next L4" from PacketInfo.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LayerNumber {
    L2,
    L3,
    L4,
    L7,
}

/// A single dissected layer: its tag and the byte offset it starts at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Layer {
    pub layer_type: LayerType,
    pub offset: usize,
}

/// Total, deterministic mapping from a tagged layer to its coarse bucket.
pub fn layer_type_to_number(t: LayerType) -> LayerNumber {
    match t {
        LayerType::Link(LinkType::Ethernet) => LayerNumber::L2,
        LayerType::Ether(et) => match et {
            EtherType::IPv4 | EtherType::IPv6 => LayerNumber::L3,
            EtherType::VLAN
            | EtherType::VLANSTag
            | EtherType::MPLS
            | EtherType::MPLSUpstream => LayerNumber::L2,
        },
        LayerType::Protocol(pt) => match pt {
            ProtocolType::IPv6HopOpt
            | ProtocolType::IPv4
            | ProtocolType::IPv6
            | ProtocolType::IPv6Route
            | ProtocolType::IPv6Frag
            | ProtocolType::IPv6NoNext
            | ProtocolType::IPv6Dest => LayerNumber::L3,
            ProtocolType::TCP | ProtocolType::UDP | ProtocolType::ICMPv6 => LayerNumber::L4,
            ProtocolType::Unknown => LayerNumber::L7,
        },
        LayerType::Payload(_) => LayerNumber::L7,
    }
}
