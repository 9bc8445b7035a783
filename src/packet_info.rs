//! Extracts the outermost addressable L3/L4 position from a dissected
//! layer list (C4). Grounded on `packetBuilder.cpp`'s `GetPacketInfo` in the
//! replay tool: find the first IPv4/IPv6 layer, then the first transport
//! layer that isn't itself behind a *further* IP tunnel.

use crate::error::{CoreError, Result};
use crate::layer::{EtherType, Layer, LayerNumber, LayerType, ProtocolType, layer_type_to_number};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum L3Type {
    IPv4,
    IPv6,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum L4Type {
    TCP,
    UDP,
    Other,
    NotFound,
}

/// Outer-L3 and adjacent-L4 offsets used by the replay emitter (C5).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PacketInfo {
    pub l3_offset: u16,
    pub l3_type: L3Type,
    pub l4_offset: u16,
    pub l4_type: L4Type,
}

fn is_ip_layer(layer_type: LayerType) -> Option<L3Type> {
    match layer_type {
        LayerType::Ether(EtherType::IPv4) | LayerType::Protocol(ProtocolType::IPv4) => {
            Some(L3Type::IPv4)
        }
        LayerType::Ether(EtherType::IPv6) | LayerType::Protocol(ProtocolType::IPv6) => {
            Some(L3Type::IPv6)
        }
        _ => None,
    }
}

fn l4_type_of(layer_type: LayerType) -> L4Type {
    match layer_type {
        LayerType::Protocol(ProtocolType::TCP) => L4Type::TCP,
        LayerType::Protocol(ProtocolType::UDP) => L4Type::UDP,
        _ => L4Type::Other,
    }
}

impl PacketInfo {
    /// Locates the outermost IPv4/IPv6 layer and, if it isn't itself
    /// tunnelling another IP layer before any transport header, the
    /// adjacent L4 layer.
    pub fn extract(layers: &[Layer]) -> Result<PacketInfo> {
        let p3 = layers
            .iter()
            .position(|l| is_ip_layer(l.layer_type).is_some())
            .ok_or_else(|| {
                CoreError::StructureMissing("unable to locate IPv4/IPv6 layer".to_string())
            })?;

        let l3_type = is_ip_layer(layers[p3].layer_type).unwrap();
        let l3_offset = layers[p3].offset as u16;

        let p3_next = layers[p3 + 1..]
            .iter()
            .position(|l| is_ip_layer(l.layer_type).is_some())
            .map(|i| i + p3 + 1);
        let p4 = layers[p3 + 1..]
            .iter()
            .position(|l| layer_type_to_number(l.layer_type) == LayerNumber::L4)
            .map(|i| i + p3 + 1);

        let (l4_offset, l4_type) = match p4 {
            None => (0, L4Type::NotFound),
            Some(p4) => match p3_next {
                Some(p3_next) if p3_next < p4 => (0, L4Type::NotFound),
                _ => (layers[p4].offset as u16, l4_type_of(layers[p4].layer_type)),
            },
        };

        Ok(PacketInfo {
            l3_offset,
            l3_type,
            l4_offset,
            l4_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{LinkType, PayloadType};

    fn layer(layer_type: LayerType, offset: usize) -> Layer {
        Layer { layer_type, offset }
    }

    #[test]
    fn plain_ipv4_tcp_reports_standard_offsets() {
        let layers = vec![
            layer(LayerType::Link(LinkType::Ethernet), 0),
            layer(LayerType::Ether(EtherType::IPv4), 14),
            layer(LayerType::Protocol(ProtocolType::TCP), 34),
            layer(LayerType::Payload(PayloadType::AppData), 54),
        ];
        let info = PacketInfo::extract(&layers).unwrap();
        assert_eq!(info.l3_offset, 14);
        assert_eq!(info.l3_type, L3Type::IPv4);
        assert_eq!(info.l4_offset, 34);
        assert_eq!(info.l4_type, L4Type::TCP);
    }

    #[test]
    fn ip_in_ip_reports_outer_l3_and_no_l4() {
        let layers = vec![
            layer(LayerType::Link(LinkType::Ethernet), 0),
            layer(LayerType::Ether(EtherType::IPv4), 14),
            layer(LayerType::Protocol(ProtocolType::IPv4), 34),
            layer(LayerType::Protocol(ProtocolType::TCP), 54),
            layer(LayerType::Payload(PayloadType::AppData), 74),
        ];
        let info = PacketInfo::extract(&layers).unwrap();
        assert_eq!(info.l3_offset, 14);
        assert_eq!(info.l3_type, L3Type::IPv4);
        assert_eq!(info.l4_offset, 0);
        assert_eq!(info.l4_type, L4Type::NotFound);
    }

    #[test]
    fn no_ip_layer_is_structure_missing() {
        let layers = vec![layer(LayerType::Link(LinkType::Ethernet), 0)];
        assert!(PacketInfo::extract(&layers).is_err());
    }

    #[test]
    fn fragment_without_transport_reports_not_found() {
        let layers = vec![
            layer(LayerType::Link(LinkType::Ethernet), 0),
            layer(LayerType::Ether(EtherType::IPv4), 14),
            layer(LayerType::Payload(PayloadType::IPFragment), 34),
        ];
        let info = PacketInfo::extract(&layers).unwrap();
        assert_eq!(info.l4_offset, 0);
        assert_eq!(info.l4_type, L4Type::NotFound);
    }
}
