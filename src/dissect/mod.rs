//! Recursive-descent packet dissection (C3): walks a raw frame layer by
//! layer and produces an ordered `Layer` list, dispatching on the tag
//! families from `crate::layer` rather than on any virtual header hierarchy.

use crate::error::{CoreError, Result};
use crate::header::ipv4::FragmentType as Ipv4FragmentType;
use crate::header::{
    EthernetSlice, Icmpv6Slice, Ipv4Slice, Ipv6ExtSlice, Ipv6FragmentSlice, Ipv6Slice, MplsSlice,
    TcpSlice, UdpSlice, VlanSlice,
};
use crate::layer::{EtherType, Layer, LayerType, LinkType, PayloadType, ProtocolType};
use crate::raw_packet::RawPacket;

/// Implementations MAY impose a depth cap on IP-in-IP tunnelling to bound
/// stack use; this dissector caps it at 8 nested IP headers.
const MAX_TUNNEL_DEPTH: usize = 8;

struct DissectCtx<'a> {
    data: &'a [u8],
    layers: Vec<Layer>,
    tunnel_depth: usize,
}

impl<'a> DissectCtx<'a> {
    fn push(&mut self, layer_type: LayerType, offset: usize) {
        self.layers.push(Layer { layer_type, offset });
    }

    fn remaining(&self, offset: usize) -> &'a [u8] {
        if offset >= self.data.len() {
            &[]
        } else {
            &self.data[offset..]
        }
    }
}

/// `dissect(packet, first_layer) -> Result<Vec<Layer>, CoreError>`.
pub fn dissect(packet: RawPacket, first_layer: LayerType) -> Result<Vec<Layer>> {
    tracing::debug!(first_layer = ?first_layer, len = packet.len(), "dissecting packet");

    let mut ctx = DissectCtx {
        data: packet.data,
        layers: Vec::new(),
        tunnel_depth: 0,
    };

    let result = match first_layer {
        LayerType::Link(lt) => process_link(&mut ctx, 0, lt),
        LayerType::Ether(et) => process_ether(&mut ctx, 0, et),
        LayerType::Protocol(pt) => process_proto(&mut ctx, 0, pt),
        LayerType::Payload(py) => process_payload(&mut ctx, 0, py),
    };

    match result {
        Ok(()) => Ok(ctx.layers),
        Err(err) => {
            tracing::warn!(error = %err, "dissection failed");
            Err(err)
        }
    }
}

fn process_link(ctx: &mut DissectCtx, offset: usize, layer: LinkType) -> Result<()> {
    match layer {
        LinkType::Ethernet => process_ethernet(ctx, offset),
    }
}

fn process_ethernet(ctx: &mut DissectCtx, offset: usize) -> Result<()> {
    let header = EthernetSlice::from_slice(ctx.remaining(offset))?;
    if !header.is_valid() {
        return Err(CoreError::MalformedPacket(
            "invalid Ethernet header".to_string(),
        ));
    }
    let next_offset = offset + EthernetSlice::HEADER_SIZE;
    let next_ether_type = header.ether_type();

    ctx.push(LayerType::Link(LinkType::Ethernet), offset);

    match EtherType::from_u16(next_ether_type) {
        Some(et) => process_ether(ctx, next_offset, et),
        None => Err(CoreError::MalformedPacket(format!(
            "unsupported EtherType 0x{:04x}",
            next_ether_type
        ))),
    }
}

fn process_vlan(ctx: &mut DissectCtx, offset: usize, layer: EtherType) -> Result<()> {
    let header = VlanSlice::from_slice(ctx.remaining(offset))?;
    let next_offset = offset + VlanSlice::HEADER_SIZE;
    let next_ether_type = header.ether_type();

    ctx.push(LayerType::Ether(layer), offset);

    match EtherType::from_u16(next_ether_type) {
        Some(et) => process_ether(ctx, next_offset, et),
        None => Err(CoreError::MalformedPacket(format!(
            "unsupported EtherType 0x{:04x}",
            next_ether_type
        ))),
    }
}

fn process_mpls(ctx: &mut DissectCtx, offset: usize, layer: EtherType) -> Result<()> {
    let header = MplsSlice::from_slice(ctx.remaining(offset))?;
    let next_offset = offset + MplsSlice::HEADER_SIZE;

    ctx.push(LayerType::Ether(layer), offset);

    if !header.is_bos() {
        return process_mpls(ctx, next_offset, layer);
    }

    // MPLS carries no next-protocol field; look ahead at the high nibble of
    // the following byte, which real captures encode as an IP version.
    let lookahead = ctx.remaining(next_offset);
    if lookahead.is_empty() {
        return Err(CoreError::MalformedPacket(
            "unexpected end of packet".to_string(),
        ));
    }
    let ip_version = lookahead[0] >> 4;

    match ip_version {
        4 => process_ipv4(ctx, next_offset, LayerType::Ether(EtherType::IPv4)),
        6 => process_ipv6(ctx, next_offset, LayerType::Ether(EtherType::IPv6)),
        _ => Err(CoreError::MalformedPacket(
            "unknown protocol after the last MPLS label".to_string(),
        )),
    }
}

fn process_ipv4(ctx: &mut DissectCtx, offset: usize, tag: LayerType) -> Result<()> {
    ctx.tunnel_depth += 1;
    if ctx.tunnel_depth > MAX_TUNNEL_DEPTH {
        return Err(CoreError::MalformedPacket(
            "tunnelling depth exceeded".to_string(),
        ));
    }

    let header = Ipv4Slice::from_slice(ctx.remaining(offset))?;
    if !header.is_valid() {
        return Err(CoreError::MalformedPacket("invalid IPv4 header".to_string()));
    }
    let hdr_length = header.hdr_length();
    if ctx.remaining(offset).len() < hdr_length {
        return Err(CoreError::MalformedPacket(
            "unexpected end of packet".to_string(),
        ));
    }
    let next_offset = offset + hdr_length;
    let next_proto = ProtocolType::from_u8(header.protocol());
    let fragment_type = header.fragment_type();

    ctx.push(tag, offset);
    process_ip_fragment(ctx, next_offset, fragment_type_into_ip(fragment_type), next_proto)
}

fn process_ipv6(ctx: &mut DissectCtx, offset: usize, tag: LayerType) -> Result<()> {
    ctx.tunnel_depth += 1;
    if ctx.tunnel_depth > MAX_TUNNEL_DEPTH {
        return Err(CoreError::MalformedPacket(
            "tunnelling depth exceeded".to_string(),
        ));
    }

    let header = Ipv6Slice::from_slice(ctx.remaining(offset))?;
    if !header.is_valid() {
        return Err(CoreError::MalformedPacket("invalid IPv6 header".to_string()));
    }
    let next_offset = offset + Ipv6Slice::HEADER_SIZE;
    let next_proto = ProtocolType::from_u8(header.next_header());

    ctx.push(tag, offset);
    process_proto(ctx, next_offset, next_proto)
}

fn process_tcp(ctx: &mut DissectCtx, offset: usize) -> Result<()> {
    let header = TcpSlice::from_slice(ctx.remaining(offset))?;
    if !header.is_valid() {
        return Err(CoreError::MalformedPacket("invalid TCP header".to_string()));
    }
    let hdr_length = header.hdr_length();
    if ctx.remaining(offset).len() < hdr_length {
        return Err(CoreError::MalformedPacket(
            "unexpected end of packet".to_string(),
        ));
    }
    let next_offset = offset + hdr_length;

    ctx.push(LayerType::Protocol(ProtocolType::TCP), offset);
    process_payload(ctx, next_offset, PayloadType::AppData)
}

fn process_udp(ctx: &mut DissectCtx, offset: usize) -> Result<()> {
    let header = UdpSlice::from_slice(ctx.remaining(offset))?;
    if !header.is_valid() {
        return Err(CoreError::MalformedPacket("invalid UDP header".to_string()));
    }
    let next_offset = offset + UdpSlice::HEADER_SIZE;

    ctx.push(LayerType::Protocol(ProtocolType::UDP), offset);
    process_payload(ctx, next_offset, PayloadType::AppData)
}

fn process_icmpv6(ctx: &mut DissectCtx, offset: usize) -> Result<()> {
    Icmpv6Slice::from_slice(ctx.remaining(offset))?;
    ctx.push(LayerType::Protocol(ProtocolType::ICMPv6), offset);
    Ok(())
}

fn process_ipv6_hop_by_hop(ctx: &mut DissectCtx, offset: usize) -> Result<()> {
    let header = Ipv6ExtSlice::from_slice(ctx.remaining(offset), Ipv6ExtSlice::HOP_BY_HOP_MIN)?;
    let hdr_length = header.hdr_length();
    if ctx.remaining(offset).len() < hdr_length {
        return Err(CoreError::MalformedPacket(
            "unexpected end of packet".to_string(),
        ));
    }
    let next_offset = offset + hdr_length;
    let next_proto = ProtocolType::from_u8(header.next_header());

    ctx.push(LayerType::Protocol(ProtocolType::IPv6HopOpt), offset);
    process_proto(ctx, next_offset, next_proto)
}

fn process_ipv6_route(ctx: &mut DissectCtx, offset: usize) -> Result<()> {
    let header = Ipv6ExtSlice::from_slice(ctx.remaining(offset), Ipv6ExtSlice::ROUTING_MIN)?;
    let hdr_length = header.hdr_length();
    if ctx.remaining(offset).len() < hdr_length {
        return Err(CoreError::MalformedPacket(
            "unexpected end of packet".to_string(),
        ));
    }
    let next_offset = offset + hdr_length;
    let next_proto = ProtocolType::from_u8(header.next_header());

    ctx.push(LayerType::Protocol(ProtocolType::IPv6Route), offset);
    process_proto(ctx, next_offset, next_proto)
}

fn process_ipv6_dest(ctx: &mut DissectCtx, offset: usize) -> Result<()> {
    let header = Ipv6ExtSlice::from_slice(ctx.remaining(offset), Ipv6ExtSlice::DEST_MIN)?;
    let hdr_length = header.hdr_length();
    if ctx.remaining(offset).len() < hdr_length {
        return Err(CoreError::MalformedPacket(
            "unexpected end of packet".to_string(),
        ));
    }
    let next_offset = offset + hdr_length;
    let next_proto = ProtocolType::from_u8(header.next_header());

    ctx.push(LayerType::Protocol(ProtocolType::IPv6Dest), offset);
    process_proto(ctx, next_offset, next_proto)
}

fn process_ipv6_fragment(ctx: &mut DissectCtx, offset: usize) -> Result<()> {
    let header = Ipv6FragmentSlice::from_slice(ctx.remaining(offset))?;
    let next_offset = offset + Ipv6FragmentSlice::HEADER_SIZE;
    let next_proto = ProtocolType::from_u8(header.next_header());

    let frag_type = if header.fragment_offset() == 0 {
        if header.more_fragments() {
            IpFragment::First
        } else {
            IpFragment::None
        }
    } else if header.more_fragments() {
        IpFragment::Middle
    } else {
        IpFragment::Last
    };

    ctx.push(LayerType::Protocol(ProtocolType::IPv6Frag), offset);
    process_ip_fragment(ctx, next_offset, frag_type, next_proto)
}

/// Unified fragment classification shared between IPv4 and IPv6 fragment
/// extension headers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum IpFragment {
    None,
    First,
    Middle,
    Last,
}

fn fragment_type_into_ip(ft: Ipv4FragmentType) -> IpFragment {
    match ft {
        Ipv4FragmentType::None => IpFragment::None,
        Ipv4FragmentType::First => IpFragment::First,
        Ipv4FragmentType::Middle => IpFragment::Middle,
        Ipv4FragmentType::Last => IpFragment::Last,
    }
}

fn process_ip_fragment(
    ctx: &mut DissectCtx,
    offset: usize,
    frag_type: IpFragment,
    next_proto: ProtocolType,
) -> Result<()> {
    match frag_type {
        IpFragment::None | IpFragment::First => process_proto(ctx, offset, next_proto),
        IpFragment::Middle | IpFragment::Last => {
            process_payload(ctx, offset, PayloadType::IPFragment)
        }
    }
}

fn process_ether(ctx: &mut DissectCtx, offset: usize, layer: EtherType) -> Result<()> {
    match layer {
        EtherType::IPv4 => process_ipv4(ctx, offset, LayerType::Ether(EtherType::IPv4)),
        EtherType::IPv6 => process_ipv6(ctx, offset, LayerType::Ether(EtherType::IPv6)),
        EtherType::VLAN | EtherType::VLANSTag => process_vlan(ctx, offset, layer),
        EtherType::MPLS | EtherType::MPLSUpstream => process_mpls(ctx, offset, layer),
    }
}

fn process_proto(ctx: &mut DissectCtx, offset: usize, layer: ProtocolType) -> Result<()> {
    match layer {
        ProtocolType::IPv6HopOpt => process_ipv6_hop_by_hop(ctx, offset),
        ProtocolType::IPv4 => process_ipv4(ctx, offset, LayerType::Protocol(ProtocolType::IPv4)),
        ProtocolType::TCP => process_tcp(ctx, offset),
        ProtocolType::UDP => process_udp(ctx, offset),
        ProtocolType::ICMPv6 => process_icmpv6(ctx, offset),
        ProtocolType::IPv6 => process_ipv6(ctx, offset, LayerType::Protocol(ProtocolType::IPv6)),
        ProtocolType::IPv6Route => process_ipv6_route(ctx, offset),
        ProtocolType::IPv6Frag => process_ipv6_fragment(ctx, offset),
        ProtocolType::IPv6Dest => process_ipv6_dest(ctx, offset),
        ProtocolType::IPv6NoNext => Ok(()),
        ProtocolType::Unknown => {
            ctx.push(LayerType::Protocol(ProtocolType::Unknown), offset);
            Ok(())
        }
    }
}

fn process_payload(ctx: &mut DissectCtx, offset: usize, layer: PayloadType) -> Result<()> {
    ctx.push(LayerType::Payload(layer), offset);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_info::{L4Type, PacketInfo};
    use byteorder::{BigEndian, ByteOrder};

    fn ethernet(ethertype: u16) -> Vec<u8> {
        let mut frame = vec![0u8; 14];
        BigEndian::write_u16(&mut frame[12..14], ethertype);
        frame
    }

    fn ipv4(protocol: u8, more_fragments: bool, fragment_offset_units: u16) -> Vec<u8> {
        let mut hdr = vec![0u8; 20];
        hdr[0] = 0x45; // version 4, ihl 5
        let flags_frag = if more_fragments { 1 << 13 } else { 0 } | fragment_offset_units;
        BigEndian::write_u16(&mut hdr[6..8], flags_frag);
        hdr[8] = 64; // ttl
        hdr[9] = protocol;
        hdr
    }

    fn tcp() -> Vec<u8> {
        let mut hdr = vec![0u8; 20];
        hdr[12] = 0x50; // data offset 5
        hdr
    }

    fn udp(payload_len: u16) -> Vec<u8> {
        let mut hdr = vec![0u8; 8];
        BigEndian::write_u16(&mut hdr[4..6], 8 + payload_len);
        hdr
    }

    fn ipv6(next_header: u8) -> Vec<u8> {
        let mut hdr = vec![0u8; 40];
        hdr[0] = 0x60; // version 6
        hdr[6] = next_header;
        hdr[7] = 64; // hop limit
        hdr
    }

    fn run(data: &[u8]) -> Vec<Layer> {
        dissect(
            RawPacket::new(0, data),
            LayerType::Link(LinkType::Ethernet),
        )
        .unwrap()
    }

    #[test]
    fn scenario_minimal_ipv4_udp() {
        let mut data = ethernet(0x0800);
        data.extend(ipv4(17, false, 0));
        data.extend(udp(2));
        data.extend(b"hi");

        let layers = run(&data);
        assert_eq!(
            layers,
            vec![
                Layer {
                    layer_type: LayerType::Link(LinkType::Ethernet),
                    offset: 0
                },
                Layer {
                    layer_type: LayerType::Ether(EtherType::IPv4),
                    offset: 14
                },
                Layer {
                    layer_type: LayerType::Protocol(ProtocolType::UDP),
                    offset: 34
                },
                Layer {
                    layer_type: LayerType::Payload(PayloadType::AppData),
                    offset: 42
                },
            ]
        );
    }

    #[test]
    fn scenario_ipv4_fragment_middle() {
        let mut data = ethernet(0x0800);
        data.extend(ipv4(6, true, 185));

        let layers = run(&data);
        assert_eq!(
            layers,
            vec![
                Layer {
                    layer_type: LayerType::Link(LinkType::Ethernet),
                    offset: 0
                },
                Layer {
                    layer_type: LayerType::Ether(EtherType::IPv4),
                    offset: 14
                },
                Layer {
                    layer_type: LayerType::Payload(PayloadType::IPFragment),
                    offset: 34
                },
            ]
        );
    }

    #[test]
    fn scenario_double_tag_vlan() {
        let mut data = ethernet(EtherType::VLAN_S_TAG);

        // Outer S-Tag at 14: TCI then inner ethertype (C-Tag).
        let mut outer_tag = vec![0u8; 4];
        BigEndian::write_u16(&mut outer_tag[2..4], EtherType::VLAN_TAG);
        data.extend(outer_tag);

        // Inner C-Tag at 18: TCI then inner ethertype (IPv6).
        let mut inner_tag = vec![0u8; 4];
        BigEndian::write_u16(&mut inner_tag[2..4], EtherType::IPV6);
        data.extend(inner_tag);

        data.extend(ipv6(6));
        data.extend(tcp());

        let layers = run(&data);
        assert_eq!(
            layers,
            vec![
                Layer {
                    layer_type: LayerType::Link(LinkType::Ethernet),
                    offset: 0
                },
                Layer {
                    layer_type: LayerType::Ether(EtherType::VLANSTag),
                    offset: 14
                },
                Layer {
                    layer_type: LayerType::Ether(EtherType::VLAN),
                    offset: 18
                },
                Layer {
                    layer_type: LayerType::Ether(EtherType::IPv6),
                    offset: 22
                },
                Layer {
                    layer_type: LayerType::Protocol(ProtocolType::TCP),
                    offset: 62
                },
                Layer {
                    layer_type: LayerType::Payload(PayloadType::AppData),
                    offset: 82
                },
            ]
        );
    }

    #[test]
    fn scenario_ip_in_ip_reports_outer_l3_with_no_l4() {
        let mut data = ethernet(0x0800);
        data.extend(ipv4(4, false, 0)); // outer: protocol 4 = IPv4-in-IP
        data.extend(ipv4(6, false, 0)); // inner: protocol 6 = TCP
        data.extend(tcp());

        let layers = run(&data);
        assert_eq!(layers.len(), 5);
        assert_eq!(layers[1].layer_type, LayerType::Ether(EtherType::IPv4));
        assert_eq!(layers[1].offset, 14);
        assert_eq!(layers[2].layer_type, LayerType::Protocol(ProtocolType::IPv4));
        assert_eq!(layers[3].layer_type, LayerType::Protocol(ProtocolType::TCP));

        let info = PacketInfo::extract(&layers).unwrap();
        assert_eq!(info.l3_offset, 14);
        assert_eq!(info.l4_offset, 0);
        assert_eq!(info.l4_type, L4Type::NotFound);
    }

    #[test]
    fn truncated_packet_is_malformed() {
        let data = ethernet(0x0800);
        assert!(dissect(
            RawPacket::new(0, &data),
            LayerType::Link(LinkType::Ethernet)
        )
        .is_err());
    }

    #[test]
    fn invalid_ipv4_version_is_malformed() {
        let mut data = ethernet(0x0800);
        let mut hdr = ipv4(17, false, 0);
        hdr[0] = 0x55; // version 5, not 4
        data.extend(hdr);
        assert!(dissect(
            RawPacket::new(0, &data),
            LayerType::Link(LinkType::Ethernet)
        )
        .is_err());
    }

    #[test]
    fn invalid_tcp_data_offset_is_malformed() {
        let mut data = ethernet(0x0800);
        data.extend(ipv4(6, false, 0));
        let mut hdr = tcp();
        hdr[12] = 0x40; // data offset 4, below the minimum of 5
        data.extend(hdr);
        assert!(dissect(
            RawPacket::new(0, &data),
            LayerType::Link(LinkType::Ethernet)
        )
        .is_err());
    }

    #[test]
    fn dissect_is_deterministic() {
        let mut data = ethernet(0x0800);
        data.extend(ipv4(17, false, 0));
        data.extend(udp(2));
        data.extend(b"hi");

        assert_eq!(run(&data), run(&data));
    }
}
