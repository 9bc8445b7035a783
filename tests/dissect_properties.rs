//! Property-based tests for the dissector's invariants (spec §8): strictly
//! increasing layer offsets, truncation producing `MalformedPacket`, and
//! determinism across repeated calls on the same input. Structured the way
//! the teacher crate's own `tests/` directory exercises its header parsers:
//! a handful of targeted unit cases plus `proptest!` blocks over randomly
//! generated wire bytes.

use assert_matches::assert_matches;
use byteorder::{BigEndian, ByteOrder};
use proptest::prelude::*;

use packetforge::dissect::dissect;
use packetforge::error::CoreError;
use packetforge::layer::{LayerType, LinkType};
use packetforge::raw_packet::RawPacket;

fn ethernet_ipv4_udp_frame(udp_payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0u8; 14];
    BigEndian::write_u16(&mut frame[12..14], 0x0800);

    let mut ipv4 = vec![0u8; 20];
    ipv4[0] = 0x45;
    ipv4[9] = 17; // UDP
    frame.extend(ipv4);

    let mut udp = vec![0u8; 8];
    BigEndian::write_u16(&mut udp[4..6], (8 + udp_payload.len()) as u16);
    frame.extend(udp);
    frame.extend_from_slice(udp_payload);

    frame
}

proptest! {
    /// Layer offsets returned by a successful dissection are always
    /// strictly increasing, for any UDP payload length.
    #[test]
    fn layers_strictly_increasing(payload_len in 0usize..256) {
        let payload = vec![0xABu8; payload_len];
        let frame = ethernet_ipv4_udp_frame(&payload);
        let layers = dissect(
            RawPacket::new(0, &frame),
            LayerType::Link(LinkType::Ethernet),
        ).unwrap();

        for pair in layers.windows(2) {
            prop_assert!(pair[0].offset < pair[1].offset);
        }
    }

    /// Truncating an accepted packet to any length short of its final
    /// layer's offset always yields `MalformedPacket`, never a panic or a
    /// different error kind.
    #[test]
    fn truncation_is_always_malformed(payload_len in 1usize..64, cut_at in 0usize..42) {
        let payload = vec![0x11u8; payload_len];
        let frame = ethernet_ipv4_udp_frame(&payload);
        let cut = cut_at.min(frame.len().saturating_sub(1));
        let truncated = &frame[..cut];

        let result = dissect(
            RawPacket::new(0, truncated),
            LayerType::Link(LinkType::Ethernet),
        );
        prop_assert!(result.is_err());
        assert_matches!(result.unwrap_err(), CoreError::MalformedPacket(_));
    }

    /// Dissecting the same bytes twice always produces the same layer list.
    #[test]
    fn dissect_is_deterministic(payload_len in 0usize..256) {
        let payload = vec![0x42u8; payload_len];
        let frame = ethernet_ipv4_udp_frame(&payload);

        let first = dissect(
            RawPacket::new(0, &frame),
            LayerType::Link(LinkType::Ethernet),
        ).unwrap();
        let second = dissect(
            RawPacket::new(0, &frame),
            LayerType::Link(LinkType::Ethernet),
        ).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn invalid_ipv4_version_nibble_is_malformed() {
    let mut frame = vec![0u8; 14];
    BigEndian::write_u16(&mut frame[12..14], 0x0800);
    let mut ipv4 = vec![0u8; 20];
    ipv4[0] = 0x55; // version 5
    frame.extend(ipv4);

    let result = dissect(
        RawPacket::new(0, &frame),
        LayerType::Link(LinkType::Ethernet),
    );
    match result {
        Err(CoreError::MalformedPacket(m)) => assert!(m.contains("invalid IPv4 header")),
        other => panic!("expected MalformedPacket(\"invalid IPv4 header\"), got {:?}", other),
    }
}

#[test]
fn invalid_tcp_data_offset_is_malformed() {
    let mut frame = vec![0u8; 14];
    BigEndian::write_u16(&mut frame[12..14], 0x0800);
    let mut ipv4 = vec![0u8; 20];
    ipv4[0] = 0x45;
    ipv4[9] = 6; // TCP
    frame.extend(ipv4);
    let mut tcp = vec![0u8; 20];
    tcp[12] = 0x20; // data offset 2, below the minimum of 5
    frame.extend(tcp);

    let result = dissect(
        RawPacket::new(0, &frame),
        LayerType::Link(LinkType::Ethernet),
    );
    match result {
        Err(CoreError::MalformedPacket(m)) => assert!(m.contains("invalid TCP header")),
        other => panic!("expected MalformedPacket(\"invalid TCP header\"), got {:?}", other),
    }
}
