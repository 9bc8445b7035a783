//! Owns a replayable copy of a captured packet and optionally inserts a
//! single 802.1Q VLAN tag into it (C5). Grounded on `packetBuilder.cpp`'s
//! tag-insertion path in the replay tool.

use crate::error::Result;
use crate::packet_info::PacketInfo;

/// A heap-owned packet produced from a raw capture, with the outer-L3/L4
/// position it was dissected at (adjusted for any VLAN tag inserted here).
#[derive(Clone, Debug)]
pub struct Packet {
    pub timestamp: u64,
    pub data: Vec<u8>,
    pub info: PacketInfo,
}

const ETHERNET_HEADER_LEN: usize = 14;
const VLAN_TAG_LEN: usize = 4;
const VLAN_TPID: u16 = 0x8100;

impl Packet {
    /// Copies `data` verbatim, keeping `info` as-is.
    pub fn from_raw(timestamp: u64, data: &[u8], info: PacketInfo) -> Packet {
        Packet {
            timestamp,
            data: data.to_vec(),
            info,
        }
    }

    /// Copies `data`, inserting a 4-byte 802.1Q tag carrying `vlan_id`
    /// between the Ethernet header and the original L2 payload, and shifts
    /// `info`'s L3/L4 offsets to match.
    ///
    /// `vlan_id == 0` is treated as "no VLAN requested" and copies the
    /// packet unmodified, matching the original tool's "VLAN ID of zero
    /// disables tagging" convention.
    pub fn from_raw_with_vlan(
        timestamp: u64,
        data: &[u8],
        info: PacketInfo,
        vlan_id: u16,
    ) -> Result<Packet> {
        if vlan_id == 0 || data.len() < ETHERNET_HEADER_LEN {
            return Ok(Packet::from_raw(timestamp, data, info));
        }

        let mut out = Vec::with_capacity(data.len() + VLAN_TAG_LEN);
        out.extend_from_slice(&data[..ETHERNET_HEADER_LEN]);

        let original_ethertype = [data[12], data[13]];
        out.extend_from_slice(&vlan_id.to_be_bytes());
        out.extend_from_slice(&original_ethertype);
        out[12..14].copy_from_slice(&VLAN_TPID.to_be_bytes());

        out.extend_from_slice(&data[ETHERNET_HEADER_LEN..]);

        let mut info = info;
        info.l3_offset += VLAN_TAG_LEN as u16;
        if info.l4_offset != 0 {
            info.l4_offset += VLAN_TAG_LEN as u16;
        }

        Ok(Packet {
            timestamp,
            data: out,
            info,
        })
    }
}
