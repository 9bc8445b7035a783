use crate::error::{CoreError, Result};
use byteorder::{BigEndian, ByteOrder};

/// The trailing 4 bytes of an 802.1Q/802.1ad tag: a 2-byte TCI and the
/// 2-byte inner EtherType that follows it. The 2-byte TPID that precedes
/// this region is the previous layer's EtherType field, not part of this
/// view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VlanSlice<'a> {
    slice: &'a [u8],
}

impl<'a> VlanSlice<'a> {
    pub const HEADER_SIZE: usize = 4;

    pub fn from_slice(slice: &'a [u8]) -> Result<VlanSlice<'a>> {
        if slice.len() < Self::HEADER_SIZE {
            return Err(CoreError::MalformedPacket(
                "unexpected end of packet".to_string(),
            ));
        }
        Ok(VlanSlice {
            slice: &slice[..Self::HEADER_SIZE],
        })
    }

    pub fn tci(&self) -> u16 {
        BigEndian::read_u16(&self.slice[0..2])
    }

    pub fn vlan_id(&self) -> u16 {
        self.tci() & 0x0FFF
    }

    pub fn priority_code_point(&self) -> u8 {
        ((self.tci() >> 13) & 0x07) as u8
    }

    pub fn ether_type(&self) -> u16 {
        BigEndian::read_u16(&self.slice[2..4])
    }

    pub fn is_valid(&self) -> bool {
        true
    }
}
