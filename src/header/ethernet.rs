use crate::error::{CoreError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Fixed 14-byte Ethernet II header view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EthernetSlice<'a> {
    slice: &'a [u8],
}

impl<'a> EthernetSlice<'a> {
    pub const HEADER_SIZE: usize = 14;

    pub fn from_slice(slice: &'a [u8]) -> Result<EthernetSlice<'a>> {
        if slice.len() < Self::HEADER_SIZE {
            return Err(CoreError::MalformedPacket(
                "unexpected end of packet".to_string(),
            ));
        }
        Ok(EthernetSlice {
            slice: &slice[..Self::HEADER_SIZE],
        })
    }

    pub fn destination(&self) -> &'a [u8] {
        &self.slice[..6]
    }

    pub fn source(&self) -> &'a [u8] {
        &self.slice[6..12]
    }

    pub fn ether_type(&self) -> u16 {
        BigEndian::read_u16(&self.slice[12..14])
    }

    /// No invariant beyond being present; kept for symmetry with the other
    /// header views.
    pub fn is_valid(&self) -> bool {
        true
    }
}
