use crate::error::{CoreError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Fixed 8-byte UDP header view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UdpSlice<'a> {
    slice: &'a [u8],
}

impl<'a> UdpSlice<'a> {
    pub const HEADER_SIZE: usize = 8;
    pub const LENGTH_MIN_VALUE: u16 = 8;

    pub fn from_slice(slice: &'a [u8]) -> Result<UdpSlice<'a>> {
        if slice.len() < Self::HEADER_SIZE {
            return Err(CoreError::MalformedPacket(
                "unexpected end of packet".to_string(),
            ));
        }
        Ok(UdpSlice {
            slice: &slice[..Self::HEADER_SIZE],
        })
    }

    pub fn source_port(&self) -> u16 {
        BigEndian::read_u16(&self.slice[0..2])
    }

    pub fn destination_port(&self) -> u16 {
        BigEndian::read_u16(&self.slice[2..4])
    }

    pub fn length(&self) -> u16 {
        BigEndian::read_u16(&self.slice[4..6])
    }

    pub fn is_valid(&self) -> bool {
        self.length() >= Self::LENGTH_MIN_VALUE
    }
}
