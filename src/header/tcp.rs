use crate::error::{CoreError, Result};
use byteorder::{BigEndian, ByteOrder};

/// TCP header view, minimum 20 bytes (no options decoding).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TcpSlice<'a> {
    slice: &'a [u8],
}

impl<'a> TcpSlice<'a> {
    pub const HEADER_SIZE_MIN: usize = 20;
    pub const DATA_OFFSET_MIN: u8 = 5;
    pub const DATA_OFFSET_MAX: u8 = 15;

    pub fn from_slice(slice: &'a [u8]) -> Result<TcpSlice<'a>> {
        if slice.len() < Self::HEADER_SIZE_MIN {
            return Err(CoreError::MalformedPacket(
                "unexpected end of packet".to_string(),
            ));
        }
        Ok(TcpSlice {
            slice: &slice[..Self::HEADER_SIZE_MIN],
        })
    }

    pub fn source_port(&self) -> u16 {
        BigEndian::read_u16(&self.slice[0..2])
    }

    pub fn destination_port(&self) -> u16 {
        BigEndian::read_u16(&self.slice[2..4])
    }

    pub fn data_offset(&self) -> u8 {
        self.slice[12] >> 4
    }

    pub fn hdr_length(&self) -> usize {
        self.data_offset() as usize * 4
    }

    /// Data offset nibble must be in `[5,15]`.
    pub fn is_valid(&self) -> bool {
        (Self::DATA_OFFSET_MIN..=Self::DATA_OFFSET_MAX).contains(&self.data_offset())
    }
}
