use crate::error::{CoreError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Fixed 40-byte IPv6 header view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ipv6Slice<'a> {
    slice: &'a [u8],
}

impl<'a> Ipv6Slice<'a> {
    pub const HEADER_SIZE: usize = 40;
    const VERSION_SHIFT: u32 = 28;
    const VERSION_MASK: u32 = 0x0F;

    pub fn from_slice(slice: &'a [u8]) -> Result<Ipv6Slice<'a>> {
        if slice.len() < Self::HEADER_SIZE {
            return Err(CoreError::MalformedPacket(
                "unexpected end of packet".to_string(),
            ));
        }
        Ok(Ipv6Slice {
            slice: &slice[..Self::HEADER_SIZE],
        })
    }

    fn version_traffic_flow(&self) -> u32 {
        BigEndian::read_u32(&self.slice[0..4])
    }

    pub fn version(&self) -> u8 {
        ((self.version_traffic_flow() >> Self::VERSION_SHIFT) & Self::VERSION_MASK) as u8
    }

    pub fn payload_length(&self) -> u16 {
        BigEndian::read_u16(&self.slice[4..6])
    }

    pub fn next_header(&self) -> u8 {
        self.slice[6]
    }

    pub fn hop_limit(&self) -> u8 {
        self.slice[7]
    }

    pub fn source(&self) -> &'a [u8] {
        &self.slice[8..24]
    }

    pub fn destination(&self) -> &'a [u8] {
        &self.slice[24..40]
    }

    pub fn is_valid(&self) -> bool {
        self.version() == 6
    }
}
