use crate::error::{CoreError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Fixed 4-byte MPLS label stack entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MplsSlice<'a> {
    slice: &'a [u8],
}

impl<'a> MplsSlice<'a> {
    pub const HEADER_SIZE: usize = 4;

    pub fn from_slice(slice: &'a [u8]) -> Result<MplsSlice<'a>> {
        if slice.len() < Self::HEADER_SIZE {
            return Err(CoreError::MalformedPacket(
                "unexpected end of packet".to_string(),
            ));
        }
        Ok(MplsSlice {
            slice: &slice[..Self::HEADER_SIZE],
        })
    }

    fn label_set(&self) -> u32 {
        BigEndian::read_u32(self.slice)
    }

    pub fn label(&self) -> u32 {
        self.label_set() >> 12
    }

    pub fn exp(&self) -> u8 {
        ((self.label_set() >> 9) & 0x7) as u8
    }

    /// Bottom-of-Stack flag: bit at position 8 from the LSB of the 32-bit
    /// label set.
    pub fn is_bos(&self) -> bool {
        (self.label_set() >> 8) & 0x1 == 1
    }

    pub fn ttl(&self) -> u8 {
        self.slice[3]
    }

    pub fn is_valid(&self) -> bool {
        true
    }
}
