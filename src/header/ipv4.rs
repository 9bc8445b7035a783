use crate::error::{CoreError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Fragment classification derived from the MF flag and fragment offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FragmentType {
    None,
    First,
    Middle,
    Last,
}

const FRAGMENT_MF_SHIFT: u16 = 13;
const FRAGMENT_DF_SHIFT: u16 = 14;
const FRAGMENT_OFFSET_MASK: u16 = 0x07FF;

/// IPv4 header view, minimum 20 bytes (no options decoding).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ipv4Slice<'a> {
    slice: &'a [u8],
}

impl<'a> Ipv4Slice<'a> {
    pub const HEADER_SIZE_MIN: usize = 20;
    pub const HEADER_SIZE_MAX: usize = 60;
    pub const IHL_MIN: u8 = 5;

    /// Only the minimum 20 bytes are sliced off here; the dissector advances
    /// by `hdr_length()` (which may include options) once this header is
    /// known valid.
    pub fn from_slice(slice: &'a [u8]) -> Result<Ipv4Slice<'a>> {
        if slice.len() < Self::HEADER_SIZE_MIN {
            return Err(CoreError::MalformedPacket(
                "unexpected end of packet".to_string(),
            ));
        }
        Ok(Ipv4Slice {
            slice: &slice[..Self::HEADER_SIZE_MIN],
        })
    }

    pub fn version(&self) -> u8 {
        self.slice[0] >> 4
    }

    pub fn ihl(&self) -> u8 {
        self.slice[0] & 0x0F
    }

    pub fn hdr_length(&self) -> usize {
        self.ihl() as usize * 4
    }

    pub fn total_length(&self) -> u16 {
        BigEndian::read_u16(&self.slice[2..4])
    }

    pub fn protocol(&self) -> u8 {
        self.slice[9]
    }

    pub fn source(&self) -> &'a [u8] {
        &self.slice[12..16]
    }

    pub fn destination(&self) -> &'a [u8] {
        &self.slice[16..20]
    }

    fn fragment_word(&self) -> u16 {
        BigEndian::read_u16(&self.slice[6..8])
    }

    pub fn dont_fragment(&self) -> bool {
        (self.fragment_word() >> FRAGMENT_DF_SHIFT) & 0x1 == 1
    }

    pub fn more_fragments(&self) -> bool {
        (self.fragment_word() >> FRAGMENT_MF_SHIFT) & 0x1 == 1
    }

    pub fn fragment_offset(&self) -> u16 {
        (self.fragment_word() & FRAGMENT_OFFSET_MASK) * 8
    }

    pub fn fragment_type(&self) -> FragmentType {
        let mf = self.more_fragments();
        let offset = self.fragment_offset();
        match (mf, offset) {
            (false, 0) => FragmentType::None,
            (true, 0) => FragmentType::First,
            (false, _) => FragmentType::Last,
            (true, _) => FragmentType::Middle,
        }
    }

    /// `version == 4 && ihl >= 5`.
    pub fn is_valid(&self) -> bool {
        self.version() == 4 && self.ihl() >= Self::IHL_MIN
    }
}
