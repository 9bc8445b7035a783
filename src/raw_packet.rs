/// A borrowed capture frame. The dissector never retains a reference beyond
/// a single `dissect` call.
#[derive(Clone, Copy, Debug)]
pub struct RawPacket<'a> {
    pub timestamp: u64,
    pub data: &'a [u8],
}

impl<'a> RawPacket<'a> {
    pub fn new(timestamp: u64, data: &'a [u8]) -> RawPacket<'a> {
        RawPacket { timestamp, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
