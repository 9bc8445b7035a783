//! Append-only, length-stack-aware byte buffer (C6).
//!
//! Mirrors the append/push-length/pop-length idiom of the original
//! `generator::Buffer`/`TlsBuffer` pair, but collapses the inheritance into a
//! single type: the base buffer never needed to exist on its own.

use crate::error::{CoreError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Width of a back-patched length placeholder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Width {
    One,
    Two,
    Three,
}

impl Width {
    fn bytes(self) -> usize {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Three => 3,
        }
    }
}

struct LengthPlaceholder {
    offset: usize,
    width: Width,
}

/// An append-only buffer with big-endian primitives and a stack of
/// back-patched length placeholders.
#[derive(Default)]
pub struct TlsBuffer {
    data: Vec<u8>,
    length_stack: Vec<LengthPlaceholder>,
}

impl TlsBuffer {
    pub fn new() -> TlsBuffer {
        TlsBuffer {
            data: Vec::new(),
            length_stack: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn append_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn append_be16(&mut self, value: u16) {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, value);
        self.data.extend_from_slice(&buf);
    }

    pub fn append_be24(&mut self, value: u32) {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, value);
        // High-to-low, dropping the top byte of the u32 representation.
        self.data.extend_from_slice(&buf[1..4]);
    }

    pub fn append_be32(&mut self, value: u32) {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, value);
        self.data.extend_from_slice(&buf);
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn append_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Push a zero-filled placeholder of `width` bytes, remembering its
    /// offset so a matching `pop_length` can back-patch it.
    pub fn push_length(&mut self, width: Width) {
        self.length_stack.push(LengthPlaceholder {
            offset: self.data.len(),
            width,
        });
        for _ in 0..width.bytes() {
            self.data.push(0);
        }
    }

    /// Pop the most recent placeholder and write the number of bytes
    /// appended since its `push_length` call into it, big-endian.
    pub fn pop_length(&mut self, width: Width) -> Result<()> {
        let placeholder = self
            .length_stack
            .pop()
            .ok_or_else(|| CoreError::LogicError("pop_length on an empty stack".to_string()))?;
        if placeholder.width != width {
            return Err(CoreError::LogicError(
                "pop_length width does not match the matching push_length".to_string(),
            ));
        }
        let w = width.bytes();
        let value = self.data.len() - placeholder.offset - w;
        let max = (1u64 << (w * 8)) - 1;
        if value as u64 > max {
            return Err(CoreError::LogicError(format!(
                "length region {} does not fit in {} bytes",
                value, w
            )));
        }
        self.write_at(placeholder.offset, width, value as u32)
    }

    /// Bounds-checked overwrite of `width` big-endian bytes at `offset`.
    pub fn write_at(&mut self, offset: usize, width: Width, value: u32) -> Result<()> {
        let w = width.bytes();
        if offset + w > self.data.len() {
            return Err(CoreError::LogicError(
                "write_at out of buffer bounds".to_string(),
            ));
        }
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, value);
        self.data[offset..offset + w].copy_from_slice(&buf[4 - w..4]);
        Ok(())
    }

    /// Fails if the length stack is not empty: every `push_length` must have
    /// a matching `pop_length` before the buffer is handed off.
    pub fn finish(self) -> Result<Vec<u8>> {
        if !self.length_stack.is_empty() {
            return Err(CoreError::LogicError(
                "length stack not empty at finalisation".to_string(),
            ));
        }
        Ok(self.data)
    }

    /// Concatenate several buffers' bytes, in order.
    pub fn concat(buffers: impl IntoIterator<Item = Vec<u8>>) -> Vec<u8> {
        let mut out = Vec::new();
        for b in buffers {
            out.extend_from_slice(&b);
        }
        out
    }

    /// Split a flat byte sequence into chunks no larger than `max_len`.
    pub fn split(bytes: &[u8], max_len: usize) -> Vec<Vec<u8>> {
        assert!(max_len > 0);
        bytes.chunks(max_len).map(|c| c.to_vec()).collect()
    }
}
