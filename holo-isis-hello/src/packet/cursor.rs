//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
// Sponsored by NLnet as part of the Next Generation Internet initiative.
// See: https://nlnet.nl/NGI0
//

use std::ops::Range;

use bytes::{Buf, Bytes};

use crate::packet::error::{DecodeError, DecodeResult};

// Bounds-checked reader over a window of a packet buffer.
//
// All offsets are absolute positions in the underlying buffer, so that the
// byte ranges of decoded fields can be reported relative to the start of the
// packet. A cursor never reads outside its window: narrowing it with
// `region()` is how CLV decoders are confined to their own value bytes.
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a Bytes,
    start: usize,
    end: usize,
}

// ===== impl ByteCursor =====

impl<'a> ByteCursor<'a> {
    // Creates a cursor covering the whole buffer.
    pub fn new(buf: &'a Bytes) -> Self {
        ByteCursor {
            buf,
            start: 0,
            end: buf.len(),
        }
    }

    // Returns the first offset readable through this cursor.
    pub const fn start(&self) -> usize {
        self.start
    }

    // Returns the offset one past the last byte readable through this cursor.
    pub const fn end(&self) -> usize {
        self.end
    }

    // Returns the size of the cursor window.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    // Returns how many bytes can be read starting at `offset`.
    pub const fn remaining(&self, offset: usize) -> usize {
        if offset < self.start {
            return 0;
        }
        self.end.saturating_sub(offset)
    }

    pub fn read_u8(&self, offset: usize) -> DecodeResult<u8> {
        let range = self.check(offset, 1)?;
        Ok(self.buf[range.start])
    }

    pub fn read_u16_be(&self, offset: usize) -> DecodeResult<u16> {
        let mut bytes = self.read_bytes(offset, 2)?;
        Ok(bytes.get_u16())
    }

    pub fn read_u32_be(&self, offset: usize) -> DecodeResult<u32> {
        let mut bytes = self.read_bytes(offset, 4)?;
        Ok(bytes.get_u32())
    }

    pub fn read_u128_be(&self, offset: usize) -> DecodeResult<u128> {
        let mut bytes = self.read_bytes(offset, 16)?;
        Ok(bytes.get_u128())
    }

    pub fn read_bytes(
        &self,
        offset: usize,
        len: usize,
    ) -> DecodeResult<&'a [u8]> {
        let range = self.check(offset, len)?;
        let bytes: &'a [u8] = self.buf.as_ref();
        Ok(&bytes[range])
    }

    // Returns a zero-copy view of the given bytes that shares the underlying
    // packet buffer.
    pub fn slice(&self, offset: usize, len: usize) -> DecodeResult<Bytes> {
        let range = self.check(offset, len)?;
        Ok(self.buf.slice(range))
    }

    // Returns a cursor restricted to `[offset, offset + len)`.
    pub fn region(&self, offset: usize, len: usize) -> DecodeResult<Self> {
        let range = self.check(offset, len)?;
        Ok(ByteCursor {
            buf: self.buf,
            start: range.start,
            end: range.end,
        })
    }

    // Validates that `[offset, offset + len)` lies within the cursor window.
    fn check(&self, offset: usize, len: usize) -> DecodeResult<Range<usize>> {
        let truncated = DecodeError::Truncated {
            offset,
            length: len,
        };
        if offset < self.start {
            return Err(truncated);
        }
        match offset.checked_add(len) {
            Some(end) if end <= self.end => Ok(offset..end),
            _ => Err(truncated),
        }
    }
}
