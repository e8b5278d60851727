//! # Byte-Order Primitives
//!
//! Bounds-checked, big-endian cursor types used by every codec layer.
//!
//! - [`ByteReader`] walks a borrowed slice. A read that would run past the end
//!   fails with [`ProtocolError::TruncatedInput`] and leaves the cursor where it was.
//! - [`ByteWriter`] appends into a `BytesMut` with a fixed declared capacity. A
//!   write that would exceed it fails with [`ProtocolError::BufferOverflow`].
//!
//! The whole protocol is big-endian; there is no per-call byte order.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ProtocolError, Result};

/// Read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor offset from the start of the slice
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the slice
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unread tail of the slice, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn ensure(&self, width: usize) -> Result<()> {
        if self.remaining() < width {
            return Err(ProtocolError::TruncatedInput {
                expected: self.pos + width,
                actual: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let value = self.buf[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let value = (&self.buf[self.pos..]).get_u16();
        self.pos += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let value = (&self.buf[self.pos..]).get_u32();
        self.pos += 4;
        Ok(value)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        let value = (&self.buf[self.pos..]).get_u64();
        self.pos += 8;
        Ok(value)
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let span = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(span)
    }

    /// Copy the next `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }
}

/// Append-only writer with a hard capacity limit.
#[derive(Debug)]
pub struct ByteWriter {
    buf: BytesMut,
    capacity: usize,
}

impl ByteWriter {
    /// Create a writer that accepts at most `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Declared capacity, fixed at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    fn ensure(&self, width: usize) -> Result<()> {
        if self.remaining() < width {
            return Err(ProtocolError::BufferOverflow {
                needed: width,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.ensure(1)?;
        self.buf.put_u8(value);
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.ensure(2)?;
        self.buf.put_u16(value);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.ensure(4)?;
        self.buf.put_u32(value);
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.ensure(8)?;
        self.buf.put_u64(value);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure(bytes.len())?;
        self.buf.put_slice(bytes);
        Ok(())
    }

    pub fn into_inner(self) -> BytesMut {
        self.buf
    }

    /// Freeze the written bytes into an immutable, cheaply clonable buffer
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}
