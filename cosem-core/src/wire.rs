//! Variable-length count encoding used by APDU framing
//!
//! Lengths up to 127 are a single byte. Larger lengths use a
//! length-of-length prefix: `0x81` + 1 byte, `0x82` + 2 bytes or
//! `0x84` + 4 bytes, all big-endian.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{CosemError, CosemResult};

/// Append a variable-length count field
pub fn put_length(buf: &mut BytesMut, len: usize) {
    if len < 0x80 {
        buf.put_u8(len as u8);
    } else if len <= 0xFF {
        buf.put_u8(0x81);
        buf.put_u8(len as u8);
    } else if len <= 0xFFFF {
        buf.put_u8(0x82);
        buf.put_u16(len as u16);
    } else {
        buf.put_u8(0x84);
        buf.put_u32(len as u32);
    }
}

/// Read a variable-length count field, advancing the slice past it
pub fn get_length(buf: &mut &[u8]) -> CosemResult<usize> {
    if !buf.has_remaining() {
        return Err(CosemError::BufferTooShort { needed: 1, actual: 0 });
    }
    let first = buf.get_u8();
    if first < 0x80 {
        return Ok(first as usize);
    }
    let width = match first {
        0x81 => 1,
        0x82 => 2,
        0x84 => 4,
        _ => return Err(CosemError::InvalidLengthEncoding(first)),
    };
    if buf.remaining() < width {
        return Err(CosemError::BufferTooShort {
            needed: width,
            actual: buf.remaining(),
        });
    }
    let mut len = 0usize;
    for _ in 0..width {
        len = (len << 8) | buf.get_u8() as usize;
    }
    Ok(len)
}
