use glam::{Quat, Vec2, Vec3};
use thiserror::Error;

/// Errors raised by [`ByteReader`]. Offsets are absolute byte positions in the buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} left")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("malformed string at offset {offset}: {reason}")]
    MalformedString { offset: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, ReadError>;

/// Forward-only little-endian cursor over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn truncated(&self, needed: usize) -> ReadError {
        ReadError::Truncated {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }

    /// Look at the next `n` bytes without consuming them.
    /// Only used to sniff a file header before committing to a format.
    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.truncated(n));
        }
        Ok(&self.data[self.pos..self.pos + n])
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(n)?;
        self.pos += n;
        Ok(bytes)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array::<2>()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array::<8>()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        // Check the whole run up front so a short aggregate fails at its start.
        self.peek_bytes(N * 4)?;
        let mut out = [0.0f32; N];
        for value in &mut out {
            *value = self.read_f32()?;
        }
        Ok(out)
    }

    pub fn read_vec2(&mut self) -> Result<Vec2> {
        Ok(Vec2::from_array(self.read_f32_array::<2>()?))
    }

    pub fn read_vec3(&mut self) -> Result<Vec3> {
        Ok(Vec3::from_array(self.read_f32_array::<3>()?))
    }

    /// Linear colour as three f32 channels.
    pub fn read_rgb(&mut self) -> Result<[f32; 3]> {
        self.read_f32_array::<3>()
    }

    /// Quaternion stored as x, y, z, w.
    pub fn read_quat(&mut self) -> Result<Quat> {
        Ok(Quat::from_array(self.read_f32_array::<4>()?))
    }

    /// i32 byte count followed by that many UTF-8 bytes.
    pub fn read_string(&mut self) -> Result<String> {
        let offset = self.pos;
        let len = self.read_i32()?;
        if len < 0 {
            self.pos = offset;
            return Err(ReadError::MalformedString {
                offset,
                reason: format!("negative length {len}"),
            });
        }

        let len = len as usize;
        if len > self.remaining() {
            let remaining = self.remaining();
            self.pos = offset;
            return Err(ReadError::MalformedString {
                offset,
                reason: format!("length {len} exceeds the {remaining} bytes left"),
            });
        }

        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|err| ReadError::MalformedString {
            offset,
            reason: format!("invalid UTF-8: {err}"),
        })
    }
}
