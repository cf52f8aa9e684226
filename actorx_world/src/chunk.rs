use actorx_io::{ByteReader, ByteWriter};

use crate::DataType;

pub const CHUNK_ID_LEN: usize = 20;
/// id + type flag + data size + data count.
pub const CHUNK_HEADER_LEN: usize = CHUNK_ID_LEN + 12;

pub const WORLD_HEADER: &str = "WRLDHEAD";
pub const MESH_HEADER: &str = "ACTRHEAD";
pub const ANIMATION_HEADER: &str = "ANIMHEAD";

pub const ACTORS_CHUNK: &str = "WORLDACTORS";
pub const LIGHTS_CHUNK: &str = "WORLDLIGHTS";
pub const LANDSCAPE_CHUNK: &str = "LANDSCAPE";
pub const MATERIALS_CHUNK: &str = "INSTMATERIAL";

/// owner, rgb, kind, extent, then six f32 scalars.
pub const LIGHT_RECORD_SIZE: i32 = 4 + 12 + 4 + 12 + 6 * 4;

impl DataType {
    pub fn from_header_id(id: &str) -> Option<Self> {
        match id {
            WORLD_HEADER => Some(DataType::World),
            MESH_HEADER => Some(DataType::Mesh),
            ANIMATION_HEADER => Some(DataType::Animation),
            _ => None,
        }
    }

    pub fn header_id(self) -> &'static str {
        match self {
            DataType::World => WORLD_HEADER,
            DataType::Mesh => MESH_HEADER,
            DataType::Animation => ANIMATION_HEADER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: [u8; CHUNK_ID_LEN],
    pub type_flag: i32,
    /// Bytes per record, 0 for variable-length records.
    pub data_size: i32,
    pub data_count: i32,
}

impl ChunkHeader {
    /// Ids longer than [`CHUNK_ID_LEN`] are cut.
    pub fn new(id: &str, type_flag: i32, data_size: i32, data_count: i32) -> Self {
        let mut raw = [0u8; CHUNK_ID_LEN];
        let len = id.len().min(CHUNK_ID_LEN);
        raw[..len].copy_from_slice(&id.as_bytes()[..len]);
        Self {
            id: raw,
            type_flag,
            data_size,
            data_count,
        }
    }

    /// Id up to the first NUL. Non-ASCII ids come back empty and match nothing.
    pub fn id_str(&self) -> &str {
        let end = self
            .id
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(CHUNK_ID_LEN);
        std::str::from_utf8(&self.id[..end]).unwrap_or("")
    }

    pub fn read(r: &mut ByteReader<'_>) -> actorx_io::Result<Self> {
        // A short header fails at its first byte, not halfway through.
        r.peek_bytes(CHUNK_HEADER_LEN)?;
        Ok(Self {
            id: r.read_array::<CHUNK_ID_LEN>()?,
            type_flag: r.read_i32()?,
            data_size: r.read_i32()?,
            data_count: r.read_i32()?,
        })
    }

    pub fn write(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.id);
        w.write_i32(self.type_flag);
        w.write_i32(self.data_size);
        w.write_i32(self.data_count);
    }
}
