pub mod chunk;
pub mod error;
pub mod parser;
pub mod world;
pub mod writer;

pub use chunk::{ChunkHeader, CHUNK_HEADER_LEN};
pub use error::*;
pub use parser::*;
pub use world::*;
pub use writer::*;
