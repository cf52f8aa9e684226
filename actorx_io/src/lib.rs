pub mod reader;
pub mod resolve;
pub mod root;
pub mod writer;

pub use reader::*;
pub use resolve::*;
pub use root::*;
pub use writer::*;
