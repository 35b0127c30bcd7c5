pub mod editing;
pub mod io;

// Re-export key types for easier usage
pub use editing::{block::*, bucket::*, document::*, position::*, transform::*};
pub use io::*;
