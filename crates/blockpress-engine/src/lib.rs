pub mod editing;
pub mod export;
pub mod io;

// Re-export key types for easier usage
pub use editing::{block::*, commands::*, document::*, patch::*, session::*};
pub use io::*;
