//! Infrastructure layer: I/O boundary traits and their real implementations

pub mod console;
pub mod traits;

pub use console::{StdinLines, StdoutSink};
pub use traits::{FileSystem, LineSource, RealFileSystem, TextSink};
