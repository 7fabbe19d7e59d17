//! File-system collaborators of the engine: finding candidate sources,
//! copying the tree before mutation, and decoding/encoding file text.

pub mod backup;
pub mod encoding;
pub mod walker;

pub use backup::{backup_dir_name, backup_location, create_backup};
pub use encoding::{read_source, write_source, DecodedText};
pub use walker::{SourceFiles, SourceWalker};
