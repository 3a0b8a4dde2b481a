pub mod file_operations;

pub use file_operations::{
    clear_directory, copy_flat, ensure_directory, matches_extensions, CopyOutcome, SourceWalker,
};
