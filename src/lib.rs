/// RAMBO - Rename All Media By Order
///
/// This crate renames media files after their creation date so that
/// filenames sort chronologically. Focus areas:
/// - Metadata-based datetime extraction (EXIF and video track data)
/// - Collision-safe rename planning with a mandatory dry run
/// - Undo journal for rolling back the last applied run
/// - Deterministic processing order
///
/// Main modules:
/// - cli: Command-line interface parsing and execution
/// - commands: Implementation of the rename, undo and setup commands
/// - config: Configuration file handling (rambo.toml)
/// - extract: Creation-datetime extraction from media metadata
/// - plan: Rename planning, application and the undo journal
/// - result: Error handling and result types
/// - scan: Glob evaluation and file discovery
/// - stats: Per-run counters and the summary block
/// - utils: Common utilities and helper functions
pub mod cli;
pub mod commands;
pub mod config;
pub mod extract;
pub mod plan;
pub mod result;
pub mod scan;
pub mod stats;
pub mod utils;
