use std::borrow::Cow;
use thiserror::Error;

/** Main Result type alias for RAMBO operations
 *
 * # Usage
 * ```no_run
 * use rambo::result::Result;
 *
 * async fn read_config() -> Result<String> {
 *     // Function automatically propagates RamboError
 *     let content = std::fs::read_to_string("rambo.toml")?;
 *     Ok(content)
 * }
 * ```
 */
pub type Result<T> = std::result::Result<T, RamboError>;

/** Comprehensive error enumeration for the RAMBO application
 *
 * # Error Categories
 * - **Io**: File system and I/O operations
 * - **Pattern**: Glob pattern interpretation and evaluation failures
 * - **Extract**: Creation-datetime extraction failures
 * - **Rename**: Rename planning and application failures
 * - **Config**: Configuration parsing and validation errors
 * - **NotFound**: Resource missing errors
 * - **TomlParse**: TOML parsing failures (config, undo journal)
 * - **TomlSerialize**: TOML serialization errors
 *
 * # Design Notes
 * - Uses `Cow<'static, str>` for efficient string storage
 * - Automatic From implementations for common error types
 * - Rich error messages with context information
 */
#[derive(Error, Debug)]
pub enum RamboError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pattern error: {0}")]
    Pattern(Cow<'static, str>),

    #[error("Extract error: {0}")]
    Extract(Cow<'static, str>),

    #[error("Rename error: {0}")]
    Rename(Cow<'static, str>),

    #[error("Config error: {0}")]
    Config(Cow<'static, str>),

    #[error("Not found: {0}")]
    NotFound(Cow<'static, str>),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/** Error constants and constructor methods
 *
 * # Purpose
 * - Provides commonly used error messages as constants
 * - Offers convenient constructor methods for each error variant
 * - Ensures consistent error messaging across the codebase
 *
 * # Usage Examples
 * ```ignore
 * use rambo::result::RamboError;
 *
 * // Using constant error messages
 * return Err(RamboError::extract(RamboError::NO_METADATA));
 *
 * // Using constructor methods
 * return Err(RamboError::config("Invalid rename format"));
 *
 * // Using dynamic messages
 * return Err(RamboError::not_found(format!("File {} not found", filename)));
 * ```
 */
impl RamboError {
    // Extraction-related error constants
    pub const NO_METADATA: &'static str = "The media source has no EXIF or track data";
    pub const NO_CREATION_DATETIME: &'static str = "Could not get the creation datetime";

    // Undo-related error constants
    pub const NOTHING_TO_UNDO: &'static str = "No undo journal found, nothing to undo";

    // Configuration-related error constants
    pub const INVALID_CONFIG: &'static str = "Invalid configuration format";

    /** Creates a Pattern error with flexible message input
     *
     * # Arguments
     * * `msg` - Message implementing Into<Cow<'static, str>>
     *
     * # Supported Input Types
     * - `&'static str` for static strings (no allocation)
     * - `String` for dynamic strings
     * - Any type implementing `Into<Cow<'static, str>>`
     */
    pub fn pattern(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Pattern(msg.into())
    }

    /** Creates an Extract error with flexible message input
     *
     * # Use Cases
     * - Media files without EXIF or track metadata
     * - Metadata without any creation-datetime tag
     * - Parser failures on corrupted media content
     */
    pub fn extract(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Extract(msg.into())
    }

    /** Creates a Rename error with flexible message input
     *
     * # Use Cases
     * - Collision aborts under the `fail` strategy
     * - Runs that finished with per-file failures
     * - Undo verification failures
     */
    pub fn rename(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Rename(msg.into())
    }

    /** Creates a Config error with flexible message input
     *
     * # Use Cases
     * - Invalid configuration formats
     * - Missing required configuration fields
     * - Configuration validation failures
     * - File permission issues
     */
    pub fn config(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Config(msg.into())
    }

    /** Creates a NotFound error with flexible message input
     *
     * # Use Cases
     * - Missing files or directories
     * - Missing undo journal
     * - Configuration files not found
     */
    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }
}

/*
 * Error Handling Best Practices:
 *
 * 1. When to use each error variant:
 *    - Io: File operations, system calls
 *    - Pattern: Glob pattern interpretation and evaluation
 *    - Extract: Metadata parsing and datetime extraction
 *    - Rename: Plan construction and application, undo verification
 *    - Config: Configuration loading, parsing, validation
 *    - NotFound: Missing files, journals, configuration
 *    - TomlParse/Serialize: TOML-specific codec issues
 *
 * 2. Performance Considerations:
 *    - Cow<'static, str> avoids allocation for static strings
 *    - Constructor methods provide zero-cost abstraction for literals
 *    - Automatic From conversions reduce boilerplate
 *
 * 3. Maintenance Guidelines:
 *    - Add new variants for distinct error categories
 *    - Use constants for commonly repeated error messages
 *    - Prefer specific error variants over generic ones
 *    - Provide context in error messages for better debugging
 */
