pub mod glob;

pub use glob::{MediaScanner, ScanError, ScanOutcome};
