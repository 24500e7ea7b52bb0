pub mod config;
pub mod error;
pub mod fingerprint;
pub mod probe;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod target;
pub mod verify;

// Re-export main types for easier access
pub use config::ScanConfig;
pub use error::{FetchError, ScanError};
pub use report::{ScanReport, TargetOutcome, TargetReport};
pub use scanner::Scanner;
pub use target::{Scheme, Target};
pub use verify::{ExposureFinding, GitArtifact};
