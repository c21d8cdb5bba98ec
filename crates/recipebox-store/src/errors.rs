//! Error handling for recipebox-store
//!
//! Wraps recipebox-core ExError with store-specific helpers

use recipebox_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Operation name shared by every step of a recipe write
pub const UPSERT_OP: &str = "recipe_upsert";

/// Step of a recipe write that can fail on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    Begin,
    Prepare,
    Execute,
    ExtractId,
    Commit,
}

impl WritePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            WritePhase::Begin => "begin",
            WritePhase::Prepare => "prepare",
            WritePhase::Execute => "execute",
            WritePhase::ExtractId => "extract_id",
            WritePhase::Commit => "commit",
        }
    }

    /// Error kind reported when this phase fails
    pub fn kind(&self) -> ExErrorKind {
        match self {
            WritePhase::Begin | WritePhase::Commit => ExErrorKind::Transaction,
            WritePhase::Prepare | WritePhase::Execute => ExErrorKind::Statement,
            WritePhase::ExtractId => ExErrorKind::ResultUnavailable,
        }
    }

    /// `op` value carried by errors from this phase, e.g. `recipe_upsert.commit`
    pub fn op(&self) -> String {
        format!("{}.{}", UPSERT_OP, self.as_str())
    }
}

/// Wrap a SQLite failure with the write phase it happened in
pub fn phase_error(phase: WritePhase, description: &str, err: rusqlite::Error) -> ExError {
    ExError::new(phase.kind())
        .with_op(phase.op())
        .with_message(format!("{}: {}", description, err))
        .with_source(from_rusqlite(err))
}

/// Write-phase failure with no underlying SQLite error
pub fn phase_failure(phase: WritePhase, description: impl Into<String>) -> ExError {
    ExError::new(phase.kind())
        .with_op(phase.op())
        .with_message(description)
}

/// Create a setup error (fatal at startup)
pub fn setup_error(op: &str, description: &str, cause: ExError) -> ExError {
    ExError::new(ExErrorKind::Setup)
        .with_op(op.to_string())
        .with_message(format!("{}: {}", description, cause.message()))
        .with_source(cause)
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Setup)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Setup)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
