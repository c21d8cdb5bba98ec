use recipebox_core_types::RequestId;
use thiserror::Error;

/// Result type alias using RecipeError
pub type Result<T> = std::result::Result<T, RecipeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log events, HTTP responses
/// and test assertions. The storage-facing kinds (`Setup`, `Transaction`,
/// `Statement`, `ResultUnavailable`) identify which step of a multi-step
/// write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,

    // Storage phases
    /// Data directory, database file or schema bootstrap failed (fatal at startup)
    Setup,
    /// A transaction could not be started or committed
    Transaction,
    /// A statement could not be prepared or executed
    Statement,
    /// The storage-assigned identifier could not be read back after an insert
    ResultUnavailable,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Setup => "ERR_SETUP",
            ExErrorKind::Transaction => "ERR_TRANSACTION",
            ExErrorKind::Statement => "ERR_STATEMENT",
            ExErrorKind::ResultUnavailable => "ERR_RESULT_UNAVAILABLE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`), the operation or phase that failed
/// (`op`), optional entity and request context, a human-readable message and
/// an optional underlying cause.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by recipe model operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeError {
    /// Ingredient list cannot be stored without losing information
    #[error("Ingredient at position {index} cannot be encoded: {reason}")]
    IngredientNotEncodable { index: usize, reason: String },

    /// Recipe not found in store
    #[error("Recipe not found: {recipe_id}")]
    RecipeNotFound { recipe_id: i64 },

    /// Recipe identifier is not a storage-assigned value
    #[error("Invalid recipe id: {reason}")]
    InvalidRecipeId { reason: String },
}

/// Conversion from RecipeError to ExError
impl From<RecipeError> for ExError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::IngredientNotEncodable { index, reason } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("encode_ingredients")
                    .with_message(format!(
                        "Ingredient at position {} cannot be encoded: {}",
                        index, reason
                    ))
            }

            RecipeError::RecipeNotFound { recipe_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(recipe_id.to_string())
                .with_message("Recipe not found"),

            RecipeError::InvalidRecipeId { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }
        }
    }
}
