//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the engine, the store
//! and the web layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_RECIPE_ID: &str = "recipe_id";

// Collection sizes
pub const FIELD_RECIPE_COUNT: &str = "recipe_count";
pub const FIELD_INGREDIENT_COUNT: &str = "ingredient_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
