//! Recipebox Engine - Orchestration layer
//!
//! Provides the command functions the web layer calls. Commands coordinate
//! the domain model and the store and own lifecycle logging.

pub mod commands;
