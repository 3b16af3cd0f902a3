// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Provides the boundary between views and services
// - Translates between DTOs and domain entities
// - Maps errors to user-facing responses

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{CommandResult, ErrorResponse, ErrorType};
pub use state::AppState;
