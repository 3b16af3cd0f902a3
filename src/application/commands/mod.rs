// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between views and services
// - Commands accept DTOs, return DTOs
// - Commands convert errors into ErrorResponse
// - Commands NEVER contain business logic

pub mod catalog_commands;
pub mod favorite_commands;

#[cfg(test)]
mod commands_tests;

pub use catalog_commands::*;
pub use favorite_commands::*;
