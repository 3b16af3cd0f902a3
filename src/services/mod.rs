// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod favorites_gateway;
pub mod favorites_view;
pub mod session;


pub use favorites_gateway::FavoritesGateway;

pub use favorites_view::{
    FavoritesView,
    HydrationReport,
    ToggleOutcome,
};

pub use session::SessionContext;
