//! Core module - settings, enums, agent, queries

pub mod settings;
pub mod enums;
pub mod agent;
pub mod queries;

pub use settings::*;
pub use enums::*;
pub use agent::Agent;
pub use queries::Queries;
