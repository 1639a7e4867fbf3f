//! Core types and rules for trainer-admin
//!
//! Domain types shared by the storage layer and the CLI: data categories,
//! user goal labels, completeness scoring and connection settings.

mod category;
pub mod constants;
mod env_config;
mod error;
mod score;
mod user_goal;

pub use category::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use score::*;
pub use user_goal::*;
