//! Shared errors, configuration and auth primitives for the SentinelFi
//! document agent.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT claims, roles and token validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::{Claims, Role};
pub use config::{AppConfig, JwtSettings, PartitionerConfig, PartitionerKind};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
