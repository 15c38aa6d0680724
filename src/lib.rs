//! # Innkeep API Library
//!
//! This library provides the core functionality for the Innkeep API
//! service: a multi-tenant property-management backend whose persistence
//! layer stamps and filters every row by tenant.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod server;
pub mod services;
pub mod tenant_context;
pub use migration;
