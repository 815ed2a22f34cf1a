//! Core library for the `knowair` weather MCP server.
//!
//! This crate defines:
//! - Configuration & API token handling
//! - The upstream Caiyun API abstraction and its HTTP client
//! - Response models, classification tables and report formatting
//! - [`WeatherService`], one operation per exposed tool
//!
//! It is used by `knowair-mcp`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod service;
pub mod translate;

pub use config::{Config, DisplaySettings, Limits, TOKEN_ENV};
pub use error::WeatherError;
pub use model::{Coordinate, Lang};
pub use provider::{ApiRequest, CaiyunClient, Endpoint, WeatherApi};
pub use service::WeatherService;
