//! Feedbackd Server - HTTP submission endpoint for the feedback pipeline
//!
//! This crate provides the HTTP surface in front of the feedbackd ingestion
//! pipeline. It supports:
//!
//! - **Submission**: Multipart feedback intake (text + optional screenshot)
//! - **Abuse controls**: Per-identity rate limiting and a honeypot trap,
//!   both enforced by the pipeline - the endpoint itself is anonymous
//! - **Health**: Liveness/readiness probes and server metadata
//! - **Middleware**: CORS, request ID tracking, structured logging, timeouts
//! - **Configuration**: Environment variable and file-based configuration
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metadata` - Server metadata
//! - `POST /api/v1/feedback` - Submit feedback (multipart)
//!
//! # Status Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 200 | Accepted (including silent honeypot no-ops) |
//! | 400 | Invalid input (`message required`, `invalid form data`) |
//! | 413 | Payload over the configured cap |
//! | 429 | Rate limited (`too many requests`) |
//! | 500 | Storage/internal failure (`failed to save`, `internal error`) |

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
