//! API Module
//!
//! Admin HTTP surface over a shared JSON value cache.
//!
//! # Endpoints
//! - `PUT /set` - Store a JSON value under a key
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `POST /invalidate` - Remove keys by pattern or prefix
//! - `POST /clear` - Drop everything and reset counters
//! - `GET /stats` - Cache statistics
//! - `GET /entries` - Entry metadata
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
