//! Request and Response models for the admin API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::{InvalidateRequest, Invalidation, SetRequest, MAX_KEY_LENGTH};
pub use responses::{
    ClearResponse, DeleteResponse, EntriesResponse, EntryInfo, ErrorResponse, GetResponse,
    HealthResponse, InvalidateResponse, SetResponse, StatsResponse,
};
