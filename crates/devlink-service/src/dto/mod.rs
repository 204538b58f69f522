//! Data transfer objects
//!
//! Request DTOs validate input at the API boundary; response DTOs shape the
//! JSON the client consumes. Mappers convert domain entities to responses.

pub mod mappers;
pub mod requests;
pub mod responses;
