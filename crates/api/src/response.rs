//! Shared response envelope types for API handlers.
//!
//! All JSON API responses use a `{ "data": ... }` envelope. Saves add an
//! `outcome` field telling an in-place update apart from a fork.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "outcome": "created" | "updated" }` envelope for saves.
#[derive(Debug, Serialize)]
pub struct SaveResponse<T: Serialize> {
    pub data: T,
    pub outcome: &'static str,
}
