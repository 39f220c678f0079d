//! Domain primitives shared by the store, repository and HTTP layers.
//!
//! Nothing in here touches I/O: identifiers, validation, document rendering
//! and text transforms only.

pub mod completion;
pub mod error;
pub mod fragment;
pub mod ids;
pub mod render;
pub mod slug;
pub mod types;
