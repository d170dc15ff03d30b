//! `ck-spatial` — where things are and what is on top.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`zorder`]   | `ZOrderIndex` (front-to-back part order), `HitQuery`, `PartRef` |
//! | [`metaroom`] | `MetaRoom`, `MetaRoomMap` (R-tree point lookup + fallback)   |
//! | [`camera`]   | `Camera` — view offset and the active metaroom               |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                           |

pub mod camera;
pub mod error;
pub mod metaroom;
pub mod zorder;

#[cfg(test)]
mod tests;

pub use camera::Camera;
pub use error::{SpatialError, SpatialResult};
pub use metaroom::{MetaRoom, MetaRoomMap};
pub use zorder::{HitQuery, PartRef, ZOrderIndex};
