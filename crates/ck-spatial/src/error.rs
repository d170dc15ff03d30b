//! Spatial-subsystem error type.

use thiserror::Error;

use ck_core::{MetaRoomId, Rect};

/// Errors produced by `ck-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("metaroom {0} not found")]
    MetaRoomNotFound(MetaRoomId),

    #[error("metaroom bounds {0:?} are empty")]
    EmptyMetaRoom(Rect),

    #[error("metaroom bounds {0:?} extend past the i32 coordinate range")]
    MetaRoomOutOfRange(Rect),

    /// No active metaroom and no fallback registered.  Nothing can be drawn
    /// or located; treated as fatal by the driver.
    #[error("no metarooms registered")]
    NoMetaRooms,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
