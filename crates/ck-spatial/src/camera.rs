//! The camera: which metaroom is being viewed and from where.

use ck_core::{MetaRoomId, Point};

use crate::{MetaRoom, MetaRoomMap, SpatialError, SpatialResult};

/// View position (the rendering offset) plus the active metaroom.
#[derive(Clone, Debug, Default)]
pub struct Camera {
    /// World coordinate shown at the top-left of the viewport.
    pub position: Point,
    metaroom:     Option<MetaRoomId>,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metaroom_id(&self) -> Option<MetaRoomId> {
        self.metaroom
    }

    /// The active metaroom, if it still exists.
    pub fn metaroom<'m>(&self, map: &'m MetaRoomMap) -> Option<&'m MetaRoom> {
        self.metaroom.and_then(|id| map.get(id))
    }

    /// Switch to `room` and move the view to its top-left corner.
    pub fn go_to_metaroom(&mut self, room: &MetaRoom) {
        self.metaroom = Some(room.id);
        self.position = room.bounds.origin();
    }

    /// Move the view; the active metaroom follows if `p` lies in another.
    pub fn move_to(&mut self, p: Point, map: &MetaRoomMap) {
        self.position = p;
        if let Some(room) = map.at(p) {
            self.metaroom = Some(room.id);
        }
    }

    /// The active metaroom, switching to the map's fallback if the active
    /// one vanished (or was never set).
    ///
    /// Returns [`SpatialError::NoMetaRooms`] if there is nothing to fall
    /// back to.
    pub fn resolve<'m>(&mut self, map: &'m MetaRoomMap) -> SpatialResult<&'m MetaRoom> {
        if let Some(room) = self.metaroom(map) {
            return Ok(room);
        }
        let room = map.fallback().ok_or(SpatialError::NoMetaRooms)?;
        self.go_to_metaroom(room);
        Ok(room)
    }

    /// Offset to add to world coordinates to get screen coordinates.
    #[inline]
    pub fn offset(&self) -> Point {
        Point::new(self.position.x.saturating_neg(), self.position.y.saturating_neg())
    }
}
