//! Metarooms — the rectangular viewable regions of the world.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a world point to the metaroom containing it.
//! Metarooms are few and rarely change, so the tree is updated in place on
//! add/remove rather than rebuilt.

use std::collections::BTreeMap;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ck_core::{MetaRoomId, Point, Rect};

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the room's rectangle in `i64` space (squared
/// distances overflow `i32` on large maps) plus its id.
#[derive(Clone, PartialEq, Debug)]
struct RoomEntry {
    id:   MetaRoomId,
    rect: Rect,
}

impl RTreeObject for RoomEntry {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.x as i64, self.rect.y as i64],
            [self.rect.right() - 1, self.rect.bottom() - 1],
        )
    }
}

impl PointDistance for RoomEntry {
    fn distance_2(&self, point: &[i64; 2]) -> i64 {
        use rstar::Envelope;
        self.envelope().distance_2(point)
    }

    fn contains_point(&self, point: &[i64; 2]) -> bool {
        point[0] >= self.rect.x as i64
            && point[0] < self.rect.right()
            && point[1] >= self.rect.y as i64
            && point[1] < self.rect.bottom()
    }
}

// ── MetaRoom ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaRoom {
    pub id:         MetaRoomId,
    /// World-space extent.
    pub bounds:     Rect,
    /// Name of the background image, resolved by the renderer.
    pub background: String,
}

impl MetaRoom {
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }
}

// ── MetaRoomMap ───────────────────────────────────────────────────────────────

/// Registry of metarooms with point lookup and a fallback choice.
#[derive(Default)]
pub struct MetaRoomMap {
    rooms:   BTreeMap<MetaRoomId, MetaRoom>,
    tree:    RTree<RoomEntry>,
    default: Option<MetaRoomId>,
    next_id: u32,
}

impl MetaRoomMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metaroom and return its id.
    pub fn add(&mut self, bounds: Rect, background: impl Into<String>) -> SpatialResult<MetaRoomId> {
        if bounds.is_empty() {
            return Err(SpatialError::EmptyMetaRoom(bounds));
        }
        if !bounds.fits_i32() {
            return Err(SpatialError::MetaRoomOutOfRange(bounds));
        }
        let id = MetaRoomId(self.next_id);
        self.next_id += 1;
        self.tree.insert(RoomEntry { id, rect: bounds });
        self.rooms.insert(id, MetaRoom { id, bounds, background: background.into() });
        Ok(id)
    }

    /// Remove a metaroom.  A camera still pointing at it will fall back on
    /// its next resolve.
    pub fn remove(&mut self, id: MetaRoomId) -> Option<MetaRoom> {
        let room = self.rooms.remove(&id)?;
        self.tree.remove(&RoomEntry { id, rect: room.bounds });
        if self.default == Some(id) {
            self.default = None;
        }
        Some(room)
    }

    pub fn get(&self, id: MetaRoomId) -> Option<&MetaRoom> {
        self.rooms.get(&id)
    }

    /// The metaroom containing `p`.  Overlaps resolve to the lowest id.
    pub fn at(&self, p: Point) -> Option<&MetaRoom> {
        self.tree
            .locate_all_at_point(&[p.x as i64, p.y as i64])
            .map(|e| e.id)
            .min()
            .and_then(|id| self.rooms.get(&id))
    }

    /// Prefer `id` whenever a fallback is needed.
    pub fn set_default(&mut self, id: MetaRoomId) -> SpatialResult<()> {
        if !self.rooms.contains_key(&id) {
            return Err(SpatialError::MetaRoomNotFound(id));
        }
        self.default = Some(id);
        Ok(())
    }

    /// The room to show when the active one is missing: the explicit
    /// default if set, else the lowest registered id.
    pub fn fallback(&self) -> Option<&MetaRoom> {
        self.default
            .and_then(|id| self.rooms.get(&id))
            .or_else(|| self.rooms.values().next())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetaRoom> + '_ {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
