//! Unit tests for ck-spatial.
//!
//! All tests build agents by hand; no assets are involved.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use ck_agent::{AgentBuilder, AgentTable, AlphaMask, Classifier};
    use ck_core::{AgentRef, PartId};

    use crate::{PartRef, ZOrderIndex};

    /// Register every part of `agent` at its own rank.
    pub fn register(index: &mut ZOrderIndex, table: &AgentTable, agent: AgentRef) {
        let state = table.get(agent).unwrap();
        for part in state.parts.iter() {
            index.insert(PartRef::new(agent, part.id), state.part_zorder(part.z_offset));
        }
    }

    /// A 10x10 mouseable square at `(x, y)` with rank `z`.
    pub fn square(table: &mut AgentTable, index: &mut ZOrderIndex, x: i32, y: i32, z: i32) -> AgentRef {
        let state = AgentBuilder::new(Classifier::new(2, 1, 1))
            .position(x, y)
            .size(10, 10)
            .zorder(z)
            .mouseable(true)
            .build()
            .unwrap();
        let agent = table.insert(state);
        register(index, table, agent);
        agent
    }

    /// Like [`square`] but the root sprite is see-through on its left half.
    pub fn half_clear_square(
        table: &mut AgentTable,
        index: &mut ZOrderIndex,
        x: i32,
        y: i32,
        z: i32,
    ) -> AgentRef {
        let mask = Arc::new(AlphaMask::from_fn(10, 10, |px, _| px >= 5));
        let state = AgentBuilder::new(Classifier::new(2, 1, 2))
            .position(x, y)
            .size(10, 10)
            .zorder(z)
            .mouseable(true)
            .root_mask(mask)
            .build()
            .unwrap();
        let agent = table.insert(state);
        register(index, table, agent);
        agent
    }

    pub fn root(agent: AgentRef) -> PartRef {
        PartRef::new(agent, PartId::ROOT)
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod order_tests {
    use ck_agent::AgentTable;

    use super::helpers::*;
    use crate::ZOrderIndex;

    #[test]
    fn iterates_front_to_back() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let back = square(&mut table, &mut index, 0, 0, 1);
        let front = square(&mut table, &mut index, 0, 0, 3);
        let middle = square(&mut table, &mut index, 0, 0, 2);

        let order: Vec<_> = index.iter_front_to_back().map(|(_, p)| p.agent).collect();
        assert_eq!(order, vec![front, middle, back]);

        let painter: Vec<_> = index.iter_back_to_front().map(|(z, _)| z).collect();
        assert_eq!(painter, vec![1, 2, 3]);
    }

    #[test]
    fn equal_ranks_keep_registration_order() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let first = square(&mut table, &mut index, 0, 0, 5);
        let second = square(&mut table, &mut index, 0, 0, 5);
        let order: Vec<_> = index.iter_front_to_back().map(|(_, p)| p.agent).collect();
        assert_eq!(order, vec![first, second]);
    }

    #[test]
    fn rerank_moves_entry() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let a = square(&mut table, &mut index, 0, 0, 1);
        let b = square(&mut table, &mut index, 0, 0, 2);
        assert!(index.set_rank(root(a), 10));
        assert_eq!(index.rank_of(root(a)), Some(10));
        let order: Vec<_> = index.iter_front_to_back().map(|(_, p)| p.agent).collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn remove_agent_drops_all_parts() {
        use ck_agent::{AgentBuilder, Classifier, Part};
        use ck_core::{PartId, Point};

        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let state = AgentBuilder::new(Classifier::default())
            .size(10, 10)
            .subpart(Part::new(PartId(1), Point::new(0, 0), 2, 2))
            .subpart(Part::new(PartId(2), Point::new(2, 2), 2, 2))
            .build()
            .unwrap();
        let agent = table.insert(state);
        register(&mut index, &table, agent);
        assert_eq!(index.parts_of(agent).len(), 3);

        assert_eq!(index.remove_agent(agent), 3);
        assert!(index.is_empty());
        assert!(!index.contains_agent(agent));
        assert_eq!(index.remove_agent(agent), 0);
    }
}

// ── Hit-testing ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod hit_tests {
    use ck_agent::AgentTable;

    use super::helpers::*;
    use crate::{HitQuery, ZOrderIndex};

    #[test]
    fn front_most_wins() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        square(&mut table, &mut index, 0, 0, 1);
        square(&mut table, &mut index, 0, 0, 2);
        let front = square(&mut table, &mut index, 0, 0, 3);

        let hit = index.agent_at(&table, &HitQuery::at(2, 2));
        assert_eq!(hit, Some(front));
    }

    #[test]
    fn extreme_coordinates_miss_instead_of_overflowing() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        square(&mut table, &mut index, -10, 0, 1);
        square(&mut table, &mut index, 10, 10, 2);

        assert_eq!(index.part_at(&table, &HitQuery::at(i32::MAX, 0)), None);
        assert_eq!(index.part_at(&table, &HitQuery::at(i32::MIN, 0)), None);
        assert_eq!(index.part_at(&table, &HitQuery::at(0, i32::MIN)), None);
        assert_eq!(index.part_at(&table, &HitQuery::at(i32::MIN, i32::MAX)), None);
    }

    #[test]
    fn agent_at_the_edge_of_the_world_is_hittable() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let edge = square(&mut table, &mut index, i32::MAX - 9, i32::MAX - 9, 1);
        assert_eq!(index.agent_at(&table, &HitQuery::at(i32::MAX, i32::MAX)), Some(edge));
        assert_eq!(index.agent_at(&table, &HitQuery::at(i32::MIN, i32::MIN)), None);
    }

    #[test]
    fn transparent_front_falls_through_when_obeyed() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        square(&mut table, &mut index, 0, 0, 1);
        let middle = square(&mut table, &mut index, 0, 0, 2);
        let front = half_clear_square(&mut table, &mut index, 0, 0, 3);

        // (2, 2) is on the see-through half of the front sprite.
        let q = HitQuery::at(2, 2).obey_all_transparency(true);
        assert_eq!(index.agent_at(&table, &q), Some(middle));

        // (7, 2) is on its opaque half.
        let q = HitQuery::at(7, 2).obey_all_transparency(true);
        assert_eq!(index.agent_at(&table, &q), Some(front));
    }

    #[test]
    fn root_parts_always_honour_transparency() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let back = square(&mut table, &mut index, 0, 0, 1);
        half_clear_square(&mut table, &mut index, 0, 0, 3);
        // obey_all_transparency is off, but the front part is a root part.
        assert_eq!(index.agent_at(&table, &HitQuery::at(2, 2)), Some(back));
    }

    #[test]
    fn subpart_transparency_only_when_obeyed() {
        use std::sync::Arc;

        use ck_agent::{AgentBuilder, AlphaMask, Classifier, Part};
        use ck_core::{PartId, Point};

        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let clear = Arc::new(AlphaMask::from_fn(4, 4, |_, _| false));
        let state = AgentBuilder::new(Classifier::default())
            .size(20, 20)
            .zorder(5)
            .subpart(Part::new(PartId(1), Point::new(8, 8), 4, 4).with_z_offset(1).with_mask(clear))
            .build()
            .unwrap();
        let agent = table.insert(state);
        register(&mut index, &table, agent);

        let plain = index.part_at(&table, &HitQuery::at(9, 9)).unwrap();
        assert_eq!(plain.part, PartId(1));

        let obeyed = index
            .part_at(&table, &HitQuery::at(9, 9).obey_all_transparency(true))
            .unwrap();
        assert_eq!(obeyed.part, PartId::ROOT, "falls through to the root part");
    }

    #[test]
    fn position_is_relative_to_owner() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let a = square(&mut table, &mut index, 100, 50, 1);
        assert_eq!(index.agent_at(&table, &HitQuery::at(105, 55)), Some(a));
        assert_eq!(index.agent_at(&table, &HitQuery::at(5, 5)), None);
        assert_eq!(index.agent_at(&table, &HitQuery::at(110, 55)), None, "right edge is exclusive");

        table.get_mut(a).unwrap().position = ck_core::Point::new(0, 0);
        assert_eq!(index.agent_at(&table, &HitQuery::at(5, 5)), Some(a));
    }

    #[test]
    fn pointer_never_hits_itself() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let under = square(&mut table, &mut index, 0, 0, 1);
        let pointer = square(&mut table, &mut index, 0, 0, 100);
        let q = HitQuery::at(1, 1).excluding(Some(pointer));
        assert_eq!(index.agent_at(&table, &q), Some(under));
    }

    #[test]
    fn needs_mouseable_skips_unmouseable_owner() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let back = square(&mut table, &mut index, 0, 0, 1);
        let front = square(&mut table, &mut index, 0, 0, 2);
        table.get_mut(front).unwrap().mouseable = false;

        assert_eq!(index.agent_at(&table, &HitQuery::at(1, 1)), Some(front));
        let q = HitQuery::at(1, 1).needs_mouseable(true);
        assert_eq!(index.agent_at(&table, &q), Some(back));
    }

    #[test]
    fn dying_owner_is_ineligible_before_drain() {
        let mut table = AgentTable::new();
        let mut index = ZOrderIndex::new();
        let back = square(&mut table, &mut index, 0, 0, 1);
        let front = square(&mut table, &mut index, 0, 0, 2);
        table.mark_dying(front);
        // Entry is still indexed until the kill drain, but never returned.
        assert!(index.contains_agent(front));
        assert_eq!(index.agent_at(&table, &HitQuery::at(1, 1)), Some(back));
    }

    #[test]
    fn miss_is_none() {
        let table = AgentTable::new();
        let index = ZOrderIndex::new();
        assert_eq!(index.part_at(&table, &HitQuery::at(0, 0)), None);
    }
}

// ── Metarooms & camera ────────────────────────────────────────────────────────

#[cfg(test)]
mod metaroom_tests {
    use ck_core::{Point, Rect};

    use crate::{Camera, MetaRoomMap, SpatialError};

    fn two_rooms() -> MetaRoomMap {
        let mut map = MetaRoomMap::new();
        map.add(Rect::new(0, 0, 800, 600), "garden").unwrap();
        map.add(Rect::new(1000, 0, 400, 400), "lab").unwrap();
        map
    }

    #[test]
    fn locate_by_point() {
        let map = two_rooms();
        assert_eq!(map.at(Point::new(10, 10)).unwrap().background, "garden");
        assert_eq!(map.at(Point::new(1200, 100)).unwrap().background, "lab");
        assert!(map.at(Point::new(900, 100)).is_none());
        assert!(map.at(Point::new(800, 0)).is_none(), "right edge is exclusive");
    }

    #[test]
    fn empty_room_rejected() {
        let mut map = MetaRoomMap::new();
        assert!(matches!(
            map.add(Rect::new(0, 0, 0, 10), "void"),
            Err(SpatialError::EmptyMetaRoom(_))
        ));
    }

    #[test]
    fn room_past_the_coordinate_range_rejected() {
        let mut map = MetaRoomMap::new();
        assert!(matches!(
            map.add(Rect::new(i32::MAX - 10, 0, 100, 100), "edge"),
            Err(SpatialError::MetaRoomOutOfRange(_))
        ));
        assert!(matches!(
            map.add(Rect::new(0, 0, u32::MAX, 10), "wide"),
            Err(SpatialError::MetaRoomOutOfRange(_))
        ));
        assert!(map.is_empty());
    }

    #[test]
    fn room_flush_with_the_coordinate_limit_is_located() {
        let mut map = MetaRoomMap::new();
        map.add(Rect::new(i32::MAX - 99, i32::MAX - 99, 100, 100), "corner").unwrap();
        assert_eq!(map.at(Point::new(i32::MAX, i32::MAX)).unwrap().background, "corner");
        assert!(map.at(Point::new(i32::MIN, i32::MIN)).is_none());

        let far = map.add(Rect::new(i32::MIN, i32::MIN, 10, 10), "far").unwrap();
        let mut cam = Camera::new();
        cam.go_to_metaroom(map.get(far).unwrap());
        assert_eq!(cam.offset(), Point::new(i32::MAX, i32::MAX));
    }

    #[test]
    fn fallback_prefers_default_then_lowest_id() {
        let mut map = two_rooms();
        assert_eq!(map.fallback().unwrap().background, "garden");
        let lab = map.at(Point::new(1200, 100)).unwrap().id;
        map.set_default(lab).unwrap();
        assert_eq!(map.fallback().unwrap().background, "lab");
        map.remove(lab);
        assert_eq!(map.fallback().unwrap().background, "garden");
        assert!(map.at(Point::new(1200, 100)).is_none());
    }

    #[test]
    fn camera_falls_back_when_room_vanishes() {
        let mut map = two_rooms();
        let mut cam = Camera::new();
        let lab = map.at(Point::new(1200, 100)).unwrap().clone();
        cam.go_to_metaroom(&lab);
        assert_eq!(cam.position, Point::new(1000, 0));
        assert_eq!(cam.offset(), Point::new(-1000, 0));

        map.remove(lab.id);
        let room = cam.resolve(&map).unwrap();
        assert_eq!(room.background, "garden");
        assert_eq!(cam.position, Point::new(0, 0));
    }

    #[test]
    fn camera_without_any_room_is_an_error() {
        let map = MetaRoomMap::new();
        let mut cam = Camera::new();
        assert!(matches!(cam.resolve(&map), Err(SpatialError::NoMetaRooms)));
    }

    #[test]
    fn move_to_tracks_room() {
        let map = two_rooms();
        let mut cam = Camera::new();
        cam.move_to(Point::new(1100, 50), &map);
        assert_eq!(cam.metaroom(&map).unwrap().background, "lab");
        cam.move_to(Point::new(900, 50), &map);
        assert_eq!(cam.metaroom(&map).unwrap().background, "lab", "gap keeps last room");
    }
}
