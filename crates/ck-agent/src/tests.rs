//! Unit tests for ck-agent.

use ck_core::{AgentRef, PartId, Point};

use crate::{AgentBuilder, AgentState, AgentTable, Classifier, Part};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn simple(x: i32, y: i32) -> AgentState {
    AgentBuilder::new(Classifier::new(2, 1, 1))
        .position(x, y)
        .size(10, 10)
        .build()
        .unwrap()
}

fn table_with(n: usize) -> (AgentTable, Vec<AgentRef>) {
    let mut table = AgentTable::new();
    let refs = (0..n).map(|i| table.insert(simple(i as i32, 0))).collect();
    (table, refs)
}

#[cfg(test)]
mod builder_tests {
    use std::sync::Arc;

    use super::*;
    use crate::{AgentError, AlphaMask};

    #[test]
    fn simple_agent_defaults() {
        let state = simple(5, 6);
        assert!(!state.parts.is_compound());
        assert_eq!(state.bounds(), ck_core::Rect::new(5, 6, 10, 10));
        assert!(!state.is_dying());
        assert!(state.unid().is_none());
        assert_eq!(state.vars.len(), crate::OBJECT_VAR_COUNT);
    }

    #[test]
    fn compound_agent_lists_root_first() {
        let state = AgentBuilder::new(Classifier::default())
            .size(20, 20)
            .subpart(Part::new(PartId(2), Point::new(1, 1), 4, 4))
            .subpart(Part::new(PartId(1), Point::new(8, 8), 4, 4))
            .build()
            .unwrap();
        let ids: Vec<PartId> = state.parts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PartId::ROOT, PartId(2), PartId(1)]);
        assert_eq!(state.parts.len(), 3);
        assert!(state.parts.get(PartId(1)).is_some());
        assert!(state.parts.get(PartId(9)).is_none());
    }

    #[test]
    fn duplicate_part_rejected() {
        let err = AgentBuilder::new(Classifier::default())
            .subpart(Part::new(PartId(1), Point::default(), 1, 1))
            .subpart(Part::new(PartId(1), Point::default(), 1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, AgentError::DuplicatePart { part: PartId(1) }));
    }

    #[test]
    fn subpart_cannot_be_root() {
        let err = AgentBuilder::new(Classifier::default())
            .subpart(Part::new(PartId::ROOT, Point::default(), 1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, AgentError::SubPartIsRoot));
    }

    #[test]
    fn mask_must_match_part() {
        let mask = Arc::new(AlphaMask::from_fn(3, 3, |_, _| true));
        let err = AgentBuilder::new(Classifier::default())
            .size(4, 4)
            .root_mask(mask)
            .build()
            .unwrap_err();
        assert!(matches!(err, AgentError::MaskSizeMismatch { .. }));
    }

    #[test]
    fn vars_bounds_checked() {
        let mut state = simple(0, 0);
        assert!(state.set_var(99, 7.into()));
        assert!(!state.set_var(100, 7.into()));
        assert_eq!(state.var(99).and_then(|v| v.as_integer()), Some(7));
    }
}

#[cfg(test)]
mod part_tests {
    use std::sync::Arc;

    use super::*;
    use crate::AlphaMask;

    #[test]
    fn mask_lookup() {
        // Left column transparent, rest opaque.
        let mask = AlphaMask::from_alpha(2, 2, &[0, 255, 0, 255]);
        assert!(mask.transparent_at(Point::new(0, 0)));
        assert!(!mask.transparent_at(Point::new(1, 1)));
        assert!(mask.transparent_at(Point::new(2, 0)), "outside is see-through");
        assert!(mask.transparent_at(Point::new(-1, 0)));
    }

    #[test]
    fn part_without_mask_is_opaque() {
        let p = Part::new(PartId(1), Point::default(), 4, 4);
        assert!(!p.is_transparent());
        assert!(!p.transparent_at(Point::new(0, 0)));
    }

    #[test]
    fn part_with_mask_reports_pixels() {
        let mask = Arc::new(AlphaMask::from_fn(4, 4, |x, _| x >= 2));
        let p = Part::new(PartId(1), Point::default(), 4, 4).with_mask(mask);
        assert!(p.is_transparent());
        assert!(p.transparent_at(Point::new(1, 0)));
        assert!(!p.transparent_at(Point::new(3, 0)));
    }

    #[test]
    #[should_panic(expected = "alpha buffer size mismatch")]
    fn oversized_mask_rejects_short_buffer() {
        // 70 000² pixels does not fit in u32.
        AlphaMask::from_alpha(70_000, 70_000, &[]);
    }

    #[test]
    fn wide_mask_indexes_in_usize() {
        let mask = AlphaMask::from_fn(70_000, 2, |x, y| y == 1 && x % 2 == 0);
        assert!(!mask.transparent_at(Point::new(69_998, 1)));
        assert!(mask.transparent_at(Point::new(69_999, 1)));
        assert!(mask.transparent_at(Point::new(69_998, 0)));
    }
}

#[cfg(test)]
mod table_tests {
    use super::*;

    #[test]
    fn insert_and_resolve() {
        let (table, refs) = table_with(3);
        assert_eq!(table.len(), 3);
        for (i, r) in refs.iter().enumerate() {
            assert_eq!(table.resolve(*r).unwrap().position.x, i as i32);
        }
        assert!(table.resolve(AgentRef::NULL).is_none());
    }

    #[test]
    fn order_is_spawn_order() {
        let (table, refs) = table_with(4);
        assert_eq!(table.order(), refs.as_slice());
    }

    #[test]
    fn mark_dying_is_idempotent() {
        let (mut table, refs) = table_with(2);
        assert!(table.mark_dying(refs[0]));
        assert!(!table.mark_dying(refs[0]));
        assert_eq!(table.kill_list(), &[refs[0]]);
        // Dying agents still exist but no longer resolve as alive.
        assert!(table.get(refs[0]).is_some());
        assert!(!table.is_alive(refs[0]));
        assert!(table.is_alive(refs[1]));
    }

    #[test]
    fn drain_kills_removes_in_flag_order() {
        let (mut table, refs) = table_with(4);
        table.mark_dying(refs[2]);
        table.mark_dying(refs[0]);
        let removed: Vec<AgentRef> = table.drain_kills().into_iter().map(|(r, _)| r).collect();
        assert_eq!(removed, vec![refs[2], refs[0]]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.order(), &[refs[1], refs[3]]);
        assert!(table.kill_list().is_empty());
        assert!(table.get(refs[0]).is_none());
    }

    #[test]
    fn stale_refs_do_not_alias_reused_slots() {
        let (mut table, refs) = table_with(1);
        table.mark_dying(refs[0]);
        table.drain_kills();
        let reborn = table.insert(simple(99, 0));
        assert_eq!(reborn.id, refs[0].id, "slot is recycled");
        assert_ne!(reborn.generation, refs[0].generation);
        assert!(table.get(refs[0]).is_none());
        assert_eq!(table.resolve(reborn).unwrap().position.x, 99);
        assert_eq!(table.capacity(), 1);
    }

    #[test]
    fn drain_with_nothing_flagged_is_noop() {
        let (mut table, _) = table_with(3);
        assert!(table.drain_kills().is_empty());
        assert_eq!(table.len(), 3);
    }

    #[test]
    #[should_panic(expected = "not dying")]
    fn non_dying_agent_on_kill_list_aborts() {
        let (mut table, refs) = table_with(1);
        table.kill_list.push(refs[0]);
        table.drain_kills();
    }
}

#[cfg(test)]
mod unid_tests {
    use ck_core::{SimRng, Unid};
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::UnidRegistry;

    #[test]
    fn ten_thousand_allocations_are_distinct() {
        let mut reg = UnidRegistry::new();
        let mut rng = SimRng::new(7);
        let owner = AgentRef::new(ck_core::AgentId(0), 0);
        let mut seen = FxHashSet::default();
        for _ in 0..10_000 {
            let id = reg.allocate(owner, &mut rng);
            assert_ne!(id, Unid::INVALID);
            assert!(seen.insert(id), "duplicate unid {id}");
        }
        assert_eq!(reg.len(), 10_000);
    }

    #[test]
    fn colliding_draw_is_resampled() {
        let mut reg = UnidRegistry::new();
        let a = AgentRef::new(ck_core::AgentId(0), 0);
        let b = AgentRef::new(ck_core::AgentId(1), 0);
        // Same seed: the second registry draw starts on the id `a` holds.
        let first = reg.allocate(a, &mut SimRng::new(9));
        let second = reg.allocate(b, &mut SimRng::new(9));
        assert_ne!(first, second);
        assert_eq!(reg.lookup(first), Some(a));
        assert_eq!(reg.lookup(second), Some(b));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn lookup_miss_is_none() {
        let reg = UnidRegistry::new();
        assert_eq!(reg.lookup(Unid(0)), None);
        assert_eq!(reg.lookup(Unid(12345)), None);
    }

    #[test]
    fn release_unmaps() {
        let mut reg = UnidRegistry::new();
        let mut rng = SimRng::new(1);
        let owner = AgentRef::new(ck_core::AgentId(3), 0);
        let id = reg.allocate(owner, &mut rng);
        assert_eq!(reg.lookup(id), Some(owner));
        assert_eq!(reg.release(id), Some(owner));
        assert_eq!(reg.lookup(id), None);
        assert_eq!(reg.release(id), None);
    }

    #[test]
    fn unid_for_is_lazy_and_cached() {
        let (mut table, refs) = table_with(1);
        let mut reg = UnidRegistry::new();
        let mut rng = SimRng::new(2);
        assert!(table.get(refs[0]).unwrap().unid().is_none());
        let first = reg.unid_for(&mut table, refs[0], &mut rng).unwrap();
        let again = reg.unid_for(&mut table, refs[0], &mut rng).unwrap();
        assert_eq!(first, again);
        assert_eq!(reg.len(), 1);
        assert_eq!(table.get(refs[0]).unwrap().unid(), Some(first));
    }

    #[test]
    fn unid_for_dying_agent_is_none() {
        let (mut table, refs) = table_with(1);
        let mut reg = UnidRegistry::new();
        table.mark_dying(refs[0]);
        assert!(reg.unid_for(&mut table, refs[0], &mut SimRng::new(0)).is_none());
    }

    #[test]
    fn release_from_clears_cached_id() {
        let (mut table, refs) = table_with(1);
        let mut reg = UnidRegistry::new();
        let mut rng = SimRng::new(3);
        let id = reg.unid_for(&mut table, refs[0], &mut rng).unwrap();
        assert_eq!(reg.release_from(&mut table, id), Some(refs[0]));
        assert!(table.get(refs[0]).unwrap().unid().is_none());
    }

    #[test]
    fn death_does_not_release() {
        let (mut table, refs) = table_with(1);
        let mut reg = UnidRegistry::new();
        let id = reg.unid_for(&mut table, refs[0], &mut SimRng::new(4)).unwrap();
        table.mark_dying(refs[0]);
        table.drain_kills();
        assert_eq!(reg.lookup(id), Some(refs[0]), "mapping survives until released");
        assert!(table.resolve(refs[0]).is_none());
    }
}
