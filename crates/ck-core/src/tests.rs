//! Unit tests for ck-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, AgentRef, PartId, ScriptNo, Unid};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(Unid::INVALID.0, u32::MAX);
        assert_eq!(PartId::INVALID.0, u16::MAX);
        assert!(!ScriptNo::default().is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(AgentRef::new(AgentId(3), 2).to_string(), "AgentRef(3#2)");
        assert_eq!(AgentRef::NULL.to_string(), "AgentRef(null)");
    }

    #[test]
    fn null_ref() {
        assert!(AgentRef::NULL.is_null());
        assert!(AgentRef::default().is_null());
        assert!(!AgentRef::new(AgentId(0), 0).is_null());
    }

    #[test]
    fn refs_differ_by_generation() {
        let a = AgentRef::new(AgentId(1), 0);
        let b = AgentRef::new(AgentId(1), 1);
        assert_ne!(a, b);
    }
}

#[cfg(test)]
mod geometry {
    use crate::{Point, Rect};

    #[test]
    fn rect_is_half_open() {
        let r = Rect::new(10, 20, 5, 5);
        assert!(r.contains(Point::new(10, 20)));
        assert!(r.contains(Point::new(14, 24)));
        assert!(!r.contains(Point::new(15, 24)));
        assert!(!r.contains(Point::new(14, 25)));
        assert!(!r.contains(Point::new(9, 20)));
    }

    #[test]
    fn translate_and_relative() {
        let r = Rect::new(1, 2, 3, 4).translated(Point::new(100, 200));
        assert_eq!(r, Rect::new(101, 202, 3, 4));
        assert_eq!(Point::new(105, 210).relative_to(Point::new(100, 200)), Some(Point::new(5, 10)));
    }

    #[test]
    fn relative_to_overflow_is_none() {
        assert_eq!(Point::new(i32::MAX, 0).relative_to(Point::new(-10, 0)), None);
        assert_eq!(Point::new(i32::MIN, 0).relative_to(Point::new(10, 0)), None);
        assert_eq!(Point::new(0, i32::MIN).relative_to(Point::new(0, 1)), None);
    }

    #[test]
    fn edges_are_wide() {
        let r = Rect::new(i32::MAX - 10, 0, 100, u32::MAX);
        assert_eq!(r.right(), i32::MAX as i64 + 90);
        assert_eq!(r.bottom(), u32::MAX as i64);
        assert!(!r.fits_i32());
        assert!(r.contains(Point::new(i32::MAX, 5)));
        assert!(Rect::new(i32::MAX - 9, i32::MIN, 10, 10).fits_i32());
    }

    #[test]
    fn translation_saturates() {
        let r = Rect::new(10, -10, 5, 5).translated(Point::new(i32::MAX, i32::MIN));
        assert_eq!((r.x, r.y), (i32::MAX, i32::MIN));
        assert_eq!(Point::new(i32::MAX, 0).offset(1, 0), Point::new(i32::MAX, 0));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 10);
        assert!(r.is_empty());
        assert!(!r.contains(Point::new(0, 0)));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(5)), 10);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(50);
        assert_eq!(clock.elapsed_ms(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_ms(), 100);
        assert_eq!(clock.current_tick, Tick(2));
    }

    #[test]
    fn ticks_for_duration_rounds_up() {
        let clock = SimClock::new(50);
        assert_eq!(clock.ticks_for_ms(1000), 20);
        assert_eq!(clock.ticks_for_ms(1), 1);
    }

    #[test]
    fn ticks_due_catches_up() {
        let mut clock = SimClock::new(50);
        assert_eq!(clock.ticks_due(175), 3);
        clock.advance();
        assert_eq!(clock.ticks_due(175), 2);
        assert_eq!(clock.ticks_due(0), 0);
    }

    #[test]
    fn config_defaults() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.tick_duration_ms, 50);
        assert_eq!(cfg.end_tick(), None);
        let bounded = SimConfig { total_ticks: 10, ..SimConfig::default() };
        assert_eq!(bounded.end_tick(), Some(Tick(10)));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u32 = r1.random();
            let b: u32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn child_streams_diverge() {
        let mut root = SimRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod value {
    use crate::{AgentId, AgentRef, ScriptValue};

    #[test]
    fn numeric_views() {
        assert_eq!(ScriptValue::from(3).as_float(), Some(3.0));
        assert_eq!(ScriptValue::from(2.9f32).as_integer(), Some(2));
        assert_eq!(ScriptValue::from("x").as_integer(), None);
        assert!(ScriptValue::default().is_null());
    }

    #[test]
    fn null_agent_is_not_an_agent() {
        assert_eq!(ScriptValue::Agent(AgentRef::NULL).as_agent(), None);
        let r = AgentRef::new(AgentId(4), 1);
        assert_eq!(ScriptValue::from(r).as_agent(), Some(r));
    }
}
