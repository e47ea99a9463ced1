//! Property-based tests for the layout engine
//!
//! Uses proptest to check timing invariants, slot allocation behavior and
//! deterministic output across generated comment lists.

use std::collections::BTreeMap;

use danmaku_core::{
    convert, layout::SlotRegistry, Comment, ConversionConfig, LayoutEngine, MotionType, SizeClass,
};
use proptest::prelude::*;

/// Generate a supported or unsupported motion type
fn arb_motion() -> impl Strategy<Value = MotionType> {
    (0u8..10).prop_map(MotionType::from_mode)
}

fn arb_size() -> impl Strategy<Value = SizeClass> {
    prop_oneof![
        Just(SizeClass::Small),
        Just(SizeClass::Normal),
        Just(SizeClass::Large),
    ]
}

/// Generate a comment list sorted by show time with sequential indices
fn arb_comments() -> impl Strategy<Value = Vec<Comment>> {
    prop::collection::vec(
        (
            arb_motion(),
            0.0f64..600.0,
            "[a-z0-9\u{4e00}-\u{4e20}]{0,20}",
            arb_size(),
            0u32..=0x00FF_FFFF,
        ),
        0..60,
    )
    .prop_map(|mut raw| {
        raw.sort_by(|a, b| a.1.total_cmp(&b.1));
        raw.into_iter()
            .enumerate()
            .map(|(index, (motion, time, text, size, color))| {
                Comment::new(motion, time, text)
                    .with_index(index)
                    .with_size(size)
                    .with_color(color)
            })
            .collect()
    })
}

/// Straightforward map-based rendition of the slot selection rules
#[derive(Default)]
struct ReferenceRegistry {
    slots: BTreeMap<usize, f64>,
}

impl ReferenceRegistry {
    fn choose(&mut self, start: f64) -> usize {
        self.slots.retain(|_, free_at| *free_at > start);
        if self.slots.is_empty() {
            return 0;
        }
        let count = self.slots.len();
        let min = *self.slots.keys().next().unwrap();
        let max = *self.slots.keys().next_back().unwrap();
        if count == max {
            return min;
        }
        (0..count)
            .find(|slot| !self.slots.contains_key(slot))
            .unwrap_or(count)
    }
}

proptest! {
    #[test]
    fn end_never_precedes_start(comments in arb_comments(), offset in -20.0f64..20.0) {
        let config = ConversionConfig::default().with_duration_offset(offset);
        let mut engine = LayoutEngine::new(&config);
        for comment in comments.iter().filter(|c| c.motion.is_supported()) {
            let layout = engine.layout(comment).unwrap();
            prop_assert!(layout.end_time >= layout.start_time);
        }
    }

    #[test]
    fn fixed_comments_last_four_seconds(comments in arb_comments(), offset in -5.0f64..5.0) {
        let config = ConversionConfig::default().with_duration_offset(offset);
        let mut engine = LayoutEngine::new(&config);
        for comment in comments.iter().filter(|c| c.motion.is_fixed()) {
            let layout = engine.layout(comment).unwrap();
            prop_assert!((layout.end_time - layout.start_time - 4.0).abs() < 1e-9);
            prop_assert!(layout.rect.is_static());
        }
    }

    #[test]
    fn moving_comments_keep_their_line(comments in arb_comments()) {
        let config = ConversionConfig::default();
        let mut engine = LayoutEngine::new(&config);
        for comment in comments.iter().filter(|c| c.motion.is_moving()) {
            let layout = engine.layout(comment).unwrap();
            prop_assert_eq!(layout.rect.start.y, layout.rect.end.y);
            prop_assert_ne!(layout.rect.start.x, layout.rect.end.x);
            prop_assert!(layout.slot.is_none());
        }
    }

    #[test]
    fn registry_matches_reference_rules(
        intervals in prop::collection::vec((0.0f64..30.0, 0.1f64..8.0), 0..80)
    ) {
        let mut registry = SlotRegistry::new();
        let mut reference = ReferenceRegistry::default();
        for (start, length) in intervals {
            let slot = registry.choose_slot(start);
            prop_assert_eq!(slot, reference.choose(start));
            registry.occupy(slot, start + length);
            reference.slots.insert(slot, start + length);
            prop_assert_eq!(
                registry.occupied().collect::<Vec<_>>(),
                reference.slots.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn simultaneous_fixed_comments_get_distinct_slots(count in 1usize..20, start in 0.0f64..100.0) {
        let config = ConversionConfig::default();
        let mut engine = LayoutEngine::new(&config);
        let slots: Vec<usize> = (0..count)
            .map(|i| {
                engine
                    .layout(&Comment::new(MotionType::Bottom, start, "x").with_index(i))
                    .unwrap()
                    .slot
                    .unwrap()
            })
            .collect();
        prop_assert_eq!(slots, (0..count).collect::<Vec<_>>());
    }

    #[test]
    fn conversion_is_deterministic(comments in arb_comments()) {
        let config = ConversionConfig::new(1280, 720);
        let first = convert(&comments, &config).unwrap();
        let second = convert(&comments, &config).unwrap();
        prop_assert_eq!(&first, &second);

        let supported = comments.iter().filter(|c| c.motion.is_supported()).count();
        let events = first.lines().filter(|l| l.starts_with("Dialogue:")).count();
        prop_assert_eq!(events, supported);
    }
}
