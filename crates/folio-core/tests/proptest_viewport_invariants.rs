//! Property-based invariant tests for viewport geometry and scroll throttling.
//!
//! 1. A band touches every line between its top and bottom, and no other.
//! 2. Offsetting a band and the line by the same amount preserves the test.
//! 3. Stacked section bounds track the scroll offset exactly.
//! 4. `scroll_to` never leaves the reachable range.
//! 5. The coalescer never releases scrolls closer together than its interval
//!    (except through an explicit flush), and always ends with the latest one.

use core::time::Duration;

use folio_core::event::Event;
use folio_core::geometry::Bounds;
use folio_core::scroll_coalescer::ScrollCoalescer;
use folio_core::viewport::{StaticViewport, Viewport};
use proptest::prelude::*;

fn band_strategy() -> impl Strategy<Value = Bounds> {
    (-10_000i32..=10_000, 0u32..=5_000).prop_map(|(top, h)| Bounds::new(top, h))
}

proptest! {
    #[test]
    fn line_inside_iff_between_edges(b in band_strategy(), y in -20_000i32..=20_000) {
        let expected = y >= b.top && y <= b.bottom();
        prop_assert_eq!(b.intersects_line(y), expected);
    }

    #[test]
    fn offset_preserves_line_test(b in band_strategy(), y in -5_000i32..=5_000, dy in -5_000i32..=5_000) {
        prop_assert_eq!(b.intersects_line(y), b.offset(dy).intersects_line(y + dy));
    }

    #[test]
    fn stacked_bounds_follow_scroll(
        heights in prop::collection::vec(1u32..=3_000, 1..6),
        scroll in -100i32..=20_000,
    ) {
        let names: Vec<String> = (0..heights.len()).map(|i| format!("s{i}")).collect();
        let mut vp = StaticViewport::stacked(
            700,
            names.iter().map(String::as_str).zip(heights.iter().copied()),
        );
        vp.set_scroll_y(scroll);
        let mut doc_top = 0i32;
        for (name, h) in names.iter().zip(&heights) {
            let b = vp.section_bounds(name).expect("known section");
            prop_assert_eq!(b, Bounds::new(doc_top - scroll, *h));
            doc_top += *h as i32;
        }
    }

    #[test]
    fn scroll_to_stays_in_range(
        heights in prop::collection::vec(1u32..=3_000, 0..6),
        target in any::<i32>(),
        viewport_height in 1u32..=4_000,
    ) {
        let names: Vec<String> = (0..heights.len()).map(|i| format!("s{i}")).collect();
        let mut vp = StaticViewport::stacked(
            viewport_height,
            names.iter().map(String::as_str).zip(heights.iter().copied()),
        );
        vp.scroll_to(target);
        prop_assert!(vp.scroll_y() >= 0);
        prop_assert!(vp.scroll_y() <= vp.max_scroll());
    }

    #[test]
    fn coalescer_respects_interval(
        steps in prop::collection::vec((0u64..=40, -500i32..=5_000), 1..60),
        interval_ms in 1u64..=50,
    ) {
        let interval = Duration::from_millis(interval_ms);
        let mut c = ScrollCoalescer::new(interval);
        let mut now = Duration::ZERO;
        let mut released: Vec<(Duration, i32)> = Vec::new();
        let mut last_pushed = 0;

        for (dt, y) in steps {
            now += Duration::from_millis(dt);
            if let Some(Event::Scroll(s)) = c.take_due(now) {
                released.push((now, s.y));
            }
            last_pushed = y;
            if let Some(Event::Scroll(s)) = c.push(Event::scroll(y), now) {
                released.push((now, s.y));
            }
        }

        for pair in released.windows(2) {
            prop_assert!(pair[1].0 - pair[0].0 >= interval);
        }

        now += interval;
        if let Some(Event::Scroll(s)) = c.take_due(now) {
            released.push((now, s.y));
        }
        prop_assert!(!c.has_pending());
        prop_assert_eq!(released.last().map(|r| r.1), Some(last_pushed));
    }
}
