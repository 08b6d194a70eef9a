//! Property-based invariants for the page stores.
//!
//! 1. The visible set is exactly the items of the active category, in order.
//! 2. A rejected filter never changes what is visible.
//! 3. The active section is always known and, when anything touches the
//!    reference line, is the lowest-order section that does.
//! 4. The submission state only moves along the allowed edges, and stale
//!    tickets never move it at all.

use folio_core::geometry::Bounds;
use folio_core::viewport::Viewport;
use folio_widgets::category_filter::{ALL, Categorized, CategoryFilter};
use folio_widgets::contact_form::{ContactForm, ContactPayload, SubmissionState};
use folio_widgets::scroll_spy::{ScrollSpy, Section};
use folio_widgets::transport::TransportError;
use proptest::prelude::*;

const TAGS: [&str; 4] = ["ml", "web", "mobile", "undeclared"];

#[derive(Debug, Clone)]
struct Item {
    id: usize,
    tag: &'static str,
}

impl Categorized for Item {
    fn category(&self) -> &str {
        self.tag
    }
}

fn store(tags: &[usize]) -> CategoryFilter<Item> {
    let items = tags
        .iter()
        .enumerate()
        .map(|(id, &t)| Item { id, tag: TAGS[t] })
        .collect();
    CategoryFilter::new("All", [("ml", "ML"), ("web", "Web"), ("mobile", "Mobile")], items)
}

struct Layout(Vec<(String, Bounds)>);

impl Viewport for Layout {
    fn scroll_y(&self) -> i32 {
        0
    }

    fn section_bounds(&self, anchor: &str) -> Option<Bounds> {
        self.0.iter().find(|(id, _)| id == anchor).map(|(_, b)| *b)
    }
}

#[derive(Debug, Clone)]
enum FormOp {
    SubmitValid,
    SubmitInvalid,
    ResolveCurrent(bool),
    ResolveStale,
    ResetCurrent,
}

fn form_op() -> impl Strategy<Value = FormOp> {
    prop_oneof![
        Just(FormOp::SubmitValid),
        Just(FormOp::SubmitInvalid),
        any::<bool>().prop_map(FormOp::ResolveCurrent),
        Just(FormOp::ResolveStale),
        Just(FormOp::ResetCurrent),
    ]
}

fn allowed(from: &SubmissionState, to: &SubmissionState) -> bool {
    use SubmissionState::*;
    from == to
        || matches!(
            (from, to),
            (Idle | Succeeded | Failed { .. }, Submitting)
                | (Submitting, Succeeded | Failed { .. })
                | (Succeeded, Idle)
        )
}

proptest! {
    #[test]
    fn visible_matches_active_category(
        tags in prop::collection::vec(0usize..4, 0..30),
        pick in 0usize..5,
    ) {
        let mut filter = store(&tags);
        let tag = if pick == 4 { ALL } else { TAGS[pick] };
        let before: Vec<usize> = filter.visible_items().map(|i| i.id).collect();

        match filter.set_filter(tag) {
            Ok(_) => {
                let expected: Vec<usize> = tags
                    .iter()
                    .enumerate()
                    .filter(|&(_, &t)| tag == ALL || TAGS[t] == tag)
                    .map(|(id, _)| id)
                    .collect();
                let visible: Vec<usize> = filter.visible_items().map(|i| i.id).collect();
                prop_assert_eq!(visible.len(), filter.count(tag));
                prop_assert_eq!(visible, expected);
            }
            Err(_) => {
                prop_assert_eq!(tag, "undeclared");
                let after: Vec<usize> = filter.visible_items().map(|i| i.id).collect();
                prop_assert_eq!(after, before);
                prop_assert_eq!(filter.active(), ALL);
            }
        }
    }

    #[test]
    fn active_section_is_lowest_intersecting(
        bands in prop::collection::vec((-2_000i32..=2_000, 0u32..=1_500, -3i32..=3), 1..6),
        rounds in 1usize..4,
    ) {
        let sections: Vec<Section> = bands
            .iter()
            .enumerate()
            .map(|(i, &(_, _, order))| Section::new(format!("s{i}"), format!("S{i}"), order))
            .collect();
        let mut spy = ScrollSpy::new(sections.clone()).expect("ids are unique");
        let layout = Layout(
            bands
                .iter()
                .enumerate()
                .map(|(i, &(top, h, _))| (format!("s{i}"), Bounds::new(top, h)))
                .collect(),
        );

        for _ in 0..rounds {
            spy.on_scroll(&layout);
        }

        prop_assert!(spy.section(spy.active_section_id()).is_some());
        let lowest_hit = sections
            .iter()
            .filter(|s| {
                layout
                    .section_bounds(&s.id)
                    .is_some_and(|b| b.intersects_line(spy.reference_line()))
            })
            .map(|s| s.order)
            .min();
        if let Some(order) = lowest_hit {
            let active = spy.section(spy.active_section_id()).expect("active is known");
            prop_assert_eq!(active.order, order);
        }
    }

    #[test]
    fn submission_moves_along_allowed_edges(ops in prop::collection::vec(form_op(), 0..40)) {
        let mut form = ContactForm::new();
        let valid = ContactPayload::new("Ada", "ada@example.com", "Hi", "Hello");
        let mut last_generation = 0;

        for op in ops {
            let before = form.state().clone();
            let current = form.current_ticket();
            match op {
                FormOp::SubmitValid => {
                    let result = form.submit(&valid);
                    prop_assert_eq!(result.is_err(), before == SubmissionState::Submitting);
                }
                FormOp::SubmitInvalid => {
                    prop_assert!(form.submit(&ContactPayload::default()).is_err());
                    prop_assert_eq!(form.state(), &before);
                }
                FormOp::ResolveCurrent(ok) => {
                    if let Some(ticket) = current {
                        let outcome = if ok { Ok(()) } else { Err(TransportError::new("down")) };
                        form.resolve(ticket, outcome);
                    }
                }
                FormOp::ResolveStale => {
                    if current.is_some_and(|t| t.generation() > 1) {
                        // A fresh form mints generation 1, which is stale here.
                        let mut replay = ContactForm::new();
                        let old = replay.submit(&valid).expect("fresh form accepts");
                        prop_assert!(!form.resolve(old, Ok(())));
                    }
                }
                FormOp::ResetCurrent => {
                    if let Some(ticket) = current {
                        form.reset_due(ticket);
                    }
                }
            }
            prop_assert!(allowed(&before, form.state()), "{:?} -> {:?}", before, form.state());
            let generation = form.current_ticket().map_or(0, |t| t.generation());
            prop_assert!(generation >= last_generation);
            last_generation = generation;
        }
    }
}
