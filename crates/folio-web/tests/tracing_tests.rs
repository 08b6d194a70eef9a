#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Verify that page updates run inside a `page.update` span carrying the
//! message name, and that rejected input is reported as a warning event.

use std::sync::{Arc, Mutex};

use folio_core::viewport::StaticViewport;
use folio_runtime::simulator::ProgramSimulator;
use folio_web::config::PortfolioConfig;
use folio_web::page::{PageMsg, PortfolioPage};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

/// What the capture layer saw.
#[derive(Debug, Default)]
struct Captured {
    /// `(span name, msg field)` for every span created.
    spans: Vec<(String, String)>,
    /// `(level, message)` for every event.
    events: Vec<(Level, String)>,
}

struct Capture(Arc<Mutex<Captured>>);

#[derive(Default)]
struct FieldGrab {
    wanted: &'static str,
    value: String,
}

impl Visit for FieldGrab {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.wanted {
            self.value = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == self.wanted {
            self.value = format!("{value:?}");
        }
    }
}

impl<S> Layer<S> for Capture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut grab = FieldGrab {
            wanted: "msg",
            ..FieldGrab::default()
        };
        attrs.record(&mut grab);
        if let Ok(mut captured) = self.0.lock() {
            captured
                .spans
                .push((attrs.metadata().name().to_string(), grab.value));
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut grab = FieldGrab {
            wanted: "message",
            ..FieldGrab::default()
        };
        event.record(&mut grab);
        if let Ok(mut captured) = self.0.lock() {
            captured.events.push((*event.metadata().level(), grab.value));
        }
    }
}

fn run(f: impl FnOnce(&mut ProgramSimulator<PortfolioPage>)) -> Captured {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let subscriber = tracing_subscriber::registry().with(Capture(Arc::clone(&captured)));
    tracing::subscriber::with_default(subscriber, || {
        let page = PortfolioPage::new(
            PortfolioConfig::default(),
            StaticViewport::stacked(800, [("home", 900), ("about", 900)]),
        )
        .expect("sections are valid");
        let mut sim = ProgramSimulator::new(page);
        sim.init();
        f(&mut sim);
    });
    let mut guard = captured.lock().expect("not poisoned");
    std::mem::take(&mut *guard)
}

#[test]
fn update_runs_inside_named_span() {
    let captured = run(|sim| {
        sim.send(PageMsg::ToggleMenu);
        sim.send(PageMsg::SetProjectFilter("web".into()));
    });
    let updates: Vec<&str> = captured
        .spans
        .iter()
        .filter(|(name, _)| name == "page.update")
        .map(|(_, msg)| msg.as_str())
        .collect();
    assert_eq!(updates, vec!["toggle_menu", "set_project_filter"]);
}

#[test]
fn rejected_filter_is_a_warning() {
    let captured = run(|sim| {
        sim.send(PageMsg::SetSkillFilter("juggling".into()));
    });
    assert!(
        captured
            .events
            .iter()
            .any(|(level, msg)| *level == Level::WARN && msg == "filter change rejected"),
        "events: {:?}",
        captured.events
    );
}
