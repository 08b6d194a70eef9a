#![forbid(unsafe_code)]

//! The composed portfolio page.
//!
//! [`PortfolioPage`] owns every store (filters, scroll spy, header, contact
//! form, splash screen, theme) and is the only [`Model`] the runners see.
//! Nothing here is global: each timer lives under a [`TimerKey`] in the
//! runner and carries enough context to be recognized as stale.

use std::sync::Arc;

use folio_core::event::Event;
use folio_core::viewport::{StaticViewport, Viewport};
use folio_runtime::program::{Cmd, Model};
use folio_runtime::timer::TimerKey;
use folio_widgets::category_filter::{CategoryFilter, FilterError, FilterOption};
use folio_widgets::contact_form::{
    ContactForm, ContactPayload, Field, SubmissionState, SubmissionTicket, SubmitButton,
    ValidationErrors,
};
use folio_widgets::loading::LoadingScreen;
use folio_widgets::nav_menu::NavMenu;
use folio_widgets::scroll_spy::{ScrollSpy, ScrollSpyError};
use folio_widgets::theme::{ColorMode, Palette, ThemeState};
use folio_widgets::transport::{ContactTransport, LoggingTransport, TransportError};
use serde::Serialize;

use crate::catalog::{self, Project, Skill};
use crate::config::PortfolioConfig;

/// Hides the splash screen.
pub const LOADING_TIMER: TimerKey = TimerKey::new("loading");
/// Simulated delivery delay before the transport is called.
pub const DELIVERY_TIMER: TimerKey = TimerKey::new("contact.deliver");
/// Returns the form from "sent" to idle.
pub const SUCCESS_RESET_TIMER: TimerKey = TimerKey::new("contact.success_reset");

/// Everything that can happen to the page.
#[derive(Debug)]
pub enum PageMsg {
    /// The document scrolled to `y`.
    Scrolled(i32),
    /// The viewport was resized.
    Resized { width: u32, height: u32 },
    SetProjectFilter(String),
    SetSkillFilter(String),
    /// Show every project and skill again.
    ClearFilters,
    /// A nav link was clicked.
    Navigate(String),
    ToggleMenu,
    EditField(Field, String),
    /// The submit button was pressed.
    Submit,
    /// The delivery delay for a submission elapsed.
    Deliver(SubmissionTicket),
    /// The transport answered.
    Delivered(SubmissionTicket, Result<(), TransportError>),
    /// The success-reset timer for a submission elapsed.
    ResetForm(SubmissionTicket),
    LoadingDone,
    SelectPalette(Palette),
    SetColorMode(ColorMode),
    ToggleColorMode,
}

impl From<Event> for PageMsg {
    fn from(event: Event) -> Self {
        match event {
            Event::Scroll(scroll) => Self::Scrolled(scroll.y),
            Event::Resize { width, height } => Self::Resized { width, height },
        }
    }
}

/// A filter bar and the cards it currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPanel<T> {
    pub active: String,
    pub options: Vec<FilterOption>,
    pub items: Vec<T>,
}

impl<T: Clone + folio_widgets::category_filter::Categorized> From<&CategoryFilter<T>>
    for FilterPanel<T>
{
    fn from(filter: &CategoryFilter<T>) -> Self {
        Self {
            active: filter.active().to_string(),
            options: filter.options(),
            items: filter.visible_items().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub id: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    pub scrolled: bool,
    pub mobile_open: bool,
    pub active_section: String,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    pub state: SubmissionState,
    pub button: SubmitButton,
    pub draft: ContactPayload,
    pub errors: Option<ValidationErrors>,
}

/// Snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub loading: bool,
    pub theme: ThemeState,
    pub nav: NavView,
    pub skills: FilterPanel<Skill>,
    pub projects: FilterPanel<Project>,
    pub contact: ContactView,
}

/// The whole page.
pub struct PortfolioPage<V: Viewport = StaticViewport> {
    config: PortfolioConfig,
    viewport: V,
    projects: CategoryFilter<Project>,
    skills: CategoryFilter<Skill>,
    spy: ScrollSpy,
    nav: NavMenu,
    form: ContactForm,
    /// Payload captured when the in-flight submission was accepted.
    outbox: Option<(SubmissionTicket, ContactPayload)>,
    transport: Arc<dyn ContactTransport>,
    loading: LoadingScreen,
    theme: ThemeState,
}

impl<V: Viewport> std::fmt::Debug for PortfolioPage<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioPage")
            .field("config", &self.config)
            .field("active_section", &self.spy.active_section_id())
            .field("form", &self.form.state())
            .field("loading", &self.loading.is_visible())
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl<V: Viewport> PortfolioPage<V> {
    /// Build the page over a host viewport, delivering mail through [`LoggingTransport`].
    pub fn new(config: PortfolioConfig, viewport: V) -> Result<Self, ScrollSpyError> {
        Ok(Self {
            config,
            viewport,
            projects: CategoryFilter::new(
                "All Projects",
                catalog::PROJECT_CATEGORIES,
                catalog::projects(),
            ),
            skills: CategoryFilter::new("All Skills", catalog::SKILL_CATEGORIES, catalog::skills()),
            spy: ScrollSpy::new(catalog::sections())?.with_reference_line(config.reference_line),
            nav: NavMenu::new(config.scrolled_threshold),
            form: ContactForm::new(),
            outbox: None,
            transport: Arc::new(LoggingTransport),
            loading: LoadingScreen::new(config.loading),
            theme: ThemeState::default(),
        })
    }

    /// Deliver contact messages through `transport`.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn ContactTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Start from a theme other than the default.
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeState) -> Self {
        self.theme = theme;
        self
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn projects(&self) -> &CategoryFilter<Project> {
        &self.projects
    }

    pub fn skills(&self) -> &CategoryFilter<Skill> {
        &self.skills
    }

    pub fn scroll_spy(&self) -> &ScrollSpy {
        &self.spy
    }

    pub fn nav(&self) -> &NavMenu {
        &self.nav
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_visible()
    }

    fn on_scroll(&mut self, y: i32) -> Cmd<PageMsg> {
        self.viewport.sync_scroll(y);
        self.nav.observe_scroll(self.viewport.scroll_y());
        self.spy.on_scroll(&self.viewport);
        Cmd::none()
    }

    fn on_filter(result: Result<bool, FilterError>, panel: &'static str) -> Cmd<PageMsg> {
        match result {
            Ok(_) => Cmd::none(),
            Err(err) => {
                tracing::warn!(panel, error = %err, "filter change rejected");
                Cmd::log(format!("{panel}: {err}"))
            }
        }
    }

    fn on_navigate(&mut self, id: &str) -> Cmd<PageMsg> {
        self.nav.close();
        match self.spy.navigate_to(id) {
            Some(request) => Cmd::host(request),
            None => Cmd::none(),
        }
    }

    fn on_submit(&mut self) -> Cmd<PageMsg> {
        let was_succeeded = *self.form.state() == SubmissionState::Succeeded;
        let payload = self.form.draft().clone();
        let ticket = match self.form.submit(&payload) {
            Ok(ticket) => ticket,
            Err(err) => return Cmd::log(format!("contact: {err}")),
        };
        self.outbox = Some((ticket, payload));

        let deliver = if self.config.submit_latency.is_zero() {
            self.deliver(ticket)
        } else {
            Cmd::schedule(
                DELIVERY_TIMER,
                self.config.submit_latency,
                PageMsg::Deliver(ticket),
            )
        };
        if was_succeeded {
            Cmd::batch(vec![Cmd::cancel(SUCCESS_RESET_TIMER), deliver])
        } else {
            deliver
        }
    }

    fn deliver(&mut self, ticket: SubmissionTicket) -> Cmd<PageMsg> {
        let Some((_, payload)) = self.outbox.take_if(|(t, _)| *t == ticket) else {
            tracing::debug!(ticket = ticket.generation(), "no payload for delivery");
            return Cmd::none();
        };
        let transport = Arc::clone(&self.transport);
        Cmd::task_named("contact.send", move || {
            let outcome = transport.send(&payload);
            PageMsg::Delivered(ticket, outcome)
        })
    }

    fn on_delivered(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<(), TransportError>,
    ) -> Cmd<PageMsg> {
        if !self.form.resolve(ticket, outcome) {
            return Cmd::none();
        }
        if *self.form.state() == SubmissionState::Succeeded {
            Cmd::schedule(
                SUCCESS_RESET_TIMER,
                self.config.success_reset,
                PageMsg::ResetForm(ticket),
            )
        } else {
            Cmd::none()
        }
    }
}

impl<V: Viewport> Model for PortfolioPage<V> {
    type Message = PageMsg;
    type View = PageView;

    fn init(&mut self) -> Cmd<PageMsg> {
        // Bring the highlight and header in line with wherever the host starts.
        let scroll_y = self.viewport.scroll_y();
        self.nav.observe_scroll(scroll_y);
        self.spy.on_scroll(&self.viewport);

        let theme = Cmd::host(self.theme.request());
        if self.loading.is_visible() {
            Cmd::batch(vec![
                theme,
                Cmd::schedule(LOADING_TIMER, self.loading.duration(), PageMsg::LoadingDone),
            ])
        } else {
            theme
        }
    }

    fn update(&mut self, msg: PageMsg) -> Cmd<PageMsg> {
        let _span = tracing::debug_span!("page.update", msg = msg_name(&msg)).entered();
        match msg {
            PageMsg::Scrolled(y) => self.on_scroll(y),
            PageMsg::Resized { width, height } => {
                tracing::debug!(width, height, "viewport resized");
                self.viewport.sync_height(height);
                self.nav.observe_scroll(self.viewport.scroll_y());
                self.spy.on_scroll(&self.viewport);
                Cmd::none()
            }
            PageMsg::SetProjectFilter(tag) => {
                Self::on_filter(self.projects.set_filter(&tag), "projects")
            }
            PageMsg::SetSkillFilter(tag) => Self::on_filter(self.skills.set_filter(&tag), "skills"),
            PageMsg::ClearFilters => {
                self.projects.reset();
                self.skills.reset();
                Cmd::none()
            }
            PageMsg::Navigate(id) => self.on_navigate(&id),
            PageMsg::ToggleMenu => {
                self.nav.toggle();
                Cmd::none()
            }
            PageMsg::EditField(field, value) => {
                self.form.set_field(field, value);
                Cmd::none()
            }
            PageMsg::Submit => self.on_submit(),
            PageMsg::Deliver(ticket) => self.deliver(ticket),
            PageMsg::Delivered(ticket, outcome) => self.on_delivered(ticket, outcome),
            PageMsg::ResetForm(ticket) => {
                self.form.reset_due(ticket);
                Cmd::none()
            }
            PageMsg::LoadingDone => {
                self.loading.finish();
                Cmd::none()
            }
            PageMsg::SelectPalette(palette) => Cmd::host(self.theme.select_palette(palette)),
            PageMsg::SetColorMode(mode) => Cmd::host(self.theme.set_mode(mode)),
            PageMsg::ToggleColorMode => Cmd::host(self.theme.toggle_mode()),
        }
    }

    fn view(&self) -> PageView {
        PageView {
            loading: self.loading.is_visible(),
            theme: self.theme,
            nav: NavView {
                scrolled: self.nav.is_scrolled(),
                mobile_open: self.nav.is_mobile_open(),
                active_section: self.spy.active_section_id().to_string(),
                links: self
                    .spy
                    .sections()
                    .iter()
                    .map(|s| NavLink {
                        id: s.id.clone(),
                        label: s.label.clone(),
                        active: self.spy.is_active(&s.id),
                    })
                    .collect(),
            },
            skills: FilterPanel::from(&self.skills),
            projects: FilterPanel::from(&self.projects),
            contact: ContactView {
                state: self.form.state().clone(),
                button: self.form.button(),
                draft: self.form.draft().clone(),
                errors: self.form.errors().cloned(),
            },
        }
    }
}

fn msg_name(msg: &PageMsg) -> &'static str {
    match msg {
        PageMsg::Scrolled(_) => "scrolled",
        PageMsg::Resized { .. } => "resized",
        PageMsg::SetProjectFilter(_) => "set_project_filter",
        PageMsg::SetSkillFilter(_) => "set_skill_filter",
        PageMsg::ClearFilters => "clear_filters",
        PageMsg::Navigate(_) => "navigate",
        PageMsg::ToggleMenu => "toggle_menu",
        PageMsg::EditField(..) => "edit_field",
        PageMsg::Submit => "submit",
        PageMsg::Deliver(_) => "deliver",
        PageMsg::Delivered(..) => "delivered",
        PageMsg::ResetForm(_) => "reset_form",
        PageMsg::LoadingDone => "loading_done",
        PageMsg::SelectPalette(_) => "select_palette",
        PageMsg::SetColorMode(_) => "set_color_mode",
        PageMsg::ToggleColorMode => "toggle_color_mode",
    }
}
