#![forbid(unsafe_code)]

//! State stores for the portfolio page.
//!
//! Each store is plain data plus the operations that mutate it. None of them
//! own a clock or a task: timers and transport calls are driven by the page
//! model in `folio-web`.

pub mod category_filter;
pub mod contact_form;
pub mod loading;
pub mod nav_menu;
pub mod scroll_spy;
pub mod theme;
pub mod transport;

pub use category_filter::{Categorized, Category, CategoryFilter, FilterError, FilterOption, ALL};
pub use contact_form::{
    ContactForm, ContactPayload, Field, FieldError, FieldSet, SubmissionState, SubmissionTicket,
    SubmitButton, SubmitError, ValidationErrors,
};
pub use loading::LoadingScreen;
pub use nav_menu::NavMenu;
pub use scroll_spy::{ScrollSpy, ScrollSpyError, Section};
pub use theme::{ColorMode, Palette, ThemeError, ThemeState};
pub use transport::{ContactTransport, LoggingTransport, TransportError};
