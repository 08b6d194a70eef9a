#![forbid(unsafe_code)]

//! Folio public facade crate.
//!
//! Re-exports the page stores, the runtime, and (with the `web` feature) the
//! host-driven runner, plus a prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::{Bounds, Event, HostRequest, ScrollBehavior, StaticViewport, Viewport};

// --- Runtime re-exports ----------------------------------------------------

pub use folio_runtime::{Cmd, Model, ProgramSimulator, TimerKey};

// --- Store re-exports ------------------------------------------------------

pub use folio_widgets::{
    Categorized, CategoryFilter, ColorMode, ContactForm, ContactPayload, ContactTransport, Field,
    FilterError, LoggingTransport, Palette, ScrollSpy, ScrollSpyError, Section, SubmissionState,
    SubmitError, ThemeError, ThemeState, TransportError,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use folio_web::{
    PageMsg, PageView, PortfolioConfig, PortfolioPage, StepProgram, StepResult, WebBackendError,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// A filter tag that is not declared.
    Filter(FilterError),
    /// A contact submission that was refused.
    Submit(SubmitError),
    /// An invalid section set.
    Sections(ScrollSpyError),
    /// An unknown palette or color mode.
    Theme(ThemeError),
    /// A host runner failure.
    #[cfg(feature = "web")]
    Web(WebBackendError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(err) => write!(f, "{err}"),
            Self::Submit(err) => write!(f, "{err}"),
            Self::Sections(err) => write!(f, "{err}"),
            Self::Theme(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Web(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(err) => Some(err),
            Self::Submit(err) => Some(err),
            Self::Sections(err) => Some(err),
            Self::Theme(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Web(err) => Some(err),
        }
    }
}

impl From<FilterError> for Error {
    fn from(err: FilterError) -> Self {
        Self::Filter(err)
    }
}

impl From<SubmitError> for Error {
    fn from(err: SubmitError) -> Self {
        Self::Submit(err)
    }
}

impl From<ScrollSpyError> for Error {
    fn from(err: ScrollSpyError) -> Self {
        Self::Sections(err)
    }
}

impl From<ThemeError> for Error {
    fn from(err: ThemeError) -> Self {
        Self::Theme(err)
    }
}

#[cfg(feature = "web")]
impl From<WebBackendError> for Error {
    fn from(err: WebBackendError) -> Self {
        Self::Web(err)
    }
}

/// Standard result type for folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build the page over `viewport`, wrap it in a step program sized
/// `width` x `height`, and run `init`.
#[cfg(feature = "web")]
pub fn launch<V: Viewport>(
    config: PortfolioConfig,
    viewport: V,
    width: u32,
    height: u32,
) -> Result<StepProgram<PortfolioPage<V>>> {
    let page = PortfolioPage::new(config, viewport)?;
    let mut program =
        StepProgram::new(page, width, height).with_scroll_interval(config.scroll_throttle);
    program.init()?;
    Ok(program)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cmd, ContactPayload, Error, Event, Field, HostRequest, Model, Palette, Result,
        StaticViewport, Viewport,
    };

    #[cfg(feature = "web")]
    pub use crate::{PageMsg, PortfolioConfig, PortfolioPage, StepProgram};

    pub use crate::{core, runtime, widgets};

    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use folio_core as core;
pub use folio_runtime as runtime;
#[cfg(feature = "web")]
pub use folio_web as web;
pub use folio_widgets as widgets;

#[cfg(all(test, feature = "web"))]
mod tests {
    use super::*;

    #[test]
    fn launch_renders_first_view() {
        let viewport = StaticViewport::stacked(800, [("home", 900), ("about", 900)]);
        let program = launch(PortfolioConfig::default(), viewport, 1280, 800).unwrap();
        assert!(program.is_initialized());
        assert!(program.outputs().view_json.is_some());
    }

    #[test]
    fn store_errors_convert() {
        let err: Error = "theme-sunset".parse::<Palette>().unwrap_err().into();
        assert_eq!(err.to_string(), "unknown palette: \"theme-sunset\"");
        assert!(std::error::Error::source(&err).is_some());

        let err = Error::from(SubmitError::InFlight);
        assert!(matches!(err, Error::Submit(SubmitError::InFlight)));
    }
}
