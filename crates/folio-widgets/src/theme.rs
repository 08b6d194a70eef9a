#![forbid(unsafe_code)]

//! Color mode and palette selection.
//!
//! The page holds one [`ThemeState`] and passes it to whoever renders. The
//! host applies the result: a [`HostRequest::ApplyTheme`] swaps the palette
//! class on the document root and sets the color scheme.

use std::fmt;
use std::str::FromStr;

use folio_core::host::HostRequest;
use serde::Serialize;

/// Light/dark preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl ColorMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// The header toggle: dark goes light, anything else goes dark.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light | Self::System => Self::Dark,
        }
    }
}

/// The four colors a palette swatch shows, darkest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatches {
    pub dark: &'static str,
    pub medium: &'static str,
    pub light: &'static str,
    pub accent: &'static str,
}

/// Named color palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    Ocean,
    DeepBlue,
    Nature,
    Classic,
}

impl Palette {
    pub const ALL: [Self; 4] = [Self::Ocean, Self::DeepBlue, Self::Nature, Self::Classic];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ocean => "Ocean Blue",
            Self::DeepBlue => "Deep Blue",
            Self::Nature => "Nature Green",
            Self::Classic => "Classic Navy",
        }
    }

    /// CSS class applied to the document root.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Ocean => "theme-ocean",
            Self::DeepBlue => "theme-deep-blue",
            Self::Nature => "theme-nature",
            Self::Classic => "theme-classic",
        }
    }

    #[must_use]
    pub const fn swatches(self) -> Swatches {
        match self {
            Self::Ocean => Swatches {
                dark: "#213448",
                medium: "#547792",
                light: "#94B4C1",
                accent: "#ECEFCA",
            },
            Self::DeepBlue => Swatches {
                dark: "#021526",
                medium: "#03346E",
                light: "#6EACDA",
                accent: "#E2E2B6",
            },
            Self::Nature => Swatches {
                dark: "#99BC85",
                medium: "#E4EFE7",
                light: "#FDFAF6",
                accent: "#FAF1E6",
            },
            Self::Classic => Swatches {
                dark: "#123458",
                medium: "#D4C9BE",
                light: "#F1EFEC",
                accent: "#030303",
            },
        }
    }
}

/// A palette or mode name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    UnknownPalette(String),
    UnknownMode(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPalette(name) => write!(f, "unknown palette: {name:?}"),
            Self::UnknownMode(name) => write!(f, "unknown color mode: {name:?}"),
        }
    }
}

impl std::error::Error for ThemeError {}

impl FromStr for Palette {
    type Err = ThemeError;

    /// Accepts the CSS class (`theme-nature`) or the bare name (`nature`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("theme-").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|p| &p.class()["theme-".len()..] == name)
            .ok_or_else(|| ThemeError::UnknownPalette(s.to_string()))
    }
}

impl FromStr for ColorMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(ThemeError::UnknownMode(other.to_string())),
        }
    }
}

/// Current mode and palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThemeState {
    pub mode: ColorMode,
    pub palette: Palette,
}

impl ThemeState {
    /// Switch palette and return what the host must apply.
    pub fn select_palette(&mut self, palette: Palette) -> HostRequest {
        if palette != self.palette {
            tracing::debug!(from = self.palette.class(), to = palette.class(), "palette changed");
        }
        self.palette = palette;
        self.request()
    }

    pub fn set_mode(&mut self, mode: ColorMode) -> HostRequest {
        self.mode = mode;
        self.request()
    }

    pub fn toggle_mode(&mut self) -> HostRequest {
        self.set_mode(self.mode.toggled())
    }

    /// The request that brings the host in line with this state.
    #[must_use]
    pub fn request(&self) -> HostRequest {
        HostRequest::ApplyTheme {
            palette_class: self.palette.class().to_string(),
            color_scheme: self.mode.as_str().to_string(),
        }
    }
}
