use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreferenceError {
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("button position must be finite")]
    NonFinitePosition,
}

/// Colour scheme preference. `System` defers to the OS setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Theme::System => "System",
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PreferenceError::UnknownTheme(other.to_string())),
        }
    }
}

/// Screen offset of the floating search button, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonPosition {
    pub x: f64,
    pub y: f64,
}

impl ButtonPosition {
    /// # Errors
    ///
    /// Returns `PreferenceError::NonFinitePosition` for NaN or infinite offsets.
    pub fn new(x: f64, y: f64) -> Result<Self, PreferenceError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(PreferenceError::NonFinitePosition);
        }
        Ok(Self { x, y })
    }
}
