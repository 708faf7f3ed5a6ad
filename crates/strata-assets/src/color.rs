//! Severity to display color.

use std::fmt;

use serde::{Deserialize, Serialize};
use strata_core::enums::Severity;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Color a model is painted with once its component reaches `severity`.
#[must_use]
pub const fn severity_color(severity: Severity) -> Rgb {
    match severity {
        Severity::Low => Rgb::new(0x2e, 0xa0, 0x43),
        Severity::Moderate | Severity::Medium => Rgb::new(0xf2, 0xc1, 0x2e),
        Severity::High => Rgb::new(0xf2, 0x7c, 0x1e),
        Severity::Critical => Rgb::new(0xd6, 0x28, 0x28),
        Severity::Unavailable => Rgb::new(0x80, 0x80, 0x80),
    }
}
