//! Garment sizes offered by the size selector.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a [`Size`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    /// No size was chosen.
    #[error("no size selected")]
    Missing,
    /// The token is not one of the offered sizes.
    #[error("unknown size: {0}")]
    Unknown(String),
}

/// One of the four sizes every garment is offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    S,
    M,
    L,
    XL,
}

impl Size {
    /// All sizes in selector order.
    pub const ALL: [Self; 4] = [Self::S, Self::M, Self::L, Self::XL];

    /// The label shown on the selector button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
        }
    }

    /// Parse an optional form value.
    ///
    /// A missing or blank value is [`SizeError::Missing`], which the storefront
    /// surfaces as a "select a size" prompt rather than a bad request.
    ///
    /// # Errors
    ///
    /// Returns [`SizeError::Missing`] for `None` or blank input and
    /// [`SizeError::Unknown`] for anything that is not a size label.
    pub fn from_form(value: Option<&str>) -> Result<Self, SizeError> {
        match value.map(str::trim) {
            None | Some("") => Err(SizeError::Missing),
            Some(token) => token.parse(),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" => Err(SizeError::Missing),
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::XL),
            _ => Err(SizeError::Unknown(s.to_string())),
        }
    }
}
