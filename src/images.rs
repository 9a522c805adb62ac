use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};
use serde_with::{DeserializeFromStr, SerializeDisplay};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImageKind {
    Model,
    Prod,
    Life,
}

impl ImageKind {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Prod => "prod",
            Self::Life => "life",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ImageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "model" => Self::Model,
            "prod" => Self::Prod,
            "life" => Self::Life,
            _ => bail!("Unknown image kind: {s}"),
        })
    }
}

/// Role of a product image, e.g. `model1` or `prod2`.
///
/// The digits are kept as written, so `model01` and `model1` are different
/// tokens.
#[derive(
    Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, DeserializeFromStr, SerializeDisplay,
)]
pub struct ImageToken {
    kind: ImageKind,
    digits: String,
}

impl ImageToken {
    pub fn new(kind: ImageKind, number: u32) -> Self {
        Self {
            kind,
            digits: number.to_string(),
        }
    }

    /// The image used to represent a product in the feed.
    pub fn primary() -> Self {
        Self::new(ImageKind::Model, 1)
    }
}

impl fmt::Display for ImageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.digits)
    }
}

impl FromStr for ImageToken {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .with_context(|| format!("Image token has no number: {s}"))?;
        let (kind, digits) = s.split_at(split);
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            bail!("Image token has trailing characters: {s}");
        }

        Ok(Self {
            kind: kind.parse()?,
            digits: digits.to_string(),
        })
    }
}

/// Classify an image URL or path by its `_<kind><digits>` suffix.
pub fn classify(image: &str) -> Option<ImageToken> {
    let (_, suffix) = image.rsplit_once('_')?;
    suffix.parse().ok()
}
