//! Decode layout files
//!
//! A layout lists the fields to pull from a buffer, in order:
//!
//! ```toml
//! offset = 0
//!
//! [[fields]]
//! name = "vertex_count"
//! kind = "u32"
//!
//! [[fields]]
//! kind = "skip:4"
//!
//! [[fields]]
//! name = "model"
//! kind = "mat4"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Kind of a single field in a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum FieldKind {
    U16,
    U32,
    U64,
    F32,
    /// 16 column-major `f32` values widened to a `Matrix4`
    Mat4,
    /// Padding bytes to step over
    Skip(usize),
}

impl FieldKind {
    /// Number of bytes the field occupies
    pub fn width(self) -> usize {
        match self {
            FieldKind::U16 => 2,
            FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::U64 => 8,
            FieldKind::Mat4 => 64,
            FieldKind::Skip(n) => n,
        }
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u16" => Ok(FieldKind::U16),
            "u32" => Ok(FieldKind::U32),
            "u64" => Ok(FieldKind::U64),
            "f32" => Ok(FieldKind::F32),
            "mat4" => Ok(FieldKind::Mat4),
            other => match other.strip_prefix("skip:") {
                Some(n) => n
                    .parse()
                    .map(FieldKind::Skip)
                    .map_err(|_| format!("invalid skip count in '{s}'")),
                None => Err(format!(
                    "unknown field kind '{s}' (expected u16, u32, u64, f32, mat4, or skip:<n>)"
                )),
            },
        }
    }
}

impl TryFrom<String> for FieldKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::U16 => write!(f, "u16"),
            FieldKind::U32 => write!(f, "u32"),
            FieldKind::U64 => write!(f, "u64"),
            FieldKind::F32 => write!(f, "f32"),
            FieldKind::Mat4 => write!(f, "mat4"),
            FieldKind::Skip(n) => write!(f, "skip:{n}"),
        }
    }
}

/// One named field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub kind: FieldKind,
}

impl From<FieldKind> for FieldSpec {
    fn from(kind: FieldKind) -> Self {
        Self { name: None, kind }
    }
}

/// Ordered field list plus a starting offset
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Layout {
    /// Load a layout from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid layout: {}", path.display()))
    }

    /// Parse a layout from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Total bytes the layout consumes after its offset
    pub fn byte_len(&self) -> usize {
        self.fields.iter().map(|f| f.kind.width()).sum()
    }
}
