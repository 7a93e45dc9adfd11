use palette::Srgb;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An sRGB colour parsed from `#rgb`, `#rrggbb` or a CSS colour name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub Srgb<u8>);

impl Color {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Srgb::<u8>::from_str(value).ok().map(Self);
        }
        palette::named::from_str(&value.to_ascii_lowercase()).map(Self)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Stroke {
    Solid { color: Color },
    Gradient { from: Color, to: Color },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyle {
    pub stroke: Stroke,
    pub width: f64,
    pub opacity: f64,
    pub dasharray: Option<String>,
}

impl LinkStyle {
    pub fn solid(color: Color) -> Self {
        Self {
            stroke: Stroke::Solid { color },
            width: 1.0,
            opacity: 1.0,
            dasharray: None,
        }
    }
}
