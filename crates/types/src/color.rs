use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color. Serialized as a `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0`, the form PDF color operators expect.
    pub fn to_unit_rgb(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Parses `#RRGGBB`, or the `#RGB` shorthand where each digit is doubled.
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;
        let digits: Vec<char> = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.chars().collect(),
            n => return Err(format!("Invalid hex color length: expected 3 or 6, got {}", n)),
        };
        let mut channels = [0u8; 3];
        for (channel, pair) in channels.iter_mut().zip(digits.chunks(2)) {
            let pair: String = pair.iter().collect();
            *channel = u8::from_str_radix(&pair, 16)
                .map_err(|e| format!("Invalid color component '{}': {}", pair, e))?;
        }
        let [r, g, b] = channels;
        Ok(Color { r, g, b })
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse_hex(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::parse_hex("#295bac"), Ok(Color::rgb(0x29, 0x5b, 0xac)));
        assert_eq!(Color::parse_hex("#fff"), Ok(Color::WHITE));
        assert!(Color::parse_hex("295bac").is_err());
        assert!(Color::parse_hex("#12345").is_err());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let color: Color = serde_json::from_str("\"#f5f9ff\"").unwrap();
        assert_eq!(color, Color::rgb(0xf5, 0xf9, 0xff));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#f5f9ff\"");
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn unit_rgb_scales_components() {
        assert_eq!(Color::WHITE.to_unit_rgb(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.to_unit_rgb(), [0.0, 0.0, 0.0]);
    }
}
