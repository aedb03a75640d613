//! # Colours
//!
//! Scenes refer to colours by name ([`NamedColour`]) or by explicit RGB.
//! At emission time every named colour goes through a [`ColourTable`]:
//! names present in the table are replaced by the table's device colour,
//! the rest resolve to their standard X11 value.
//!
//! ## Default Substitutions
//!
//! | Name | Device RGB |
//! |------|------------|
//! | blue | 0.1 0.1 0.9 |
//! | green | 0.1 0.7 0.1 |
//! | red | 0.9 0.1 0.1 |
//!
//! Pure X11 primaries print harshly on most inkjets, hence the table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A device colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From 8-bit components.
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Clamp every component into `0.0..=1.0`.
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

macro_rules! named_colours {
    ($($variant:ident => $name:literal, ($r:literal, $g:literal, $b:literal);)*) => {
        /// The fixed set of colour names a scene may use.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NamedColour {
            $($variant,)*
        }

        impl NamedColour {
            /// Every named colour, in declaration order.
            pub const ALL: &'static [NamedColour] = &[$(NamedColour::$variant,)*];

            /// Canonical lowercase name.
            pub fn name(self) -> &'static str {
                match self {
                    $(NamedColour::$variant => $name,)*
                }
            }

            /// Standard X11 value, used when the table has no substitution.
            pub fn native(self) -> Rgb {
                match self {
                    $(NamedColour::$variant => Rgb::from_bytes($r, $g, $b),)*
                }
            }
        }
    };
}

named_colours! {
    Black => "black", (0, 0, 0);
    White => "white", (255, 255, 255);
    Red => "red", (255, 0, 0);
    Green => "green", (0, 255, 0);
    Blue => "blue", (0, 0, 255);
    Yellow => "yellow", (255, 255, 0);
    Orange => "orange", (255, 165, 0);
    Brown => "brown", (165, 42, 42);
    Purple => "purple", (160, 32, 240);
    Navy => "navy", (0, 0, 128);
    DarkGreen => "darkgreen", (0, 100, 0);
    Grey22 => "grey22", (56, 56, 56);
    Grey64 => "grey64", (163, 163, 163);
    Grey81 => "grey81", (207, 207, 207);
    Grey88 => "grey88", (224, 224, 224);
    Azure => "azure", (240, 255, 255);
    BlanchedAlmond => "blanchedalmond", (255, 235, 205);
    LemonChiffon => "lemonchiffon", (255, 250, 205);
}

impl FromStr for NamedColour {
    type Err = String;

    /// Case-insensitive; spaces are ignored and "gray" spells "grey".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
            .replace("gray", "grey");
        NamedColour::ALL
            .iter()
            .copied()
            .find(|c| c.name() == key)
            .ok_or_else(|| format!("Unknown colour '{}'", s))
    }
}

impl fmt::Display for NamedColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A colour as written in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Colour {
    Named(NamedColour),
    Rgb(Rgb),
}

impl Colour {
    pub const BLACK: Colour = Colour::Named(NamedColour::Black);
}

impl Default for Colour {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<NamedColour> for Colour {
    fn from(named: NamedColour) -> Self {
        Colour::Named(named)
    }
}

impl From<Rgb> for Colour {
    fn from(rgb: Rgb) -> Self {
        Colour::Rgb(rgb)
    }
}

impl FromStr for Colour {
    type Err = String;

    /// Accepts a colour name or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(format!("Invalid hex colour '{}'", s));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|_| format!("Invalid hex colour '{}'", s))
            };
            return Ok(Colour::Rgb(Rgb::from_bytes(channel(0)?, channel(2)?, channel(4)?)));
        }
        s.parse::<NamedColour>().map(Colour::Named)
    }
}

impl TryFrom<String> for Colour {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::Named(named) => write!(f, "{}", named),
            Colour::Rgb(rgb) => {
                let c = rgb.clamped();
                write!(
                    f,
                    "#{:02x}{:02x}{:02x}",
                    (c.r * 255.0).round() as u8,
                    (c.g * 255.0).round() as u8,
                    (c.b * 255.0).round() as u8
                )
            }
        }
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

/// Substitutions applied to named colours during emission.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourTable {
    entries: HashMap<NamedColour, Rgb>,
}

impl ColourTable {
    /// A table with no substitutions: every name resolves natively.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace a substitution.
    pub fn with(mut self, named: NamedColour, rgb: Rgb) -> Self {
        self.insert(named, rgb);
        self
    }

    pub fn insert(&mut self, named: NamedColour, rgb: Rgb) {
        self.entries.insert(named, rgb.clamped());
    }

    /// Substitution for a name, if any.
    pub fn get(&self, named: NamedColour) -> Option<Rgb> {
        self.entries.get(&named).copied()
    }

    /// Device colour for a scene colour.
    pub fn resolve(&self, colour: Colour) -> Rgb {
        match colour {
            Colour::Named(named) => self.get(named).unwrap_or_else(|| named.native()),
            Colour::Rgb(rgb) => rgb.clamped(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ColourTable {
    fn default() -> Self {
        Self::empty()
            .with(NamedColour::Blue, Rgb::new(0.1, 0.1, 0.9))
            .with(NamedColour::Green, Rgb::new(0.1, 0.7, 0.1))
            .with(NamedColour::Red, Rgb::new(0.9, 0.1, 0.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("Blue".parse::<Colour>(), Ok(Colour::Named(NamedColour::Blue)));
        assert_eq!(
            "Blanched Almond".parse::<NamedColour>(),
            Ok(NamedColour::BlanchedAlmond)
        );
        assert_eq!("gray64".parse::<NamedColour>(), Ok(NamedColour::Grey64));
        assert!("chartreuse".parse::<Colour>().is_err());
    }

    #[test]
    fn test_parse_hex() {
        let c: Colour = "#ff8000".parse().unwrap();
        assert_eq!(c, Colour::Rgb(Rgb::from_bytes(255, 128, 0)));
        assert_eq!(c.to_string(), "#ff8000");
        assert!("#ff80".parse::<Colour>().is_err());
        assert!("#gg0000".parse::<Colour>().is_err());
    }

    #[test]
    fn test_default_table_substitutes() {
        let table = ColourTable::default();
        assert_eq!(table.resolve(NamedColour::Blue.into()), Rgb::new(0.1, 0.1, 0.9));
        assert_eq!(table.resolve(NamedColour::Red.into()), Rgb::new(0.9, 0.1, 0.1));
    }

    #[test]
    fn test_unlisted_colour_passes_through() {
        let table = ColourTable::default();
        assert_eq!(table.resolve(Colour::BLACK), Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(
            table.resolve(NamedColour::Grey64.into()),
            NamedColour::Grey64.native()
        );
    }

    #[test]
    fn test_serde_as_string() {
        let c: Colour = serde_json::from_str("\"navy\"").unwrap();
        assert_eq!(c, Colour::Named(NamedColour::Navy));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"navy\"");
    }

    #[test]
    fn test_all_names_round_trip() {
        for named in NamedColour::ALL {
            assert_eq!(named.name().parse::<NamedColour>(), Ok(*named));
        }
    }
}
