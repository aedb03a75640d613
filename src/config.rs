//! # Configuration
//!
//! Optional JSON file layered over the built-in templates and colour table.
//!
//! ```text
//! {
//!   "templates": {
//!     "3x8": { "rows": 8, "columns": 3, "width_mm": 63.5, "height_mm": 33.9,
//!              "left_margin_mm": 7.0, "gap_mm": 2.5, "bottom_margin_mm": 12.9,
//!              "registration": [-6, 0], "aliases": ["L7160"] }
//!   },
//!   "colours": { "blue": [0.0, 0.2, 0.8] },
//!   "defaults": { "template": "3x8", "font": "Times Roman", "size": 10,
//!                 "colour": "navy", "category": "family" }
//! }
//! ```
//!
//! Every section is optional. A template with a built-in name replaces the
//! built-in; colours replace entries of the default substitution table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{LabelError, Result};
use crate::scene::{Colour, ColourTable, NamedColour, Rgb, Typeface};
use crate::sheet::template::{DEFAULT_TEMPLATE, Dimensions, Template, TemplateRegistry};

/// Settings used when the command line leaves them open.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub template: String,
    pub typeface: Typeface,
    pub colour: Colour,
    pub category: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            typeface: Typeface::default(),
            colour: Colour::default(),
            category: "family".to_string(),
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub templates: TemplateRegistry,
    pub colours: ColourTable,
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates: TemplateRegistry::builtin(),
            colours: ColourTable::default(),
            defaults: Defaults::default(),
        }
    }
}

// ============================================================================
// FILE FORMAT
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    templates: BTreeMap<String, TemplateSpec>,
    #[serde(default)]
    colours: BTreeMap<String, [f32; 3]>,
    defaults: Option<DefaultsSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateSpec {
    rows: u32,
    columns: u32,
    width_mm: f32,
    height_mm: f32,
    #[serde(default)]
    left_margin_mm: f32,
    #[serde(default)]
    gap_mm: f32,
    #[serde(default)]
    bottom_margin_mm: f32,
    registration: Option<[f32; 2]>,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefaultsSpec {
    template: Option<String>,
    font: Option<String>,
    size: Option<f32>,
    colour: Option<Colour>,
    category: Option<String>,
}

impl TemplateSpec {
    fn into_template(self, name: &str) -> Result<(Template, Vec<String>)> {
        let dims = Dimensions::new(
            self.width_mm,
            self.height_mm,
            self.left_margin_mm,
            self.gap_mm,
            self.bottom_margin_mm,
        );
        let mut template = Template::from_mm(name, self.columns, self.rows, dims)?;
        if let Some([h, v]) = self.registration {
            template = template.with_registration(h, v);
        }
        Ok((template, self.aliases))
    }
}

// ============================================================================
// LOADING
// ============================================================================

impl Config {
    /// Parse a JSON document and merge it over the built-ins.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_json::from_str(text).map_err(|e| LabelError::Config(e.to_string()))?;
        let mut config = Config::default();
        config.merge(file)?;
        Ok(config)
    }

    /// Load from `path`, or the built-ins when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| LabelError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&text).map_err(|e| match e {
            LabelError::Config(msg) => LabelError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        debug!(
            path = %path.display(),
            templates = config.templates.len(),
            colours = config.colours.len(),
            "loaded config"
        );
        Ok(config)
    }

    fn merge(&mut self, file: ConfigFile) -> Result<()> {
        for (name, spec) in file.templates {
            let (template, aliases) = spec
                .into_template(&name)
                .map_err(|e| LabelError::Config(e.to_string()))?;
            self.templates.insert(template);
            for code in aliases {
                self.templates.alias(code, name.as_str());
            }
        }

        for (name, [r, g, b]) in file.colours {
            let named: NamedColour = name.parse().map_err(LabelError::Config)?;
            self.colours.insert(named, Rgb::new(r, g, b));
        }

        if let Some(defaults) = file.defaults {
            if let Some(template) = defaults.template {
                if !self.templates.contains(&template) {
                    return Err(LabelError::Config(format!(
                        "default template '{}' is not defined",
                        template
                    )));
                }
                self.defaults.template = template;
            }
            if let Some(font) = defaults.font {
                if !font.trim().is_empty() {
                    self.defaults.typeface.family = font;
                }
            }
            if let Some(size) = defaults.size {
                if size > 0.0 {
                    self.defaults.typeface.size = size;
                }
            }
            if let Some(colour) = defaults.colour {
                self.defaults.colour = colour;
            }
            if let Some(category) = defaults.category {
                self.defaults.category = category;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_builtin() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.templates.len(), TemplateRegistry::builtin().len());
        assert_eq!(config.colours, ColourTable::default());
        assert_eq!(config.defaults, Defaults::default());
    }

    #[test]
    fn test_template_and_alias() {
        let config = Config::from_json(
            r#"{"templates": {"3x8": {"rows": 8, "columns": 3, "width_mm": 63.5,
                "height_mm": 33.9, "left_margin_mm": 7.0, "gap_mm": 2.5,
                "bottom_margin_mm": 12.9, "registration": [-6, 0], "aliases": ["L7160"]}}}"#,
        )
        .unwrap();
        let t = config.templates.get("L7160").unwrap();
        assert_eq!(t.name, "3x8");
        assert_eq!(t.slot_count(), 24);
        assert_eq!(t.registration, (-6.0, 0.0));
        assert!(config.templates.contains("3x7"));
    }

    #[test]
    fn test_colour_override() {
        let json = r#"{"colours": {"Blue": [0, 0.2, 0.8], "grey 22": [0.1, 0.1, 0.1]}}"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.colours.get(NamedColour::Blue), Some(Rgb::new(0.0, 0.2, 0.8)));
        assert_eq!(config.colours.get(NamedColour::Grey22), Some(Rgb::new(0.1, 0.1, 0.1)));
        assert_eq!(config.colours.get(NamedColour::Red), Some(Rgb::new(0.9, 0.1, 0.1)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_json(
            r#"{"defaults": {"template": "2x4", "font": "Times Roman", "size": 10,
                "colour": "navy"}}"#,
        )
        .unwrap();
        assert_eq!(config.defaults.template, "2x4");
        assert_eq!(config.defaults.typeface, Typeface::new("Times Roman", 10.0));
        assert_eq!(config.defaults.colour, Colour::Named(NamedColour::Navy));
        assert_eq!(config.defaults.category, "family");
    }

    #[test]
    fn test_errors_are_config_errors() {
        for bad in [
            "not json",
            r#"{"colours": {"mauve": [1, 0, 1]}}"#,
            r#"{"templates": {"x": {"rows": 0, "columns": 2, "width_mm": 10, "height_mm": 10}}}"#,
            r#"{"defaults": {"template": "nope"}}"#,
            r#"{"printers": []}"#,
        ] {
            assert!(matches!(Config::from_json(bad), Err(LabelError::Config(_))), "{}", bad);
        }
    }

    #[test]
    fn test_load_from_file() {
        assert_eq!(Config::load(None).unwrap().defaults, Defaults::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"defaults": {{"category": "work"}}}}"#).unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.defaults.category, "work");

        let missing = file.path().with_extension("missing");
        assert!(matches!(Config::load(Some(&missing)), Err(LabelError::Config(_))));
    }
}
