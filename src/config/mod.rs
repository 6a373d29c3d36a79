//! Reads per-cell parameter overrides and plot settings from TOML.
//!
//! ```toml
//! [plot]
//! width = 800
//! height = 900
//!
//! [cell_a]
//! cell_id = 0
//! reset = ["gbar_kdr"]
//!
//! [cell_a.biophysics]
//! gbar_na = 0.5
//! gbar_cat = 0.0
//! ```

use std::{collections::BTreeMap, fs::read_to_string, path::Path};
use toml::{from_str, Value};
use crate::error::ConfigError;
use crate::parameter::Attributes;


fn parse_f64(value: &Value, field_name: &str) -> Result<f64, ConfigError> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Integer(v) => Ok(*v as f64),
        _ => Err(ConfigError::InvalidField(field_name.to_string())),
    }
}

fn parse_i32(value: &Value, field_name: &str) -> Result<i32, ConfigError> {
    value
        .as_integer()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| ConfigError::InvalidField(field_name.to_string()))
}

fn parse_u32(value: &Value, field_name: &str) -> Result<u32, ConfigError> {
    value
        .as_integer()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| ConfigError::InvalidField(field_name.to_string()))
}

fn parse_string(value: &Value, field_name: &str) -> Result<String, ConfigError> {
    value
        .as_str()
        .ok_or_else(|| ConfigError::InvalidField(field_name.to_string()))
        .map(String::from)
}

fn parse_value_with_default<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigError>,
    default: T,
) -> Result<T, ConfigError> {
    table
        .get(key)
        .map_or(Ok(default), |value| parser(value, key))
}

/// Width and height must be given together and both be nonzero,
/// a plot table without either leaves the size to the plotting default
fn parse_figsize(plot: &Value) -> Result<Option<(u32, u32)>, ConfigError> {
    let width = plot.get("width").map(|value| parse_u32(value, "plot.width")).transpose()?;
    let height = plot.get("height").map(|value| parse_u32(value, "plot.height")).transpose()?;

    match (width, height) {
        (None, None) => Ok(None),
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok(Some((width, height))),
        _ => Err(ConfigError::InvalidField(String::from("plot"))),
    }
}

/// Parameter overrides for one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellConfig {
    /// Identifier passed to plotting, above zero is drawn as "Cell B"
    pub cell_id: i32,
    /// Explicit values plus names to restore to their defaults
    pub attributes: Attributes,
}

impl CellConfig {
    fn from_table(name: &str, table: &Value) -> Result<Self, ConfigError> {
        let cell_id = parse_value_with_default(table, "cell_id", parse_i32, 0)?;

        let mut attributes = Attributes::new();

        if let Some(reset) = table.get("reset") {
            let field_name = format!("{}.reset", name);
            let names = reset.as_array()
                .ok_or_else(|| ConfigError::InvalidField(field_name.clone()))?;

            for value in names {
                attributes.insert(&parse_string(value, &field_name)?, None);
            }
        }

        if let Some(biophysics) = table.get("biophysics") {
            let values = biophysics.as_table()
                .ok_or_else(|| ConfigError::InvalidField(format!("{}.biophysics", name)))?;

            for (key, value) in values {
                let field_name = format!("{}.biophysics.{}", name, key);
                attributes.insert(key, Some(parse_f64(value, &field_name)?));
            }
        }

        Ok(CellConfig { cell_id, attributes })
    }
}

/// Every cell table and the plot settings of a config file
#[derive(Debug, Clone, PartialEq)]
pub struct HcoConfig {
    pub cells: BTreeMap<String, CellConfig>,
    /// Figure width and height in pixels, `None` uses the plotting default
    pub figsize: Option<(u32, u32)>,
}

impl HcoConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Value = from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let root = config.as_table()
            .ok_or_else(|| ConfigError::Parse(String::from("root is not a table")))?;

        let figsize = match root.get("plot") {
            Some(plot) => parse_figsize(plot)?,
            None => None,
        };

        let mut cells = BTreeMap::new();
        for (name, table) in root.iter().filter(|(name, _)| name.as_str() != "plot") {
            if !table.is_table() {
                return Err(ConfigError::InvalidField(name.clone()));
            }

            cells.insert(name.clone(), CellConfig::from_table(name, table)?);
        }

        Ok(HcoConfig { cells, figsize })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;

        HcoConfig::from_toml_str(&content)
    }

    pub fn cell(&self, name: &str) -> Result<&CellConfig, ConfigError> {
        self.cells.get(name)
            .ok_or_else(|| ConfigError::MissingTable(name.to_string()))
    }
}
