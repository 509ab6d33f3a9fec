// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared settings and their resolution into an immutable [`Settings`] value.
//!
//! Each plot kind declares a [`SettingsSchema`]: a list of [`SettingDef`]s
//! naming a key, the [`SettingKind`] of its value and a default. A host hands
//! values to the plugin through a [`SettingsResolver`]; the plugin resolves
//! them against its schema once, at configuration time.

use std::collections::BTreeMap;
use std::fmt;

use kurbo::Vec2;
use plotstory_transform::{ScaleSpec, SharedScale};
use serde::{Deserialize, Serialize};

use crate::data::Boundaries;
use crate::error::ConfigurationError;

/// Space between the surface edges and the plot area, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Left margin.
    #[serde(default)]
    pub left: f64,
    /// Top margin.
    #[serde(default)]
    pub top: f64,
    /// Right margin.
    #[serde(default)]
    pub right: f64,
    /// Bottom margin.
    #[serde(default)]
    pub bottom: f64,
}

impl Margins {
    /// Same margin on every side.
    pub const fn uniform(m: f64) -> Self {
        Self {
            left: m,
            top: m,
            right: m,
            bottom: m,
        }
    }

    /// Offset of the plot area's origin.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// Kind of value a setting holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SettingKind {
    /// A number.
    Number,
    /// Free text.
    Text,
    /// A CSS color string.
    Color,
    /// A list of names.
    List,
    /// See [`Margins`].
    Margins,
    /// See [`Boundaries`].
    Boundaries,
    /// A scale function.
    Scale,
}

/// A setting value.
#[derive(Clone, Debug)]
pub enum SettingValue {
    /// [`SettingKind::Number`].
    Number(f64),
    /// [`SettingKind::Text`] or [`SettingKind::Color`].
    Text(String),
    /// [`SettingKind::List`].
    List(Vec<String>),
    /// [`SettingKind::Margins`].
    Margins(Margins),
    /// [`SettingKind::Boundaries`].
    Boundaries(Boundaries),
    /// [`SettingKind::Scale`].
    Scale(SharedScale),
}

impl SettingValue {
    /// Whether this value may be stored in a setting of `kind`.
    pub fn fits(&self, kind: SettingKind) -> bool {
        matches!(
            (self, kind),
            (Self::Number(_), SettingKind::Number)
                | (Self::Text(_), SettingKind::Text | SettingKind::Color)
                | (Self::List(_), SettingKind::List)
                | (Self::Margins(_), SettingKind::Margins)
                | (Self::Boundaries(_), SettingKind::Boundaries)
                | (Self::Scale(_), SettingKind::Scale)
        )
    }
}

/// Default of a setting with no resolved value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SettingDefault {
    /// Fixed number.
    Number(f64),
    /// Fixed text or color.
    Text(&'static str),
    /// Fixed margins.
    Margins(Margins),
    /// Derived from the data at draw time.
    Derived,
}

/// Declaration of one setting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SettingDef {
    /// Key the host uses.
    pub key: &'static str,
    /// Kind of value.
    pub kind: SettingKind,
    /// Used when the host provides nothing.
    pub default: SettingDefault,
    /// Human-readable name.
    pub label: &'static str,
}

impl SettingDef {
    /// Same setting with another default.
    #[must_use]
    pub const fn with_default(mut self, default: SettingDefault) -> Self {
        self.default = default;
        self
    }
}

/// Settings shared by the plot kinds.
pub mod predefined {
    use super::{Margins, SettingDef, SettingDefault, SettingKind};

    const fn def(
        key: &'static str,
        kind: SettingKind,
        default: SettingDefault,
        label: &'static str,
    ) -> SettingDef {
        SettingDef {
            key,
            kind,
            default,
            label,
        }
    }

    /// Space around the plot area.
    pub const MARGINS: SettingDef = def(
        "margins",
        SettingKind::Margins,
        SettingDefault::Margins(Margins::uniform(20.0)),
        "margins",
    );
    /// Surface width in pixels.
    pub const WIDTH: SettingDef = def(
        "width",
        SettingKind::Number,
        SettingDefault::Number(400.0),
        "width",
    );
    /// Surface height in pixels.
    pub const HEIGHT: SettingDef = def(
        "height",
        SettingKind::Number,
        SettingDefault::Number(300.0),
        "height",
    );
    /// Column names bound to the axes.
    pub const COLS: SettingDef = def(
        "cols",
        SettingKind::List,
        SettingDefault::Derived,
        "columns",
    );
    /// Row info labels bound to the axes.
    pub const ROWS: SettingDef = def(
        "rows",
        SettingKind::List,
        SettingDefault::Derived,
        "rows",
    );
    /// Value layer label.
    pub const VALS: SettingDef = def(
        "vals",
        SettingKind::Text,
        SettingDefault::Derived,
        "values",
    );
    /// Range of the horizontal axis in data space.
    pub const X_BOUNDARIES: SettingDef = def(
        "xBoundaries",
        SettingKind::Boundaries,
        SettingDefault::Derived,
        "x boundaries",
    );
    /// Range of the vertical axis in data space (the color domain for heatmaps).
    pub const Y_BOUNDARIES: SettingDef = def(
        "yBoundaries",
        SettingKind::Boundaries,
        SettingDefault::Derived,
        "y boundaries",
    );
    /// Horizontal scale.
    pub const X_SCALE: SettingDef = def(
        "xScale",
        SettingKind::Scale,
        SettingDefault::Derived,
        "x scale",
    );
    /// Vertical scale.
    pub const Y_SCALE: SettingDef = def(
        "yScale",
        SettingKind::Scale,
        SettingDefault::Derived,
        "y scale",
    );
    /// Item radius as a fraction of the smaller surface dimension.
    pub const ITEM_RATIO: SettingDef = def(
        "itemRatio",
        SettingKind::Number,
        SettingDefault::Number(0.015),
        "item ratio",
    );
    /// Item fill color.
    pub const FILL: SettingDef = def(
        "fill",
        SettingKind::Color,
        SettingDefault::Text("#1e60d4"),
        "fill",
    );
    /// Item outline color.
    pub const STROKE: SettingDef = def(
        "stroke",
        SettingKind::Color,
        SettingDefault::Text("#1e1e1e"),
        "stroke",
    );
    /// Item outline width.
    pub const STROKE_THICKNESS: SettingDef = def(
        "strokeThickness",
        SettingKind::Number,
        SettingDefault::Number(0.0),
        "stroke thickness",
    );
    /// Highlighted item fill color.
    pub const SELECT_FILL: SettingDef = def(
        "selectFill",
        SettingKind::Color,
        SettingDefault::Text("#ff6520"),
        "select fill",
    );
    /// Highlighted item outline color.
    pub const SELECT_STROKE: SettingDef = def(
        "selectStroke",
        SettingKind::Color,
        SettingDefault::Text("#ffc600"),
        "select stroke",
    );
    /// Highlighted item outline width.
    pub const SELECT_STROKE_THICKNESS: SettingDef = def(
        "selectStrokeThickness",
        SettingKind::Number,
        SettingDefault::Number(2.0),
        "select stroke thickness",
    );
}

/// Settings declared by one plot kind.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsSchema {
    name: &'static str,
    defs: Vec<SettingDef>,
}

impl SettingsSchema {
    /// Schema `name` with the given declarations.
    ///
    /// A later declaration of a key replaces an earlier one.
    pub fn new(name: &'static str, defs: impl IntoIterator<Item = SettingDef>) -> Self {
        let mut out: Vec<SettingDef> = Vec::new();
        for def in defs {
            match out.iter_mut().find(|d| d.key == def.key) {
                Some(slot) => *slot = def,
                None => out.push(def),
            }
        }
        Self { name, defs: out }
    }

    /// Name of the plot kind.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declaration for `key`.
    pub fn get(&self, key: &str) -> Option<&SettingDef> {
        self.defs.iter().find(|d| d.key == key)
    }

    /// All declarations, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SettingDef> + '_ {
        self.defs.iter()
    }
}

/// Source of setting values, typically the host's configuration layer.
pub trait SettingsResolver {
    /// Current value of `key`, or `None` if the host has none.
    fn value(&self, key: &str) -> Option<SettingValue>;
}

impl SettingsResolver for BTreeMap<String, SettingValue> {
    fn value(&self, key: &str) -> Option<SettingValue> {
        self.get(key).cloned()
    }
}

/// Resolved, immutable settings of one plugin instance.
///
/// Holds a value for every declared key that the resolver provided or that
/// has a fixed default. Keys with [`SettingDefault::Derived`] and no provided
/// value are absent; they are computed from the data for each draw pass.
#[derive(Clone)]
pub struct Settings {
    schema: &'static str,
    values: BTreeMap<&'static str, SettingValue>,
}

impl Settings {
    /// Resolve every setting of `schema` through `resolver`.
    ///
    /// Values of the wrong kind are rejected; keys the schema does not declare are ignored.
    pub fn from_resolver<R: SettingsResolver + ?Sized>(
        schema: &SettingsSchema,
        resolver: &R,
    ) -> Result<Self, ConfigurationError> {
        let mut values = BTreeMap::new();
        for def in schema.iter() {
            let value = match resolver.value(def.key) {
                Some(v) if v.fits(def.kind) => v,
                Some(_) => {
                    return Err(ConfigurationError::WrongKind {
                        key: def.key,
                        expected: def.kind,
                    });
                }
                None => match def.default {
                    SettingDefault::Number(n) => SettingValue::Number(n),
                    SettingDefault::Text(t) => SettingValue::Text(t.to_owned()),
                    SettingDefault::Margins(m) => SettingValue::Margins(m),
                    SettingDefault::Derived => continue,
                },
            };
            values.insert(def.key, value);
        }
        Ok(Self {
            schema: schema.name(),
            values,
        })
    }

    /// Resolve `schema` from a JSON object, interpreting each member by its declared kind.
    ///
    /// Scales are given as [`ScaleSpec`] objects, e.g.
    /// `{"type": "log", "domain": [1, 100], "range": [0, 300]}`.
    pub fn from_json(
        schema: &SettingsSchema,
        json: &serde_json::Value,
    ) -> Result<Self, ConfigurationError> {
        let Some(object) = json.as_object() else {
            return Err(ConfigurationError::Invalid {
                key: "settings",
                reason: "expected a JSON object".into(),
            });
        };
        let mut values = BTreeMap::new();
        for def in schema.iter() {
            if let Some(member) = object.get(def.key) {
                values.insert(def.key.to_owned(), value_from_json(def, member)?);
            }
        }
        Self::from_resolver(schema, &values)
    }

    /// Name of the schema these settings were resolved against.
    pub fn schema_name(&self) -> &'static str {
        self.schema
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Number under `key`.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text or color under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            SettingValue::Text(t) => Some(t),
            _ => None,
        }
    }

    /// List under `key`.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.get(key)? {
            SettingValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Margins under `key`.
    pub fn margins(&self, key: &str) -> Option<Margins> {
        match self.get(key)? {
            SettingValue::Margins(m) => Some(*m),
            _ => None,
        }
    }

    /// Boundaries under `key`.
    pub fn boundaries(&self, key: &str) -> Option<Boundaries> {
        match self.get(key)? {
            SettingValue::Boundaries(b) => Some(*b),
            _ => None,
        }
    }

    /// Scale under `key`.
    pub fn scale(&self, key: &str) -> Option<&SharedScale> {
        match self.get(key)? {
            SettingValue::Scale(s) => Some(s),
            _ => None,
        }
    }
}

impl SettingsResolver for Settings {
    fn value(&self, key: &str) -> Option<SettingValue> {
        self.get(key).cloned()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("schema", &self.schema)
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn value_from_json(
    def: &SettingDef,
    member: &serde_json::Value,
) -> Result<SettingValue, ConfigurationError> {
    let wrong_kind = || ConfigurationError::WrongKind {
        key: def.key,
        expected: def.kind,
    };
    let invalid = |e: serde_json::Error| ConfigurationError::Invalid {
        key: def.key,
        reason: e.to_string(),
    };
    Ok(match def.kind {
        SettingKind::Number => SettingValue::Number(member.as_f64().ok_or_else(wrong_kind)?),
        SettingKind::Text | SettingKind::Color => {
            SettingValue::Text(member.as_str().ok_or_else(wrong_kind)?.to_owned())
        }
        SettingKind::List => match member {
            serde_json::Value::String(s) => SettingValue::List(vec![s.clone()]),
            serde_json::Value::Array(items) => SettingValue::List(
                items
                    .iter()
                    .map(|i| i.as_str().map(str::to_owned).ok_or_else(wrong_kind))
                    .collect::<Result<_, _>>()?,
            ),
            _ => return Err(wrong_kind()),
        },
        SettingKind::Margins => {
            SettingValue::Margins(Margins::deserialize(member).map_err(invalid)?)
        }
        SettingKind::Boundaries => {
            SettingValue::Boundaries(Boundaries::deserialize(member).map_err(invalid)?)
        }
        SettingKind::Scale => {
            SettingValue::Scale(ScaleSpec::deserialize(member).map_err(invalid)?.build())
        }
    })
}
