//! Named section attributes, the optional-value [`Attributes`] mapping used to
//! get and set them by name, and the immutable [`DefaultParameters`] baseline.

use std::{
    collections::BTreeMap,
    fmt,
    str::FromStr,
};
use crate::error::ParameterError;
use crate::mechanism::MechanismKind;


/// Attributes of a section that can be read or written by name
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Parameter {
    /// Specific membrane capacitance (uF/cm^2)
    Cm,
    /// Leak reversal potential (mV)
    Eleak,
    /// Sodium reversal potential (mV)
    Ena,
    /// Potassium reversal potential (mV)
    Ek,
    /// Reversal potential of the hyperpolarization activated current (mV)
    Eh,
    /// Extracellular calcium concentration (mM)
    Cao,
    /// Intracellular calcium concentration (mM)
    Cai,
    GbarLeak,
    GbarNa,
    GbarKdr,
    GbarKa,
    GbarKca,
    GbarCas,
    GbarCat,
    GbarHyper,
    /// Calcium pool decay time constant (ms)
    TaucaCapool,
    /// Calcium pool current to concentration scaling (mM cm^2 / mA)
    FcaCapool,
}

impl Parameter {
    /// Every attribute a section can expose
    pub const ALL: [Parameter; 17] = [
        Parameter::Cm,
        Parameter::Eleak,
        Parameter::Ena,
        Parameter::Ek,
        Parameter::Eh,
        Parameter::Cao,
        Parameter::Cai,
        Parameter::GbarLeak,
        Parameter::GbarNa,
        Parameter::GbarKdr,
        Parameter::GbarKa,
        Parameter::GbarKca,
        Parameter::GbarCas,
        Parameter::GbarCat,
        Parameter::GbarHyper,
        Parameter::TaucaCapool,
        Parameter::FcaCapool,
    ];

    /// Converts parameter to its attribute name
    pub fn to_str(&self) -> &str {
        match self {
            Parameter::Cm => "cm",
            Parameter::Eleak => "eleak",
            Parameter::Ena => "ena",
            Parameter::Ek => "ek",
            Parameter::Eh => "eh",
            Parameter::Cao => "cao",
            Parameter::Cai => "cai",
            Parameter::GbarLeak => "gbar_leak",
            Parameter::GbarNa => "gbar_na",
            Parameter::GbarKdr => "gbar_kdr",
            Parameter::GbarKa => "gbar_ka",
            Parameter::GbarKca => "gbar_kca",
            Parameter::GbarCas => "gbar_cas",
            Parameter::GbarCat => "gbar_cat",
            Parameter::GbarHyper => "gbar_hyper",
            Parameter::TaucaCapool => "tauca_capool",
            Parameter::FcaCapool => "fca_capool",
        }
    }

    /// Units of the parameter
    pub fn unit(&self) -> &str {
        match self {
            Parameter::Cm => "uF/cm2",
            Parameter::Eleak | Parameter::Ena | Parameter::Ek | Parameter::Eh => "mV",
            Parameter::Cao | Parameter::Cai => "mM",
            Parameter::TaucaCapool => "ms",
            Parameter::FcaCapool => "mM cm2/mA",
            _ => "S/cm2",
        }
    }

    /// Mechanisms that make the attribute available once any of them is inserted,
    /// an empty slice means the attribute always exists
    pub fn owners(&self) -> &'static [MechanismKind] {
        match self {
            Parameter::Cm => &[],
            Parameter::Eleak | Parameter::GbarLeak => &[MechanismKind::Leak],
            Parameter::Ena | Parameter::GbarNa => &[MechanismKind::Na],
            Parameter::Ek => &[MechanismKind::Kdr, MechanismKind::Ka, MechanismKind::Kca],
            Parameter::Eh | Parameter::GbarHyper => &[MechanismKind::Hyper],
            Parameter::Cao | Parameter::Cai => &[MechanismKind::Capool, MechanismKind::Cas, MechanismKind::Cat],
            Parameter::GbarKdr => &[MechanismKind::Kdr],
            Parameter::GbarKa => &[MechanismKind::Ka],
            Parameter::GbarKca => &[MechanismKind::Kca],
            Parameter::GbarCas => &[MechanismKind::Cas],
            Parameter::GbarCat => &[MechanismKind::Cat],
            Parameter::TaucaCapool | Parameter::FcaCapool => &[MechanismKind::Capool],
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Parameter {
    type Err = ParameterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Parameter::ALL.iter()
            .find(|parameter| parameter.to_str() == name)
            .copied()
            .ok_or_else(|| ParameterError::UnknownParameter(name.to_string()))
    }
}

/// Mapping from attribute name to either a value or `None`, where `None`
/// asks [`set_biophysics`](crate::cell::HcoCell::set_biophysics) to restore
/// the default and is ignored by
/// [`get_biophysics`](crate::cell::HcoCell::get_biophysics)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: BTreeMap<String, Option<f64>>,
}

impl Attributes {
    pub fn new() -> Self {
        Attributes::default()
    }

    /// Mapping of the given names with every value absent
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Attributes {
            values: names.into_iter().map(|name| (name.into(), None)).collect(),
        }
    }

    /// Adds an explicit value
    pub fn with_value(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_string(), Some(value));

        self
    }

    /// Adds a name with an absent value
    pub fn with_default(mut self, name: &str) -> Self {
        self.values.insert(name.to_string(), None);

        self
    }

    /// Inserts an entry, returning the previous one if the name was present
    pub fn insert(&mut self, name: &str, value: Option<f64>) -> Option<Option<f64>> {
        self.values.insert(name.to_string(), value)
    }

    /// Entry for the name, `Some(None)` means the name is present without a value
    pub fn get(&self, name: &str) -> Option<Option<f64>> {
        self.values.get(name).copied()
    }

    /// Value for the name if present and set
    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).flatten()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Option<f64>)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (S, Option<f64>)>>(iter: I) -> Self {
        Attributes {
            values: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}

/// Baseline parameter values captured once after mechanisms are inserted,
/// there is no way to modify them afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultParameters {
    values: BTreeMap<Parameter, f64>,
}

impl DefaultParameters {
    pub(crate) fn new(values: BTreeMap<Parameter, f64>) -> Self {
        DefaultParameters { values }
    }

    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        self.values.get(&parameter).copied()
    }

    /// Default for an attribute name, `None` when the name has no default
    /// (including names that are not attributes at all)
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        name.parse::<Parameter>()
            .ok()
            .and_then(|parameter| self.get(parameter))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_by_name(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        self.values.iter().map(|(parameter, value)| (*parameter, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every default as an explicit value
    pub fn to_attributes(&self) -> Attributes {
        self.iter()
            .map(|(parameter, value)| (parameter.to_str().to_string(), Some(value)))
            .collect()
    }
}
