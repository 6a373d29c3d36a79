//! Ionic mechanisms that can be inserted into a [`Section`](crate::section::Section),
//! each owning its own conductance or pool parameters.

use std::{fmt, str::FromStr};
use crate::error::MechanismError;
use crate::parameter::Parameter;


/// Available mechanism types
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum MechanismKind {
    /// Passive leak conductance
    Leak,
    /// Fast sodium channel
    Na,
    /// Delayed rectifier potassium channel
    Kdr,
    /// Intracellular calcium pool
    Capool,
    /// Slow calcium channel
    Cas,
    /// A-type (transient) potassium channel
    Ka,
    /// Calcium activated potassium channel
    Kca,
    /// Low threshold (transient) calcium channel
    Cat,
    /// Hyperpolarization activated inward current
    Hyper,
}

impl MechanismKind {
    /// Every mechanism type in the order a half-center cell inserts them
    pub const ALL: [MechanismKind; 9] = [
        MechanismKind::Leak,
        MechanismKind::Na,
        MechanismKind::Kdr,
        MechanismKind::Capool,
        MechanismKind::Cas,
        MechanismKind::Ka,
        MechanismKind::Kca,
        MechanismKind::Cat,
        MechanismKind::Hyper,
    ];

    /// Converts type to string
    pub fn to_str(&self) -> &str {
        match self {
            MechanismKind::Leak => "leak",
            MechanismKind::Na => "na",
            MechanismKind::Kdr => "kdr",
            MechanismKind::Capool => "capool",
            MechanismKind::Cas => "cas",
            MechanismKind::Ka => "ka",
            MechanismKind::Kca => "kca",
            MechanismKind::Cat => "cat",
            MechanismKind::Hyper => "hyper",
        }
    }

    /// Conductance density parameter of the mechanism, the calcium pool has none
    pub fn conductance(&self) -> Option<Parameter> {
        match self {
            MechanismKind::Leak => Some(Parameter::GbarLeak),
            MechanismKind::Na => Some(Parameter::GbarNa),
            MechanismKind::Kdr => Some(Parameter::GbarKdr),
            MechanismKind::Capool => None,
            MechanismKind::Cas => Some(Parameter::GbarCas),
            MechanismKind::Ka => Some(Parameter::GbarKa),
            MechanismKind::Kca => Some(Parameter::GbarKca),
            MechanismKind::Cat => Some(Parameter::GbarCat),
            MechanismKind::Hyper => Some(Parameter::GbarHyper),
        }
    }
}

impl fmt::Display for MechanismKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for MechanismKind {
    type Err = MechanismError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        MechanismKind::ALL.iter()
            .find(|kind| kind.to_str() == name)
            .copied()
            .ok_or_else(|| MechanismError::UnknownMechanism(name.to_string()))
    }
}

/// Passive leak conductance with its own reversal potential
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakChannel {
    /// Conductance density (S/cm^2)
    pub gbar: f64,
    /// Reversal potential (mV)
    pub e: f64,
}

impl Default for LeakChannel {
    fn default() -> Self {
        LeakChannel {
            gbar: 0.001,
            e: -70.,
        }
    }
}

/// Voltage gated channel, reversal potential is shared through the ion
/// attributes of the section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatedChannel {
    /// Conductance density (S/cm^2)
    pub gbar: f64,
}

/// Simplified intracellular calcium dynamics driven by calcium currents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalciumPool {
    /// Decay time constant (ms)
    pub tauca: f64,
    /// Current to concentration scaling (mM cm^2 / mA)
    pub fca: f64,
}

impl Default for CalciumPool {
    fn default() -> Self {
        CalciumPool {
            tauca: 200.,
            fca: 9.39,
        }
    }
}

/// A mechanism inserted into a section
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mechanism {
    Leak(LeakChannel),
    Channel(MechanismKind, GatedChannel),
    Capool(CalciumPool),
}

fn default_gbar(kind: MechanismKind) -> f64 {
    match kind {
        MechanismKind::Na => 0.12,
        MechanismKind::Kdr => 0.036,
        _ => 0.,
    }
}

impl Mechanism {
    /// Creates a mechanism of the given type with its insertion defaults
    pub fn new(kind: MechanismKind) -> Self {
        match kind {
            MechanismKind::Leak => Mechanism::Leak(LeakChannel::default()),
            MechanismKind::Capool => Mechanism::Capool(CalciumPool::default()),
            _ => Mechanism::Channel(kind, GatedChannel { gbar: default_gbar(kind) }),
        }
    }

    pub fn kind(&self) -> MechanismKind {
        match self {
            Mechanism::Leak(_) => MechanismKind::Leak,
            Mechanism::Channel(kind, _) => *kind,
            Mechanism::Capool(_) => MechanismKind::Capool,
        }
    }

    /// Conductance density (S/cm^2), `None` for the calcium pool
    pub fn gbar(&self) -> Option<f64> {
        match self {
            Mechanism::Leak(leak) => Some(leak.gbar),
            Mechanism::Channel(_, channel) => Some(channel.gbar),
            Mechanism::Capool(_) => None,
        }
    }

    /// Mutable reference to the value behind a parameter this mechanism owns
    pub(crate) fn parameter_mut(&mut self, parameter: Parameter) -> Option<&mut f64> {
        match (self, parameter) {
            (Mechanism::Leak(leak), Parameter::GbarLeak) => Some(&mut leak.gbar),
            (Mechanism::Leak(leak), Parameter::Eleak) => Some(&mut leak.e),
            (Mechanism::Capool(pool), Parameter::TaucaCapool) => Some(&mut pool.tauca),
            (Mechanism::Capool(pool), Parameter::FcaCapool) => Some(&mut pool.fca),
            (Mechanism::Channel(kind, channel), parameter) if kind.conductance() == Some(parameter) => {
                Some(&mut channel.gbar)
            },
            _ => None,
        }
    }

    /// Value behind a parameter this mechanism owns
    pub(crate) fn parameter(&self, parameter: Parameter) -> Option<f64> {
        match (self, parameter) {
            (Mechanism::Leak(leak), Parameter::GbarLeak) => Some(leak.gbar),
            (Mechanism::Leak(leak), Parameter::Eleak) => Some(leak.e),
            (Mechanism::Capool(pool), Parameter::TaucaCapool) => Some(pool.tauca),
            (Mechanism::Capool(pool), Parameter::FcaCapool) => Some(pool.fca),
            (Mechanism::Channel(kind, channel), parameter) if kind.conductance() == Some(parameter) => {
                Some(channel.gbar)
            },
            _ => None,
        }
    }
}
