//! A cylindrical membrane [`Section`] with geometry, inserted mechanisms and
//! per segment state variables that an external engine updates over time.

use std::f64::consts::PI;
use log::debug;
use crate::error::{MechanismError, ParameterError};
use crate::mechanism::{Mechanism, MechanismKind};
use crate::parameter::Parameter;


/// Converts square microns to square centimeters
const UM2_TO_CM2: f64 = 1e-8;

/// Membrane currents of a segment (mA/cm^2)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Currents {
    pub ileak_leak: f64,
    pub ina_na: f64,
    pub ik_kdr: f64,
    pub ica_cas: f64,
    pub ica_cat: f64,
    pub ik_ka: f64,
    pub ik_kca: f64,
    pub ih_hyper: f64,
}

/// State of one segment, written by the engine integrating the membrane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Normalized position of the segment center along the section
    pub x: f64,
    /// Membrane potential (mV)
    pub v: f64,
    /// Intracellular calcium concentration (mM)
    pub cai: f64,
    /// Extracellular calcium concentration (mM)
    pub cao: f64,
    /// Membrane currents
    pub currents: Currents,
}

impl Segment {
    fn at(x: f64) -> Self {
        Segment {
            x,
            v: -65.,
            cai: 5e-5,
            cao: 2.,
            currents: Currents::default(),
        }
    }
}

/// Reversal potentials shared by every mechanism carrying the same ion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reversals {
    /// Sodium reversal potential (mV)
    pub ena: f64,
    /// Potassium reversal potential (mV)
    pub ek: f64,
    /// Hyperpolarization activated current reversal potential (mV)
    pub eh: f64,
}

impl Default for Reversals {
    fn default() -> Self {
        Reversals {
            ena: 50.,
            ek: -77.,
            eh: 0.,
        }
    }
}

/// Unbranched cable divided into `nseg` segments of equal length
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    nseg: usize,
    /// Length (um)
    length: f64,
    /// Diameter (um)
    diam: f64,
    /// Specific membrane capacitance (uF/cm^2)
    cm: f64,
    mechanisms: Vec<Mechanism>,
    reversals: Reversals,
    segments: Vec<Segment>,
}

fn segment_centers(nseg: usize) -> impl Iterator<Item = f64> {
    (0..nseg).map(move |i| (i as f64 + 0.5) / nseg as f64)
}

impl Section {
    /// Creates a section with one segment, 100 um length, 500 um diameter,
    /// 1 uF/cm^2 capacitance and no mechanisms
    pub fn new(name: &str) -> Self {
        Section {
            name: name.to_string(),
            nseg: 1,
            length: 100.,
            diam: 500.,
            cm: 1.,
            mechanisms: Vec::new(),
            reversals: Reversals::default(),
            segments: vec![Segment::at(0.5)],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nseg(&self) -> usize {
        self.nseg
    }

    /// Changes the number of segments, state of the midpoint segment is
    /// copied into every new segment, `0` is treated as `1`
    pub fn set_nseg(&mut self, nseg: usize) {
        let nseg = nseg.max(1);
        let template = *self.segment(0.5);

        self.nseg = nseg;
        self.segments = segment_centers(nseg)
            .map(|x| Segment { x, ..template })
            .collect();
    }

    /// Length (um)
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    /// Diameter (um)
    pub fn diam(&self) -> f64 {
        self.diam
    }

    pub fn set_diam(&mut self, diam: f64) {
        self.diam = diam;
    }

    /// Membrane area of a single segment (cm^2)
    pub fn area(&self) -> f64 {
        PI * self.diam * (self.length / self.nseg as f64) * UM2_TO_CM2
    }

    /// Membrane area of the whole section (cm^2)
    pub fn total_area(&self) -> f64 {
        PI * self.diam * self.length * UM2_TO_CM2
    }

    /// Inserts a mechanism by name, inserting an already present mechanism
    /// leaves it untouched
    pub fn insert(&mut self, name: &str) -> Result<MechanismKind, MechanismError> {
        let kind: MechanismKind = name.parse()?;

        if self.has_mechanism(kind) {
            debug!("{}: '{}' already inserted", self.name, kind);
        } else {
            debug!("{}: inserting '{}'", self.name, kind);
            self.mechanisms.push(Mechanism::new(kind));
        }

        Ok(kind)
    }

    pub fn has_mechanism(&self, kind: MechanismKind) -> bool {
        self.mechanisms.iter().any(|mechanism| mechanism.kind() == kind)
    }

    /// Inserted mechanisms in insertion order
    pub fn mechanisms(&self) -> &[Mechanism] {
        &self.mechanisms
    }

    pub fn mechanism(&self, kind: MechanismKind) -> Option<&Mechanism> {
        self.mechanisms.iter().find(|mechanism| mechanism.kind() == kind)
    }

    pub fn reversals(&self) -> &Reversals {
        &self.reversals
    }

    fn is_accessible(&self, parameter: Parameter) -> bool {
        let owners = parameter.owners();

        owners.is_empty() || owners.iter().any(|kind| self.has_mechanism(*kind))
    }

    fn mechanism_mut_for(&mut self, parameter: Parameter) -> Option<&mut f64> {
        self.mechanisms.iter_mut()
            .find_map(|mechanism| mechanism.parameter_mut(parameter))
    }

    /// Reads an attribute, concentrations are read from the midpoint segment
    pub fn get(&self, parameter: Parameter) -> Result<f64, ParameterError> {
        if !self.is_accessible(parameter) {
            return Err(ParameterError::NotInserted(parameter.to_string()));
        }

        let value = match parameter {
            Parameter::Cm => self.cm,
            Parameter::Ena => self.reversals.ena,
            Parameter::Ek => self.reversals.ek,
            Parameter::Eh => self.reversals.eh,
            Parameter::Cai => self.segment(0.5).cai,
            Parameter::Cao => self.segment(0.5).cao,
            _ => self.mechanisms.iter()
                .find_map(|mechanism| mechanism.parameter(parameter))
                .ok_or_else(|| ParameterError::NotInserted(parameter.to_string()))?,
        };

        Ok(value)
    }

    /// Writes an attribute, concentrations are written to every segment
    pub fn set(&mut self, parameter: Parameter, value: f64) -> Result<(), ParameterError> {
        if !self.is_accessible(parameter) {
            return Err(ParameterError::NotInserted(parameter.to_string()));
        }

        match parameter {
            Parameter::Cm => self.cm = value,
            Parameter::Ena => self.reversals.ena = value,
            Parameter::Ek => self.reversals.ek = value,
            Parameter::Eh => self.reversals.eh = value,
            Parameter::Cai => self.segments.iter_mut().for_each(|segment| segment.cai = value),
            Parameter::Cao => self.segments.iter_mut().for_each(|segment| segment.cao = value),
            _ => {
                let slot = self.mechanism_mut_for(parameter)
                    .ok_or_else(|| ParameterError::NotInserted(parameter.to_string()))?;
                *slot = value;
            },
        }

        Ok(())
    }

    /// Reads an attribute by name
    pub fn get_by_name(&self, name: &str) -> Result<f64, ParameterError> {
        self.get(name.parse()?)
    }

    /// Writes an attribute by name
    pub fn set_by_name(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        self.set(name.parse()?, value)
    }

    /// Segment containing the normalized position `x`, values outside of
    /// `0..=1` are clamped
    pub fn segment(&self, x: f64) -> &Segment {
        &self.segments[self.segment_index(x)]
    }

    pub fn segment_mut(&mut self, x: f64) -> &mut Segment {
        let index = self.segment_index(x);

        &mut self.segments[index]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    fn segment_index(&self, x: f64) -> usize {
        let x = x.clamp(0., 1.);

        ((x * self.nseg as f64) as usize).min(self.nseg - 1)
    }
}
