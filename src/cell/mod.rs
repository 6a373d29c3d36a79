//! The half-center oscillator cell: one somatic section carrying leak, sodium,
//! potassium, calcium and hyperpolarization activated mechanisms, with
//! recording and plotting of its state over time.

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
};
use log::debug;
use crate::error::{HcoError, ParameterError, PlotError};
use crate::mechanism::MechanismKind;
use crate::parameter::{Attributes, DefaultParameters, Parameter};
use crate::plot::{Figure, LegendLocation, LineColor};
use crate::record::{Recording, StateVariable};
use crate::section::Section;


static CELL_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Soma length (um)
pub const SOMA_LENGTH: f64 = 1000.;
/// Soma diameter (um), gives a single segment area of 0.314e-3 cm^2
pub const SOMA_DIAM: f64 = 9.99593;
/// Position along the soma that traces are recorded at
pub const RECORD_LOCATION: f64 = 0.5;

/// Voltage panel range (mV)
const VOLTAGE_YLIM: (f64, f64) = (-90., 60.);
/// Calcium panel range (mM)
const CALCIUM_YLIM: (f64, f64) = (0., 0.4);

/// Conductance densities applied after the mechanisms are inserted (S/cm^2),
/// specific capacitance in uF/cm^2
const DEFAULT_DENSITIES: [(Parameter, f64); 9] = [
    (Parameter::Cm, 1.),
    (Parameter::GbarLeak, 0.03e-3),
    (Parameter::GbarNa, 0.1),
    (Parameter::GbarKdr, 0.1),
    (Parameter::GbarKa, 0.1),
    (Parameter::GbarKca, 0.01),
    (Parameter::GbarCas, 0.001),
    (Parameter::GbarCat, 0.005),
    (Parameter::GbarHyper, 0.0001),
];

/// Line color of each current in the current panel
fn current_color(var: StateVariable) -> LineColor {
    match var {
        StateVariable::ILeak => LineColor::Black,
        StateVariable::INa => LineColor::Yellow,
        StateVariable::IKdr => LineColor::Red,
        StateVariable::ICas => LineColor::Orange,
        StateVariable::ICat => LineColor::Brown,
        StateVariable::IKa => LineColor::Pink,
        StateVariable::IKca => LineColor::Green,
        StateVariable::IHyper => LineColor::Cyan,
        StateVariable::V | StateVariable::Cai => LineColor::Black,
    }
}

/// Single compartment half-center oscillator cell
#[derive(Debug, Clone)]
pub struct HcoCell {
    /// Somatic section
    pub soma: Section,
    default_parameters: DefaultParameters,
    recording: Recording,
}

impl HcoCell {
    /// Creates the soma, sets its geometry, inserts the mechanisms with their
    /// defaults and sets up recording
    pub fn new() -> Result<Self, HcoError> {
        let mut cell = HcoCell {
            soma: Self::create_sections(),
            default_parameters: DefaultParameters::new(BTreeMap::new()),
            recording: Recording::at(RECORD_LOCATION),
        };

        cell.define_geometry();
        cell.define_biophysics()?;
        cell.setup_record();

        Ok(cell)
    }

    fn create_sections() -> Section {
        let index = CELL_COUNT.fetch_add(1, Ordering::Relaxed);
        let name = format!("HcoCell[{}].soma", index);
        debug!("creating section {}", name);

        Section::new(&name)
    }

    fn define_geometry(&mut self) {
        self.soma.set_nseg(1);
        self.soma.set_length(SOMA_LENGTH);
        self.soma.set_diam(SOMA_DIAM);
    }

    fn define_biophysics(&mut self) -> Result<(), HcoError> {
        self.soma.set(Parameter::Cm, 1.)?;

        self.soma.insert("leak")?;
        self.soma.set(Parameter::Eleak, -50.)?;

        self.soma.insert("na")?;
        self.soma.set(Parameter::Ena, 50.)?;

        self.soma.insert("kdr")?;
        self.soma.set(Parameter::Ek, -80.)?;

        self.soma.insert("capool")?;
        self.soma.set(Parameter::Cao, 3.)?;
        self.soma.set(Parameter::Cai, 50e-6)?;

        self.soma.insert("cas")?;
        self.soma.insert("ka")?;
        self.soma.insert("kca")?;
        self.soma.insert("cat")?;
        self.soma.insert("hyper")?;
        self.soma.set(Parameter::Eh, -20.)?;

        let mut defaults: BTreeMap<Parameter, f64> = DEFAULT_DENSITIES.into_iter().collect();
        defaults.insert(Parameter::TaucaCapool, self.soma.get(Parameter::TaucaCapool)?);
        defaults.insert(Parameter::FcaCapool, self.soma.get(Parameter::FcaCapool)?);
        self.default_parameters = DefaultParameters::new(defaults);

        let attributes = self.default_parameters.to_attributes();
        self.set_biophysics(&attributes)?;

        Ok(())
    }

    fn setup_record(&mut self) {
        self.recording = Recording::at(RECORD_LOCATION);
    }

    /// Changes membrane properties by name, a present value is written
    /// directly while an absent value restores the default when the name
    /// has one and is skipped otherwise
    pub fn set_biophysics(&mut self, attributes: &Attributes) -> Result<(), ParameterError> {
        for (name, value) in attributes.iter() {
            match value {
                Some(value) => self.soma.set_by_name(name, value)?,
                None => match self.default_parameters.get_by_name(name) {
                    Some(default) => self.soma.set_by_name(name, default)?,
                    None => debug!("{}: no default for '{}', skipping", self.soma.name(), name),
                },
            }
        }

        Ok(())
    }

    /// Reads the current value of every named membrane property, fails on
    /// the first name that is not an attribute of the soma
    pub fn get_biophysics(&self, attributes: &Attributes) -> Result<Attributes, ParameterError> {
        let mut values = Attributes::new();

        for name in attributes.names() {
            values.insert(name, Some(self.soma.get_by_name(name)?));
        }

        Ok(values)
    }

    /// Baseline captured after mechanism insertion
    pub fn default_parameters(&self) -> &DefaultParameters {
        &self.default_parameters
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Records every tracked variable at the recording location, called by
    /// the engine once per timestep
    pub fn record_sample(&mut self, t: f64) {
        let segment = self.soma.segment(self.recording.location);
        self.recording.sample(t, segment);
    }

    /// Replaces recorded traces with ones produced elsewhere
    pub fn load_recording(&mut self, recording: Recording) -> Result<(), HcoError> {
        recording.validate()?;
        self.recording = recording;

        Ok(())
    }

    /// Whether the conductance gating a recorded current is above zero,
    /// fails when the owning mechanism is missing from the soma
    fn is_conducting(&self, var: StateVariable) -> Result<bool, ParameterError> {
        match var.conductance() {
            Some(gbar) => Ok(self.soma.get(gbar)? > 0.),
            None => Ok(false),
        }
    }

    /// Plots voltage, every current with a nonzero conductance, and
    /// intracellular calcium over time in three panels sharing the time
    /// axis, `cell_id` above zero is drawn as "Cell B" otherwise "Cell A"
    pub fn plot_vars(&self, cell_id: i32, figsize: Option<(u32, u32)>) -> Result<Figure, PlotError> {
        let (first, last) = self.recording.time_span().ok_or(PlotError::EmptyRecording)?;

        let (cell_name, color) = if cell_id > 0 {
            ("Cell B", LineColor::Red)
        } else {
            ("Cell A", LineColor::Blue)
        };
        let t = self.recording.time();

        let mut fig = Figure::with_rows(3, figsize);

        let voltage = &mut fig.axes[0];
        voltage.title = Some(cell_name.to_string());
        voltage.plot(t, self.recording.trace(StateVariable::V), color, None);
        voltage.ylim = Some(VOLTAGE_YLIM);
        voltage.ylabel = Some(String::from("Membrane Voltage (mV)"));

        let calcium = &mut fig.axes[2];
        calcium.plot(t, self.recording.trace(StateVariable::Cai), color, None);
        calcium.ylim = Some(CALCIUM_YLIM);
        calcium.ylabel = Some(String::from("Calcium Pool (mM)"));

        let currents = &mut fig.axes[1];
        for var in StateVariable::CURRENTS {
            if self.is_conducting(var)? {
                currents.plot(t, self.recording.trace(var), current_color(var), Some(var.to_str()));
            }
        }
        currents.legend = Some(LegendLocation::UpperRight);
        currents.ylabel = Some(String::from("Current (mA/cm²)"));

        fig.share_xlim((first, last));
        fig.axes[2].xlabel = Some(String::from("Time (ms)"));

        Ok(fig)
    }

    /// Mechanism types inserted into the soma in insertion order
    pub fn mechanism_kinds(&self) -> Vec<MechanismKind> {
        self.soma.mechanisms().iter().map(|mechanism| mechanism.kind()).collect()
    }
}
