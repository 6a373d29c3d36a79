//! Recording of segment state variables over simulated time.

use std::{
    collections::HashMap,
    fmt,
    io::{Read, Write},
    str::FromStr,
};
use ndarray::Array2;
use crate::error::RecordingError;
use crate::parameter::Parameter;
use crate::section::Segment;


/// State variables a cell records at its midpoint segment
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum StateVariable {
    /// Leak current (mA/cm^2)
    ILeak,
    /// Fast sodium current (mA/cm^2)
    INa,
    /// Delayed rectifier potassium current (mA/cm^2)
    IKdr,
    /// Slow calcium current (mA/cm^2)
    ICas,
    /// Low threshold calcium current (mA/cm^2)
    ICat,
    /// A-type potassium current (mA/cm^2)
    IKa,
    /// Calcium activated potassium current (mA/cm^2)
    IKca,
    /// Hyperpolarization activated current (mA/cm^2)
    IHyper,
    /// Membrane potential (mV)
    V,
    /// Intracellular calcium concentration (mM)
    Cai,
}

impl StateVariable {
    /// Recorded variables, currents first followed by voltage and calcium
    pub const ALL: [StateVariable; 10] = [
        StateVariable::ILeak,
        StateVariable::INa,
        StateVariable::IKdr,
        StateVariable::ICas,
        StateVariable::ICat,
        StateVariable::IKa,
        StateVariable::IKca,
        StateVariable::IHyper,
        StateVariable::V,
        StateVariable::Cai,
    ];

    /// Recorded membrane currents
    pub const CURRENTS: [StateVariable; 8] = [
        StateVariable::ILeak,
        StateVariable::INa,
        StateVariable::IKdr,
        StateVariable::ICas,
        StateVariable::ICat,
        StateVariable::IKa,
        StateVariable::IKca,
        StateVariable::IHyper,
    ];

    /// Converts variable to its recorded name
    pub fn to_str(&self) -> &str {
        match self {
            StateVariable::ILeak => "ileak_leak",
            StateVariable::INa => "ina_na",
            StateVariable::IKdr => "ik_kdr",
            StateVariable::ICas => "ica_cas",
            StateVariable::ICat => "ica_cat",
            StateVariable::IKa => "ik_ka",
            StateVariable::IKca => "ik_kca",
            StateVariable::IHyper => "ih_hyper",
            StateVariable::V => "v",
            StateVariable::Cai => "cai",
        }
    }

    /// Conductance density gating the current, `None` for voltage and calcium
    pub fn conductance(&self) -> Option<Parameter> {
        match self {
            StateVariable::ILeak => Some(Parameter::GbarLeak),
            StateVariable::INa => Some(Parameter::GbarNa),
            StateVariable::IKdr => Some(Parameter::GbarKdr),
            StateVariable::ICas => Some(Parameter::GbarCas),
            StateVariable::ICat => Some(Parameter::GbarCat),
            StateVariable::IKa => Some(Parameter::GbarKa),
            StateVariable::IKca => Some(Parameter::GbarKca),
            StateVariable::IHyper => Some(Parameter::GbarHyper),
            StateVariable::V | StateVariable::Cai => None,
        }
    }

    /// Reads the variable from a segment
    pub fn read(&self, segment: &Segment) -> f64 {
        let currents = &segment.currents;

        match self {
            StateVariable::ILeak => currents.ileak_leak,
            StateVariable::INa => currents.ina_na,
            StateVariable::IKdr => currents.ik_kdr,
            StateVariable::ICas => currents.ica_cas,
            StateVariable::ICat => currents.ica_cat,
            StateVariable::IKa => currents.ik_ka,
            StateVariable::IKca => currents.ik_kca,
            StateVariable::IHyper => currents.ih_hyper,
            StateVariable::V => segment.v,
            StateVariable::Cai => segment.cai,
        }
    }

    /// Writes the variable into a segment
    pub fn write(&self, segment: &mut Segment, value: f64) {
        let currents = &mut segment.currents;

        match self {
            StateVariable::ILeak => currents.ileak_leak = value,
            StateVariable::INa => currents.ina_na = value,
            StateVariable::IKdr => currents.ik_kdr = value,
            StateVariable::ICas => currents.ica_cas = value,
            StateVariable::ICat => currents.ica_cat = value,
            StateVariable::IKa => currents.ik_ka = value,
            StateVariable::IKca => currents.ik_kca = value,
            StateVariable::IHyper => currents.ih_hyper = value,
            StateVariable::V => segment.v = value,
            StateVariable::Cai => segment.cai = value,
        }
    }
}

impl fmt::Display for StateVariable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for StateVariable {
    type Err = RecordingError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        StateVariable::ALL.iter()
            .find(|var| var.to_str() == name)
            .copied()
            .ok_or_else(|| RecordingError::UnknownVariable(name.to_string()))
    }
}

/// Time vector plus one trace per recorded variable, sampled at a fixed
/// position along a section
#[derive(Debug, Clone)]
pub struct Recording {
    /// Normalized position the traces are sampled at
    pub location: f64,
    time: Vec<f64>,
    traces: HashMap<StateVariable, Vec<f64>>,
}

impl Default for Recording {
    fn default() -> Self {
        Recording::at(0.5)
    }
}

impl Recording {
    /// Empty recording of every [`StateVariable`] at the given position
    pub fn at(location: f64) -> Self {
        Recording {
            location,
            time: Vec::new(),
            traces: StateVariable::ALL.iter()
                .map(|var| (*var, Vec::new()))
                .collect(),
        }
    }

    /// Appends one sample of every variable read from the segment
    pub fn sample(&mut self, t: f64, segment: &Segment) {
        self.time.push(t);

        for (var, trace) in self.traces.iter_mut() {
            trace.push(var.read(segment));
        }
    }

    /// Recorded times (ms)
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn trace(&self, var: StateVariable) -> &[f64] {
        self.traces.get(&var).map(|trace| trace.as_slice()).unwrap_or(&[])
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Drops every sample, keeping the recorded variables
    pub fn clear(&mut self) {
        self.time.clear();
        self.traces.values_mut().for_each(|trace| trace.clear());
    }

    /// First and last recorded time
    pub fn time_span(&self) -> Option<(f64, f64)> {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        }
    }

    /// Samples as a matrix with one row per sample, columns are time followed
    /// by the variables in [`StateVariable::ALL`] order
    pub fn to_array(&self) -> Array2<f64> {
        let columns = StateVariable::ALL.len() + 1;

        Array2::from_shape_fn((self.len(), columns), |(row, col)| {
            if col == 0 {
                self.time[row]
            } else {
                self.trace(StateVariable::ALL[col - 1])[row]
            }
        })
    }

    /// Writes the samples as CSV with a `t` column followed by one column
    /// per variable
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), RecordingError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["t"];
        header.extend(StateVariable::ALL.iter().map(|var| var.to_str()));
        csv_writer.write_record(&header)?;

        for row in self.to_array().rows() {
            csv_writer.write_record(row.iter().map(|value| value.to_string()))?;
        }

        csv_writer.flush().map_err(|e| RecordingError::Io(e.to_string()))?;

        Ok(())
    }

    /// Reads samples written by [`Recording::write_csv`] or by an external
    /// engine using the same column names, columns may come in any order
    pub fn read_csv<R: Read>(reader: R, location: f64) -> Result<Self, RecordingError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let column_of = |name: &str| {
            headers.iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| RecordingError::MissingColumn(name.to_string()))
        };

        let time_column = column_of("t")?;
        let mut var_columns = Vec::with_capacity(StateVariable::ALL.len());
        for var in StateVariable::ALL {
            var_columns.push((var, column_of(var.to_str())?));
        }

        let mut recording = Recording::at(location);
        for record in csv_reader.records() {
            let record = record?;

            let parse = |column: usize| -> Result<f64, RecordingError> {
                let field = record.get(column).unwrap_or("").trim();
                field.parse::<f64>()
                    .map_err(|_| RecordingError::Io(format!("Cannot parse '{}' as float", field)))
            };

            recording.time.push(parse(time_column)?);
            for (var, column) in var_columns.iter() {
                let value = parse(*column)?;
                recording.traces.entry(*var).or_default().push(value);
            }
        }

        Ok(recording)
    }

    /// Checks that every trace has as many samples as the time vector
    pub fn validate(&self) -> Result<(), RecordingError> {
        if self.traces.values().any(|trace| trace.len() != self.time.len()) {
            return Err(RecordingError::LengthMismatch);
        }

        Ok(())
    }
}
