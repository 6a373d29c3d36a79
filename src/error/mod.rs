use std::fmt::{Display, Debug, Formatter, Result};


/// Error set for mechanism insertion
pub enum MechanismError {
    /// Mechanism name is not one of the known mechanisms
    UnknownMechanism(String),
}

impl Display for MechanismError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            MechanismError::UnknownMechanism(name) => write!(f, "Unknown mechanism: '{}'", name),
        }
    }
}

impl Debug for MechanismError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for parameter lookup on a section
pub enum ParameterError {
    /// Name does not correspond to any section attribute
    UnknownParameter(String),
    /// Attribute exists but none of the mechanisms that own it are inserted
    NotInserted(String),
}

impl Display for ParameterError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ParameterError::UnknownParameter(name) => write!(f, "Section has no attribute '{}'", name),
            ParameterError::NotInserted(name) => write!(
                f, "'{}' requires a mechanism that has not been inserted", name
            ),
        }
    }
}

impl Debug for ParameterError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for recorded traces
pub enum RecordingError {
    /// Trace does not have as many samples as the time vector
    LengthMismatch,
    /// Column header in a trace file is not a recordable variable
    UnknownVariable(String),
    /// Trace file is missing a column
    MissingColumn(String),
    /// Reading or writing a trace file failed
    Io(String),
}

impl Display for RecordingError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            RecordingError::LengthMismatch => write!(f, "Recorded traces must have as many samples as the time vector"),
            RecordingError::UnknownVariable(name) => write!(f, "Unknown recorded variable: '{}'", name),
            RecordingError::MissingColumn(name) => write!(f, "Trace file is missing column '{}'", name),
            RecordingError::Io(msg) => write!(f, "Trace file error: {}", msg),
        }
    }
}

impl Debug for RecordingError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl From<csv::Error> for RecordingError {
    fn from(err: csv::Error) -> RecordingError {
        RecordingError::Io(err.to_string())
    }
}

/// Error set for plotting recorded variables
pub enum PlotError {
    /// No time samples have been recorded yet
    EmptyRecording,
    /// Conductance gating a recorded current cannot be read
    MissingConductance(ParameterError),
    /// Drawing backend failed
    Backend(String),
}

impl Display for PlotError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PlotError::EmptyRecording => write!(f, "Cannot plot before any samples have been recorded"),
            PlotError::MissingConductance(err) => write!(f, "Cannot read conductance: {}", err),
            PlotError::Backend(msg) => write!(f, "Drawing failed: {}", msg),
        }
    }
}

impl Debug for PlotError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl From<ParameterError> for PlotError {
    fn from(err: ParameterError) -> PlotError {
        PlotError::MissingConductance(err)
    }
}

/// Error set for running a simulation
pub enum SimulationError {
    /// Timestep must be positive and finite
    InvalidTimestep,
    /// Stop time is before the current time
    StopTimeBeforeStart,
    /// Stop time or current time is not finite
    InvalidStopTime,
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let err_msg = match self {
            SimulationError::InvalidTimestep => "Timestep must be positive and finite",
            SimulationError::StopTimeBeforeStart => "Stop time must not be before the current time",
            SimulationError::InvalidStopTime => "Start and stop times must be finite",
        };

        write!(f, "{}", err_msg)
    }
}

impl Debug for SimulationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for reading configuration files
pub enum ConfigError {
    /// File could not be read
    Read(String),
    /// Contents are not valid TOML
    Parse(String),
    /// Field is present but has the wrong type
    InvalidField(String),
    /// Requested cell table is absent
    MissingTable(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ConfigError::Read(msg) => write!(f, "Cannot read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Cannot parse config: {}", msg),
            ConfigError::InvalidField(field) => write!(f, "Cannot parse '{}'", field),
            ConfigError::MissingTable(name) => write!(f, "Config has no table '{}'", name),
        }
    }
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// A set of errors that may occur when using the library
pub enum HcoError {
    /// Errors related to mechanisms
    MechanismRelatedError(MechanismError),
    /// Errors related to section parameters
    ParameterRelatedError(ParameterError),
    /// Errors related to recordings
    RecordingRelatedError(RecordingError),
    /// Errors related to plotting
    PlotRelatedError(PlotError),
    /// Errors related to running simulations
    SimulationRelatedError(SimulationError),
    /// Errors related to configuration
    ConfigRelatedError(ConfigError),
}

impl Display for HcoError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            HcoError::MechanismRelatedError(err) => write!(f, "{}", err),
            HcoError::ParameterRelatedError(err) => write!(f, "{}", err),
            HcoError::RecordingRelatedError(err) => write!(f, "{}", err),
            HcoError::PlotRelatedError(err) => write!(f, "{}", err),
            HcoError::SimulationRelatedError(err) => write!(f, "{}", err),
            HcoError::ConfigRelatedError(err) => write!(f, "{}", err),
        }
    }
}

impl Debug for HcoError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl std::error::Error for HcoError {}

impl From<MechanismError> for HcoError {
    fn from(err: MechanismError) -> HcoError {
        HcoError::MechanismRelatedError(err)
    }
}

impl From<ParameterError> for HcoError {
    fn from(err: ParameterError) -> HcoError {
        HcoError::ParameterRelatedError(err)
    }
}

impl From<RecordingError> for HcoError {
    fn from(err: RecordingError) -> HcoError {
        HcoError::RecordingRelatedError(err)
    }
}

impl From<PlotError> for HcoError {
    fn from(err: PlotError) -> HcoError {
        HcoError::PlotRelatedError(err)
    }
}

impl From<SimulationError> for HcoError {
    fn from(err: SimulationError) -> HcoError {
        HcoError::SimulationRelatedError(err)
    }
}

impl From<ConfigError> for HcoError {
    fn from(err: ConfigError) -> HcoError {
        HcoError::ConfigRelatedError(err)
    }
}
