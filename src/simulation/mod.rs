//! Simulation clock and the [`MembraneDynamics`] seam an external engine
//! implements to advance cell state, along with a run loop that records
//! every cell after each step.

use log::info;
use crate::cell::HcoCell;
use crate::error::SimulationError;
use crate::section::Section;


/// Global simulation time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    /// Current time (ms)
    pub t: f64,
    /// Timestep (ms)
    pub dt: f64,
}

impl Default for Clock {
    fn default() -> Self {
        Clock {
            t: 0.,
            dt: 0.025,
        }
    }
}

impl Clock {
    pub fn new(dt: f64) -> Result<Self, SimulationError> {
        if !(dt.is_finite() && dt > 0.) {
            return Err(SimulationError::InvalidTimestep);
        }

        Ok(Clock { t: 0., dt })
    }

    pub fn tick(&mut self) {
        self.t += self.dt;
    }
}

/// Integrates membrane state, implemented outside of this crate by whatever
/// engine solves channel kinetics and couples the cells
pub trait MembraneDynamics {
    /// Sets up state before the first sample is taken
    fn initialize(&mut self, _sections: &mut [&mut Section], _clock: &Clock) {}
    /// Advances every section from `clock.t` to `clock.t + clock.dt`
    fn advance(&mut self, sections: &mut [&mut Section], clock: &Clock);
}

fn sample_all(cells: &mut [&mut HcoCell], t: f64) {
    cells.iter_mut().for_each(|cell| cell.record_sample(t));
}

fn somas<'a>(cells: &'a mut [&mut HcoCell]) -> Vec<&'a mut Section> {
    cells.iter_mut().map(|cell| &mut cell.soma).collect()
}

/// Runs the cells until `tstop` (ms), recording each cell at the starting
/// time and after every step, returns the number of steps taken
pub fn run<D: MembraneDynamics>(
    cells: &mut [&mut HcoCell],
    dynamics: &mut D,
    clock: &mut Clock,
    tstop: f64,
) -> Result<usize, SimulationError> {
    if !(clock.dt.is_finite() && clock.dt > 0.) {
        return Err(SimulationError::InvalidTimestep);
    }
    if !(tstop.is_finite() && clock.t.is_finite()) {
        return Err(SimulationError::InvalidStopTime);
    }
    if tstop < clock.t {
        return Err(SimulationError::StopTimeBeforeStart);
    }
    // a step too small to move the clock anywhere in the run would never finish
    if clock.t + clock.dt <= clock.t || tstop + clock.dt <= tstop {
        return Err(SimulationError::InvalidTimestep);
    }

    info!("running {} cell(s) from {} ms to {} ms (dt = {} ms)", cells.len(), clock.t, tstop, clock.dt);

    dynamics.initialize(&mut somas(cells), clock);
    sample_all(cells, clock.t);

    // half a step of slack so accumulated rounding does not add an extra step
    let mut steps = 0;
    while clock.t + clock.dt * 0.5 < tstop {
        dynamics.advance(&mut somas(cells), clock);
        clock.tick();
        sample_all(cells, clock.t);
        steps += 1;
    }

    info!("finished after {} steps at {} ms", steps, clock.t);

    Ok(steps)
}
