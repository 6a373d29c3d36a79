//! # HCO Cell
//!
//! `hco_cell` models a single compartment cell of a half-center oscillator.
//! A [`HcoCell`](cell::HcoCell) owns one somatic [`Section`](section::Section)
//! with leak, fast sodium, delayed rectifier potassium, calcium pool, slow and
//! transient calcium, A-type potassium, calcium activated potassium and
//! hyperpolarization activated mechanisms. Membrane properties can be read and
//! written by name, state variables are recorded at the middle of the soma
//! while an external engine advances the membrane, and the recorded traces can
//! be plotted as voltage, current and calcium panels.
//!
//! Integrating channel kinetics is left to the engine, which plugs in through
//! the [`MembraneDynamics`](simulation::MembraneDynamics) trait.
//!
//! ## Example Code
//!
//! ### Changing membrane properties
//!
//! ```rust
//! use hco_cell::{cell::HcoCell, parameter::Attributes, error::HcoError};
//!
//! fn main() -> Result<(), HcoError> {
//!     let mut cell = HcoCell::new()?;
//!
//!     // explicit values are written directly
//!     cell.set_biophysics(&Attributes::new().with_value("gbar_na", 0.5))?;
//!
//!     let values = cell.get_biophysics(&Attributes::from_names(["gbar_na"]))?;
//!     assert_eq!(values.value("gbar_na"), Some(0.5));
//!
//!     // absent values restore the default
//!     cell.set_biophysics(&Attributes::new().with_default("gbar_na"))?;
//!     assert_eq!(cell.soma.get_by_name("gbar_na")?, 0.1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Recording and plotting with an external engine
//!
//! ```rust
//! use hco_cell::{
//!     cell::HcoCell,
//!     error::HcoError,
//!     section::Section,
//!     simulation::{run, Clock, MembraneDynamics},
//! };
//!
//! /// Stand-in engine that relaxes voltage towards the leak reversal potential
//! struct Relaxation;
//!
//! impl MembraneDynamics for Relaxation {
//!     fn advance(&mut self, sections: &mut [&mut Section], clock: &Clock) {
//!         for section in sections.iter_mut() {
//!             let segment = section.segment_mut(0.5);
//!             segment.v += clock.dt * (-50. - segment.v) / 10.;
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), HcoError> {
//!     let mut cell_a = HcoCell::new()?;
//!     let mut cell_b = HcoCell::new()?;
//!
//!     let mut clock = Clock::new(0.1)?;
//!     run(&mut [&mut cell_a, &mut cell_b], &mut Relaxation, &mut clock, 10.)?;
//!
//!     let fig = cell_b.plot_vars(1, None)?;
//!     assert_eq!(fig.axes[0].title.as_deref(), Some("Cell B"));
//!     let _svg = fig.to_svg_string()?;
//!
//!     Ok(())
//! }
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod mechanism;
pub mod parameter;
pub mod plot;
pub mod record;
pub mod section;
pub mod simulation;
