#[cfg(test)]
mod tests {
    use std::fs::File;
    use hco_cell::{
        cell::HcoCell,
        error::{HcoError, ParameterError, PlotError, SimulationError},
        parameter::Attributes,
        plot::{LegendLocation, LineColor},
        record::{Recording, StateVariable},
        section::Section,
        simulation::{run, Clock, MembraneDynamics},
    };

    /// Writes a deterministic ramp into every recorded variable so traces
    /// can be checked against the clock
    struct Ramp {
        initialized: bool,
    }

    impl MembraneDynamics for Ramp {
        fn initialize(&mut self, sections: &mut [&mut Section], _clock: &Clock) {
            self.initialized = true;
            for section in sections.iter_mut() {
                section.segment_mut(0.5).v = -60.;
            }
        }

        fn advance(&mut self, sections: &mut [&mut Section], clock: &Clock) {
            let t = clock.t + clock.dt;

            for (n, section) in sections.iter_mut().enumerate() {
                let segment = section.segment_mut(0.5);
                segment.v = -60. + t + n as f64;
                segment.cai = 1e-3 * t;
                for (i, var) in StateVariable::CURRENTS.iter().enumerate() {
                    var.write(segment, i as f64 * t);
                }
            }
        }
    }

    fn run_cells(cells: &mut [&mut HcoCell], tstop: f64) -> Result<usize, HcoError> {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut dynamics = Ramp { initialized: false };
        let mut clock = Clock::new(0.5)?;

        let steps = run(cells, &mut dynamics, &mut clock, tstop)?;
        assert!(dynamics.initialized);

        Ok(steps)
    }

    #[test]
    pub fn test_run_records_every_step() -> Result<(), HcoError> {
        let mut cell_a = HcoCell::new()?;
        let mut cell_b = HcoCell::new()?;

        let steps = run_cells(&mut [&mut cell_a, &mut cell_b], 10.)?;
        assert_eq!(steps, 20);

        let recording = cell_a.recording();
        assert_eq!(recording.len(), 21);
        assert_eq!(recording.time_span(), Some((0., 10.)));
        assert_eq!(recording.trace(StateVariable::V)[0], -60.);
        assert_eq!(recording.trace(StateVariable::V)[20], -50.);
        assert_eq!(cell_b.recording().trace(StateVariable::V)[20], -49.);
        assert_eq!(recording.trace(StateVariable::IKdr)[2], 2.);
        assert_eq!(recording.trace(StateVariable::Cai)[0], 50e-6);
        recording.validate()?;

        Ok(())
    }

    #[test]
    pub fn test_run_rejects_bad_clock() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;

        assert!(matches!(Clock::new(0.), Err(SimulationError::InvalidTimestep)));
        assert!(matches!(Clock::new(f64::NAN), Err(SimulationError::InvalidTimestep)));

        let mut clock = Clock { t: 5., dt: 0.1 };
        let result = run(&mut [&mut cell], &mut Ramp { initialized: false }, &mut clock, 1.);
        assert!(matches!(result, Err(SimulationError::StopTimeBeforeStart)));
        assert!(cell.recording().is_empty());

        Ok(())
    }

    #[test]
    pub fn test_run_rejects_non_finite_stop_time() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;

        for tstop in [f64::NAN, f64::INFINITY] {
            let mut clock = Clock::default();
            let result = run(&mut [&mut cell], &mut Ramp { initialized: false }, &mut clock, tstop);
            assert!(matches!(result, Err(SimulationError::InvalidStopTime)));
            assert_eq!(clock.t, 0.);
        }

        let mut clock = Clock { t: f64::NAN, dt: 0.1 };
        let result = run(&mut [&mut cell], &mut Ramp { initialized: false }, &mut clock, 1.);
        assert!(matches!(result, Err(SimulationError::InvalidStopTime)));

        // step vanishes against the clock value so time would never advance
        let mut clock = Clock { t: 1e20, dt: 1e-3 };
        let result = run(&mut [&mut cell], &mut Ramp { initialized: false }, &mut clock, 2e20);
        assert!(matches!(result, Err(SimulationError::InvalidTimestep)));

        assert!(cell.recording().is_empty());

        Ok(())
    }

    #[test]
    pub fn test_plot_before_run_fails() -> Result<(), HcoError> {
        let cell = HcoCell::new()?;

        assert!(matches!(cell.plot_vars(0, None), Err(PlotError::EmptyRecording)));

        Ok(())
    }

    #[test]
    pub fn test_plot_panels() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;
        run_cells(&mut [&mut cell], 5.)?;

        let fig = cell.plot_vars(0, Some((640, 480)))?;

        assert_eq!(fig.size, (640, 480));
        assert_eq!(fig.axes.len(), 3);

        let voltage = &fig.axes[0];
        assert_eq!(voltage.title.as_deref(), Some("Cell A"));
        assert_eq!(voltage.ylim, Some((-90., 60.)));
        assert_eq!(voltage.lines[0].color, LineColor::Blue);
        assert_eq!(voltage.lines[0].y, cell.recording().trace(StateVariable::V));

        let currents = &fig.axes[1];
        assert_eq!(
            currents.labels(),
            vec!["ileak_leak", "ina_na", "ik_kdr", "ica_cas", "ica_cat", "ik_ka", "ik_kca", "ih_hyper"],
        );
        assert_eq!(currents.lines[3].color, LineColor::Orange);
        assert_eq!(currents.legend, Some(LegendLocation::UpperRight));
        assert_eq!(currents.ylabel.as_deref(), Some("Current (mA/cm²)"));

        let calcium = &fig.axes[2];
        assert_eq!(calcium.ylim, Some((0., 0.4)));
        assert_eq!(calcium.xlabel.as_deref(), Some("Time (ms)"));
        assert!(fig.axes.iter().all(|axes| axes.xlim == Some((0., 5.))));

        Ok(())
    }

    #[test]
    pub fn test_plot_cell_b() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;
        run_cells(&mut [&mut cell], 1.)?;

        let fig = cell.plot_vars(1, None)?;

        assert_eq!(fig.axes[0].title.as_deref(), Some("Cell B"));
        assert_eq!(fig.axes[0].lines[0].color, LineColor::Red);
        assert_eq!(fig.axes[2].lines[0].color, LineColor::Red);

        Ok(())
    }

    #[test]
    pub fn test_zero_conductance_hides_current() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;
        run_cells(&mut [&mut cell], 1.)?;

        cell.set_biophysics(&Attributes::new().with_value("gbar_cat", 0.).with_value("gbar_na", 0.))?;
        let labels = cell.plot_vars(0, None)?.axes[1].labels()
            .iter()
            .map(|label| label.to_string())
            .collect::<Vec<String>>();
        assert!(!labels.contains(&String::from("ica_cat")));
        assert!(!labels.contains(&String::from("ina_na")));
        assert_eq!(labels.len(), 6);

        cell.set_biophysics(&Attributes::new().with_value("gbar_cat", 0.002))?;
        let fig = cell.plot_vars(0, None)?;
        assert!(fig.axes[1].labels().contains(&"ica_cat"));

        Ok(())
    }

    #[test]
    pub fn test_plot_without_conductance_fails() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;
        run_cells(&mut [&mut cell], 1.)?;

        cell.soma = Section::new("bare");

        let result = cell.plot_vars(0, None);
        assert!(matches!(
            result,
            Err(PlotError::MissingConductance(ParameterError::NotInserted(name))) if name == "gbar_leak"
        ));

        Ok(())
    }

    #[test]
    pub fn test_svg_rendering() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;
        run_cells(&mut [&mut cell], 2.)?;
        let fig = cell.plot_vars(0, None)?;

        let svg = fig.to_svg_string()?;
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Cell A"));
        assert!(svg.contains("ina_na"));

        let dir = tempfile::tempdir().map_err(|e| PlotError::Backend(e.to_string()))?;
        let path = dir.path().join("cell_a.svg");
        fig.save_svg(&path)?;
        assert!(path.exists());

        Ok(())
    }

    #[test]
    pub fn test_recording_export() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;
        run_cells(&mut [&mut cell], 2.)?;

        let matrix = cell.recording().to_array();
        assert_eq!(matrix.shape(), &[5, 11]);
        assert_eq!(matrix[[4, 0]], 2.);
        assert_eq!(matrix[[4, 9]], cell.recording().trace(StateVariable::V)[4]);

        let dir = tempfile::tempdir().expect("Cannot create temporary directory");
        let path = dir.path().join("cell.csv");
        cell.recording().write_csv(File::create(&path).expect("Cannot create file"))?;

        let loaded = Recording::read_csv(File::open(&path).expect("Cannot open file"), 0.5)?;
        assert_eq!(loaded.time(), cell.recording().time());
        assert_eq!(loaded.trace(StateVariable::Cai), cell.recording().trace(StateVariable::Cai));

        let mut other = HcoCell::new()?;
        other.load_recording(loaded)?;
        assert_eq!(other.plot_vars(1, None)?.axes[0].xlim, Some((0., 2.)));

        let mut cleared = cell.recording().clone();
        cleared.clear();
        assert!(cleared.is_empty());
        assert!(cleared.trace(StateVariable::V).is_empty());

        Ok(())
    }

    #[test]
    pub fn test_read_csv_missing_column() {
        let data = "t,v\n0,-65\n";

        let result = Recording::read_csv(data.as_bytes(), 0.5);

        assert!(result.is_err());
    }

    #[test]
    pub fn test_variable_names() -> Result<(), HcoError> {
        assert_eq!("ik_kca".parse::<StateVariable>()?, StateVariable::IKca);
        assert!("ik_kv".parse::<StateVariable>().is_err());

        let gated = StateVariable::ALL.iter()
            .filter(|var| var.conductance().is_some())
            .count();
        assert_eq!(gated, StateVariable::CURRENTS.len());

        Ok(())
    }
}
