#[cfg(test)]
mod tests {
    use hco_cell::{
        cell::HcoCell,
        error::{HcoError, ParameterError},
        parameter::{Attributes, Parameter},
        section::Section,
    };

    #[test]
    pub fn test_set_value_then_reset_to_default() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;

        cell.set_biophysics(&Attributes::new().with_value("gbar_na", 0.5))?;
        let values = cell.get_biophysics(&Attributes::from_names(["gbar_na"]))?;
        assert_eq!(values.get("gbar_na"), Some(Some(0.5)));

        cell.set_biophysics(&Attributes::new().with_default("gbar_na"))?;
        assert_eq!(cell.soma.get(Parameter::GbarNa)?, 0.1);

        Ok(())
    }

    #[test]
    pub fn test_mixed_attributes() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;
        cell.set_biophysics(&Attributes::new().with_value("gbar_kdr", 0.2))?;

        let attributes = Attributes::new()
            .with_value("ek", -90.)
            .with_value("gbar_cat", 0.)
            .with_default("gbar_kdr");
        cell.set_biophysics(&attributes)?;

        let values = cell.get_biophysics(&Attributes::from_names(["ek", "gbar_cat", "gbar_kdr"]))?;
        assert_eq!(values.len(), 3);
        assert_eq!(values.value("ek"), Some(-90.));
        assert_eq!(values.value("gbar_cat"), Some(0.));
        assert_eq!(values.value("gbar_kdr"), Some(0.1));

        Ok(())
    }

    #[test]
    pub fn test_absent_value_without_default_is_skipped() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;

        cell.set_biophysics(&Attributes::new().with_default("ena").with_default("not_a_parameter"))?;

        assert_eq!(cell.soma.get(Parameter::Ena)?, 50.);

        Ok(())
    }

    #[test]
    pub fn test_defaults_survive_changes() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;
        let before = cell.default_parameters().clone();

        cell.set_biophysics(&Attributes::new().with_value("tauca_capool", 50.).with_value("cm", 2.))?;

        assert_eq!(cell.default_parameters(), &before);
        assert_eq!(cell.soma.get(Parameter::TaucaCapool)?, 50.);

        cell.set_biophysics(&Attributes::from_names(["tauca_capool", "cm"]))?;
        assert_eq!(cell.soma.get(Parameter::TaucaCapool)?, 200.);
        assert_eq!(cell.soma.get(Parameter::Cm)?, 1.);

        Ok(())
    }

    #[test]
    pub fn test_get_unknown_name_fails() -> Result<(), HcoError> {
        let cell = HcoCell::new()?;

        let result = cell.get_biophysics(&Attributes::from_names(["gbar_naa"]));

        assert!(matches!(result, Err(ParameterError::UnknownParameter(name)) if name == "gbar_naa"));

        Ok(())
    }

    #[test]
    pub fn test_set_unknown_name_with_value_fails() -> Result<(), HcoError> {
        let mut cell = HcoCell::new()?;

        let result = cell.set_biophysics(&Attributes::new().with_value("gbar_kv", 1.));

        assert!(matches!(result, Err(ParameterError::UnknownParameter(_))));

        Ok(())
    }

    #[test]
    pub fn test_attribute_requires_owning_mechanism() -> Result<(), HcoError> {
        let mut section = Section::new("soma");

        assert!(matches!(section.get(Parameter::GbarNa), Err(ParameterError::NotInserted(_))));
        assert!(matches!(section.set(Parameter::Ek, -80.), Err(ParameterError::NotInserted(_))));
        assert_eq!(section.get(Parameter::Cm)?, 1.);

        section.insert("ka")?;
        section.set(Parameter::Ek, -80.)?;
        assert_eq!(section.get(Parameter::Ek)?, -80.);
        assert!(matches!(section.get(Parameter::GbarKdr), Err(ParameterError::NotInserted(_))));

        section.insert("cat")?;
        section.set(Parameter::Cai, 1e-4)?;
        assert_eq!(section.get_by_name("cai")?, 1e-4);

        Ok(())
    }

    #[test]
    pub fn test_parameter_names_round_trip() {
        for parameter in Parameter::ALL {
            assert_eq!(parameter.to_str().parse::<Parameter>().ok(), Some(parameter));
        }
    }
}
