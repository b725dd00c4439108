use serde::{Deserialize, Serialize};
use std::str::FromStr;

const ML_PER_FL_OZ: f64 = 29.5735;
const G_PER_OZ: f64 = 28.3495;
const KG_PER_LB: f64 = 0.453_592;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Short sample of the units this system uses, for display next to the
    /// system's name.
    pub const fn example_units(self) -> &'static str {
        match self {
            Self::Metric => "ml, g, °C",
            Self::Imperial => "fl oz, oz, °F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Volume,
    Weight,
    Temperature,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[strum(to_string = "ml", serialize = "milliliters")]
    Milliliters,
    #[strum(to_string = "fl oz", serialize = "floz", serialize = "fl-oz")]
    FluidOunces,
    #[strum(to_string = "g", serialize = "grams")]
    Grams,
    #[strum(to_string = "oz", serialize = "ounces")]
    Ounces,
    #[strum(to_string = "kg", serialize = "kilograms")]
    Kilograms,
    #[strum(to_string = "lb", serialize = "lbs", serialize = "pounds")]
    Pounds,
    #[strum(to_string = "°C", serialize = "c", serialize = "celsius")]
    Celsius,
    #[strum(to_string = "°F", serialize = "f", serialize = "fahrenheit")]
    Fahrenheit,
}

impl Unit {
    pub const fn kind(self) -> UnitKind {
        match self {
            Self::Milliliters | Self::FluidOunces => UnitKind::Volume,
            Self::Grams | Self::Ounces | Self::Kilograms | Self::Pounds => UnitKind::Weight,
            Self::Celsius | Self::Fahrenheit => UnitKind::Temperature,
        }
    }

    pub const fn system(self) -> UnitSystem {
        match self {
            Self::Milliliters | Self::Grams | Self::Kilograms | Self::Celsius => UnitSystem::Metric,
            Self::FluidOunces | Self::Ounces | Self::Pounds | Self::Fahrenheit => {
                UnitSystem::Imperial
            }
        }
    }

    /// The unit of the same kind in the other system.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Milliliters => Self::FluidOunces,
            Self::FluidOunces => Self::Milliliters,
            Self::Grams => Self::Ounces,
            Self::Ounces => Self::Grams,
            Self::Kilograms => Self::Pounds,
            Self::Pounds => Self::Kilograms,
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// The unit that measures the given kind in the given system.
    pub const fn for_kind(kind: UnitKind, system: UnitSystem) -> Self {
        match (kind, system) {
            (UnitKind::Volume, UnitSystem::Metric) => Self::Milliliters,
            (UnitKind::Volume, UnitSystem::Imperial) => Self::FluidOunces,
            (UnitKind::Weight, UnitSystem::Metric) => Self::Grams,
            (UnitKind::Weight, UnitSystem::Imperial) => Self::Ounces,
            (UnitKind::Temperature, UnitSystem::Metric) => Self::Celsius,
            (UnitKind::Temperature, UnitSystem::Imperial) => Self::Fahrenheit,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeasureError {
    #[error("Could not read a number from \"{0}\"")]
    InvalidNumber(String),
    #[error("No unit given in \"{0}\" (try something like \"120 ml\")")]
    MissingUnit(String),
    #[error("Unit not recognized: \"{0}\"")]
    UnknownUnit(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Re-expresses the measurement in the given system. A measurement
    /// already in that system is returned unchanged, so converting is
    /// lossless when there is nothing to do.
    #[must_use]
    pub fn converted_to(self, system: UnitSystem) -> Self {
        if self.unit.system() == system {
            return self;
        }

        let value = match self.unit {
            Unit::Milliliters => self.value / ML_PER_FL_OZ,
            Unit::FluidOunces => self.value * ML_PER_FL_OZ,
            Unit::Grams => self.value / G_PER_OZ,
            Unit::Ounces => self.value * G_PER_OZ,
            Unit::Kilograms => self.value / KG_PER_LB,
            Unit::Pounds => self.value * KG_PER_LB,
            Unit::Celsius => self.value * 9.0 / 5.0 + 32.0,
            Unit::Fahrenheit => (self.value - 32.0) * 5.0 / 9.0,
        };

        Self {
            value,
            unit: self.unit.counterpart(),
        }
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value.fract().abs() < f64::EPSILON {
            write!(f, "{:.0} {}", self.value, self.unit)
        } else {
            write!(f, "{:.1} {}", self.value, self.unit)
        }
    }
}

impl FromStr for Measurement {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let number_end = s
            .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')
            .unwrap_or(s.len());
        let (number_str, unit_str) = s.split_at(number_end);

        let value = number_str
            .parse::<f64>()
            .map_err(|_| MeasureError::InvalidNumber(s.to_string()))?;

        let unit_str = unit_str.trim();
        if unit_str.is_empty() {
            return Err(MeasureError::MissingUnit(s.to_string()));
        }

        let unit = unit_str
            .parse::<Unit>()
            .map_err(|_| MeasureError::UnknownUnit(unit_str.to_string()))?;

        Ok(Self { value, unit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_and_without_spaces() {
        assert_eq!(
            "120 ml".parse::<Measurement>(),
            Ok(Measurement::new(120.0, Unit::Milliliters))
        );
        assert_eq!(
            "4.5oz".parse::<Measurement>(),
            Ok(Measurement::new(4.5, Unit::Ounces))
        );
        assert_eq!(
            "  3 fl oz ".parse::<Measurement>(),
            Ok(Measurement::new(3.0, Unit::FluidOunces))
        );
    }

    #[test]
    fn parse_unit_names_case_insensitively() {
        assert_eq!(
            "98.6 F".parse::<Measurement>(),
            Ok(Measurement::new(98.6, Unit::Fahrenheit))
        );
        assert_eq!(
            "2 Kilograms".parse::<Measurement>(),
            Ok(Measurement::new(2.0, Unit::Kilograms))
        );
    }

    #[test]
    fn parse_failures() {
        assert_eq!(
            "ml".parse::<Measurement>(),
            Err(MeasureError::InvalidNumber("ml".to_string()))
        );
        assert_eq!(
            "120".parse::<Measurement>(),
            Err(MeasureError::MissingUnit("120".to_string()))
        );
        assert_eq!(
            "120 parsecs".parse::<Measurement>(),
            Err(MeasureError::UnknownUnit("parsecs".to_string()))
        );
    }

    #[test]
    fn convert_volume() {
        let metric = Measurement::new(118.294, Unit::Milliliters);
        let imperial = metric.converted_to(UnitSystem::Imperial);

        assert_eq!(imperial.unit, Unit::FluidOunces);
        assert!((imperial.value - 4.0).abs() < 0.001);
    }

    #[test]
    fn convert_temperature_both_ways() {
        let freezing = Measurement::new(0.0, Unit::Celsius);
        assert_eq!(
            freezing.converted_to(UnitSystem::Imperial),
            Measurement::new(32.0, Unit::Fahrenheit)
        );

        let body = Measurement::new(98.6, Unit::Fahrenheit);
        let celsius = body.converted_to(UnitSystem::Metric);
        assert!((celsius.value - 37.0).abs() < 0.001);
    }

    #[test]
    fn convert_is_identity_within_system() {
        let m = Measurement::new(250.0, Unit::Milliliters);
        assert_eq!(m.converted_to(UnitSystem::Metric), m);
    }

    #[test]
    fn display_trims_whole_numbers() {
        assert_eq!(
            Measurement::new(120.0, Unit::Milliliters).to_string(),
            "120 ml"
        );
        assert_eq!(
            Measurement::new(4.057, Unit::FluidOunces).to_string(),
            "4.1 fl oz"
        );
    }
}
