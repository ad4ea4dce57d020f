//! Unit converter — length, weight and temperature.
//!
//! Linear units convert through a base unit per category (meters, grams).
//! Temperature is affine and converts through Celsius. Results are rounded
//! to four decimal places, except the same-unit case which is returned as is.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("cannot convert {from} to {to}: different categories")]
    CategoryMismatch { from: &'static str, to: &'static str },
    #[error("{unit} does not belong to {category}")]
    WrongCategory { unit: &'static str, category: &'static str },
    #[error("value and result must be finite numbers")]
    NotFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
}

impl UnitCategory {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Weight => "weight",
            Self::Temperature => "temperature",
        }
    }

    /// Units offered for this category, in menu order.
    #[must_use]
    pub fn units(self) -> Vec<Unit> {
        Unit::ALL.into_iter().filter(|u| u.category() == self).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Meters,
    Kilometers,
    Centimeters,
    Feet,
    Inches,
    Miles,
    Grams,
    Kilograms,
    Pounds,
    Ounces,
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Unit {
    pub const ALL: [Self; 13] = [
        Self::Meters,
        Self::Kilometers,
        Self::Centimeters,
        Self::Feet,
        Self::Inches,
        Self::Miles,
        Self::Grams,
        Self::Kilograms,
        Self::Pounds,
        Self::Ounces,
        Self::Celsius,
        Self::Fahrenheit,
        Self::Kelvin,
    ];

    #[must_use]
    pub fn category(self) -> UnitCategory {
        match self {
            Self::Meters | Self::Kilometers | Self::Centimeters | Self::Feet | Self::Inches | Self::Miles => {
                UnitCategory::Length
            }
            Self::Grams | Self::Kilograms | Self::Pounds | Self::Ounces => UnitCategory::Weight,
            Self::Celsius | Self::Fahrenheit | Self::Kelvin => UnitCategory::Temperature,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Meters => "meters",
            Self::Kilometers => "kilometers",
            Self::Centimeters => "centimeters",
            Self::Feet => "feet",
            Self::Inches => "inches",
            Self::Miles => "miles",
            Self::Grams => "grams",
            Self::Kilograms => "kilograms",
            Self::Pounds => "pounds",
            Self::Ounces => "ounces",
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
            Self::Kelvin => "kelvin",
        }
    }

    /// # Errors
    ///
    /// Returns [`ConvertError::UnknownUnit`] for an unrecognized name.
    pub fn from_name(name: &str) -> Result<Self, ConvertError> {
        let lowered = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|u| u.name() == lowered)
            .ok_or_else(|| ConvertError::UnknownUnit(name.to_string()))
    }

    /// Value expressed in the category's base unit (meters, grams, Celsius).
    fn to_base(self, v: f64) -> f64 {
        match self {
            Self::Meters | Self::Grams | Self::Celsius => v,
            Self::Kilometers | Self::Kilograms => v * 1000.0,
            Self::Centimeters => v / 100.0,
            Self::Feet => v / 3.28084,
            Self::Inches => v / 39.3701,
            Self::Miles => v * 1609.34,
            Self::Pounds => v / 0.002_204_62,
            Self::Ounces => v / 0.035_274,
            Self::Fahrenheit => (v - 32.0) * 5.0 / 9.0,
            Self::Kelvin => v - 273.15,
        }
    }

    fn from_base(self, v: f64) -> f64 {
        match self {
            Self::Meters | Self::Grams | Self::Celsius => v,
            Self::Kilometers | Self::Kilograms => v / 1000.0,
            Self::Centimeters => v * 100.0,
            Self::Feet => v * 3.28084,
            Self::Inches => v * 39.3701,
            Self::Miles => v / 1609.34,
            Self::Pounds => v * 0.002_204_62,
            Self::Ounces => v * 0.035_274,
            Self::Fahrenheit => v * 9.0 / 5.0 + 32.0,
            Self::Kelvin => v + 273.15,
        }
    }
}

/// Convert `value` from one unit to another.
///
/// # Errors
///
/// Returns [`ConvertError`] for non-finite input or units from different
/// categories.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, ConvertError> {
    if !value.is_finite() {
        return Err(ConvertError::NotFinite);
    }
    if from == to {
        return Ok(value);
    }
    if from.category() != to.category() {
        return Err(ConvertError::CategoryMismatch { from: from.name(), to: to.name() });
    }
    let converted = round4(to.from_base(from.to_base(value)));
    if !converted.is_finite() {
        return Err(ConvertError::NotFinite);
    }
    Ok(converted)
}

/// Check both units belong to `category` before converting.
///
/// # Errors
///
/// Returns [`ConvertError::WrongCategory`] naming the first unit outside
/// `category`, or any error from [`convert`].
pub fn convert_in(category: UnitCategory, value: f64, from: Unit, to: Unit) -> Result<f64, ConvertError> {
    for unit in [from, to] {
        if unit.category() != category {
            return Err(ConvertError::WrongCategory { unit: unit.name(), category: category.name() });
        }
    }
    convert(value, from, to)
}

/// Values too large to scale have no fractional digits left to round.
fn round4(v: f64) -> f64 {
    let scaled = v * 10_000.0;
    if scaled.is_finite() { scaled.round() / 10_000.0 } else { v }
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
