//! Emission calculator.
//!
//! Converts a raw activity measurement into kilograms of CO2-equivalent
//! using a fixed coefficient per category.

use crate::activity::Category;

/// kg CO2e per kilometre travelled.
pub const TRANSPORT_KG_PER_KM: f64 = 0.21;

/// kg CO2e per kWh of electricity.
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.45;

/// kg CO2e per kilogram of food.
pub const FOOD_KG_PER_KG: f64 = 5.0;

/// kg CO2e per kilogram of waste.
pub const WASTE_KG_PER_KG: f64 = 0.5;

impl Category {
    /// Emission coefficient in kg CO2e per unit of this category.
    #[must_use]
    pub const fn coefficient(self) -> f64 {
        match self {
            Self::Transport => TRANSPORT_KG_PER_KM,
            Self::Electricity => ELECTRICITY_KG_PER_KWH,
            Self::Food => FOOD_KG_PER_KG,
            Self::Waste => WASTE_KG_PER_KG,
        }
    }
}

/// CO2-equivalent of `raw_value` units of `category`.
///
/// Negative values are passed through unchanged; rejecting them is the job
/// of [`NewActivity::new`](crate::activity::NewActivity::new).
#[must_use]
pub fn co2_equivalent(category: Category, raw_value: f64) -> f64 {
    raw_value * category.coefficient()
}

/// CO2-equivalent for an unvalidated category label.
///
/// Labels outside the known set yield `0.0` rather than an error.
#[must_use]
pub fn co2_equivalent_for(label: &str, raw_value: f64) -> f64 {
    label
        .parse::<Category>()
        .map_or(0.0, |category| co2_equivalent(category, raw_value))
}
