use crate::error::ConfigError;
use crate::state::{Gender, Shot};

/// Tolerance used when checking that a table's probabilities sum to one.
pub const PRECISION_SUM_TOLERANCE: f64 = 1e-9;

/// Oracle providing the shot precision table for a gender category.
///
/// Archers read it on every shot; it never changes during a session.
pub trait PrecisionOracle {
    fn precision(&self, gender: Gender) -> &PrecisionTable;
}

/// Probabilities of the four shot outcomes for one gender category.
///
/// Outcomes are resolved in the fixed order central, intermediate, outside,
/// with anything beyond the first three cumulative thresholds a miss.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecisionTable {
    pub central: f64,
    pub intermediate: f64,
    pub outside: f64,
    pub miss: f64,
}

impl PrecisionTable {
    pub const fn new(central: f64, intermediate: f64, outside: f64, miss: f64) -> Self {
        Self {
            central,
            intermediate,
            outside,
            miss,
        }
    }

    /// Probability assigned to a single outcome.
    pub const fn probability(&self, shot: Shot) -> f64 {
        match shot {
            Shot::Central => self.central,
            Shot::Intermediate => self.intermediate,
            Shot::Outside => self.outside,
            Shot::Miss => self.miss,
        }
    }

    pub fn sum(&self) -> f64 {
        self.central + self.intermediate + self.outside + self.miss
    }

    /// Map a unit draw `u ∈ [0, 1)` onto an outcome by cumulative thresholds.
    pub fn resolve(&self, u: f64) -> Shot {
        let central = self.central;
        let intermediate = central + self.intermediate;
        let outside = intermediate + self.outside;

        if u < central {
            Shot::Central
        } else if u < intermediate {
            Shot::Intermediate
        } else if u < outside {
            Shot::Outside
        } else {
            Shot::Miss
        }
    }

    /// Reject negative or non-finite entries and tables that do not sum to one.
    pub fn validate(&self, gender: Gender) -> Result<(), ConfigError> {
        for value in [self.central, self.intermediate, self.outside, self.miss] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidProbability { gender, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > PRECISION_SUM_TOLERANCE {
            return Err(ConfigError::PrecisionSum { gender, sum });
        }
        Ok(())
    }
}

/// Precision tables for both gender categories.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrecisionTables {
    pub male: PrecisionTable,
    pub female: PrecisionTable,
}

impl PrecisionTables {
    pub const MALE: PrecisionTable = PrecisionTable::new(0.20, 0.33, 0.40, 0.07);
    pub const FEMALE: PrecisionTable = PrecisionTable::new(0.30, 0.38, 0.27, 0.05);

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.male.validate(Gender::Male)?;
        self.female.validate(Gender::Female)
    }
}

impl Default for PrecisionTables {
    fn default() -> Self {
        Self {
            male: Self::MALE,
            female: Self::FEMALE,
        }
    }
}

impl PrecisionOracle for PrecisionTables {
    fn precision(&self, gender: Gender) -> &PrecisionTable {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }
}
