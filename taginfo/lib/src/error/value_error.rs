//! Parameter validation errors.

use thiserror::Error;

/// A single constraint violated by a caller-supplied parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamFault {
    /// A string parameter was empty or whitespace-only.
    #[error("{field}: must not be empty or whitespace-only")]
    Blank {
        /// The parameter name.
        field: &'static str,
    },

    /// An integer parameter fell outside its allowed range.
    #[error("{field}: {value} is out of range, expected {expected}")]
    IntOutOfRange {
        /// The parameter name.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Human readable description of the allowed range.
        expected: &'static str,
    },

    /// A float parameter was NaN, infinite, or outside its allowed range.
    #[error("{field}: {value} is out of range, expected a finite number in [{min}, {max}]")]
    FloatOutOfRange {
        /// The parameter name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// An enum parameter was given a token the API does not accept.
    #[error("{field}: unknown value {token:?}, expected one of {}", .expected.join(", "))]
    UnknownVariant {
        /// The parameter name.
        field: &'static str,
        /// The rejected token.
        token: String,
        /// Every accepted token.
        expected: &'static [&'static str],
    },
}

impl ParamFault {
    /// Returns the name of the offending parameter.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field }
            | Self::IntOutOfRange { field, .. }
            | Self::FloatOutOfRange { field, .. }
            | Self::UnknownVariant { field, .. } => *field,
        }
    }
}

/// Parameters failed validation, so the taginfo API was not called.
///
/// Carries every fault found in the parameter set, not just the first.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid parameters{}", describe(.faults))]
pub struct ValueError {
    faults: Vec<ParamFault>,
}

impl ValueError {
    /// Returns the individual faults.
    pub fn faults(&self) -> &[ParamFault] {
        &self.faults
    }

    /// Returns `true` if the named parameter was rejected.
    pub fn rejects(&self, field: &str) -> bool {
        self.faults.iter().any(|f| f.field() == field)
    }
}

impl From<Vec<ParamFault>> for ValueError {
    fn from(faults: Vec<ParamFault>) -> Self {
        Self { faults }
    }
}

fn describe(faults: &[ParamFault]) -> String {
    let joined = faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    if joined.is_empty() {
        joined
    } else {
        format!(": {joined}")
    }
}
