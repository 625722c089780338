//! Error types for heat-rs
//!
//! Two kinds of failure exist:
//!
//! - [`HeatError::InvalidParameter`]: raised while building a material, a
//!   configuration or a solver. No partially built value is ever returned.
//! - [`HeatError::Numerical`]: raised by `step()` when the tridiagonal
//!   elimination meets a (near-)zero pivot or the field stops being finite.
//!   The failed step is never committed.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeatError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatError {
    #[error("Invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("Numerical error at step {step}: {reason}")]
    Numerical { step: usize, reason: String },
}

impl HeatError {
    /// Shorthand for [`HeatError::InvalidParameter`]
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        HeatError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`HeatError::Numerical`]
    pub fn numerical(step: usize, reason: impl Into<String>) -> Self {
        HeatError::Numerical {
            step,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, HeatError::InvalidParameter { .. })
    }

    pub fn is_numerical(&self) -> bool {
        matches!(self, HeatError::Numerical { .. })
    }

    /// Re-tag a numerical error with the step it happened in.
    ///
    /// The tridiagonal kernel does not know which time step it serves, it
    /// reports step 0 and the caller fills in the real value.
    pub(crate) fn at_step(self, step: usize) -> Self {
        match self {
            HeatError::Numerical { reason, .. } => HeatError::Numerical { step, reason },
            other => other,
        }
    }
}

/// Require a strictly positive, finite value
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HeatError::invalid(parameter, format!("must be finite, got {}", value)));
    }
    if value <= 0.0 {
        return Err(HeatError::invalid(parameter, format!("must be positive, got {}", value)));
    }
    Ok(())
}

/// Require a finite value
pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HeatError::invalid(parameter, format!("must be finite, got {}", value)))
    }
}
