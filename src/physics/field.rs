//! Temperature field snapshots
//!
//! This module provides the container handed to readers of a simulation
//! (renderers, recorders, tests). It is always an owned copy taken between
//! two steps, so a reader never observes a field mid-update.

use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Temperature field of a bar or a plate
///
/// # Storage Types
///
/// - **Line**: 1D bar, `u[i]` at `x = i·Δx`
/// - **Plate**: 2D plate, `u[(i, j)]` at `(x, y) = (i·Δx, j·Δx)`
///
/// # Memory Layout
///
/// - **Line[n]**: 8n bytes
/// - **Plate[n×n]**: 8n² bytes (column-major: a column is a line of constant `y`)
///
/// # Examples
///
/// ```rust
/// use heat_rs::physics::TemperatureField;
///
/// let bar = TemperatureField::uniform_line(11, 286.15);
/// assert_eq!(bar.ndim(), 1);
/// assert_eq!(bar.max(), 286.15);
///
/// let plate = TemperatureField::uniform_plate(5, 0.0);
/// assert_eq!(plate.shape(), vec![5, 5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TemperatureField {
    /// 1D bar
    Line(DVector<f64>),

    /// 2D plate, indexed `(i, j)` with `i` along x
    Plate(DMatrix<f64>),
}

impl TemperatureField {
    // ======================================= constructors =======================================

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::Line(DVector::from_vec(values))
    }

    pub fn uniform_line(points: usize, value: f64) -> Self {
        Self::Line(DVector::from_element(points, value))
    }

    pub fn uniform_plate(points: usize, value: f64) -> Self {
        Self::Plate(DMatrix::from_element(points, points, value))
    }

    // ========================================== Queries ==========================================

    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line(_))
    }

    pub fn is_plate(&self) -> bool {
        matches!(self, Self::Plate(_))
    }

    /// Spatial dimension: 1 (bar) or 2 (plate)
    pub fn ndim(&self) -> usize {
        match self {
            TemperatureField::Line(_) => 1,
            TemperatureField::Plate(_) => 2,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            TemperatureField::Line(v) => vec![v.len()],
            TemperatureField::Plate(m) => vec![m.nrows(), m.ncols()],
        }
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All nodal values as a flat slice (column-major for plates)
    pub fn values(&self) -> &[f64] {
        match self {
            TemperatureField::Line(v) => v.as_slice(),
            TemperatureField::Plate(m) => m.as_slice(),
        }
    }

    pub fn max(&self) -> f64 {
        self.values().iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.values().iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.values().iter().sum::<f64>() / self.len() as f64
    }

    /// True when no node holds NaN or ±Inf
    pub fn is_finite(&self) -> bool {
        self.values().iter().all(|x| x.is_finite())
    }

    /// First non-finite node, as a flat index
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values().iter().position(|x| !x.is_finite())
    }

    // ======================================== Extractions ========================================

    /// Extract as a line
    ///
    /// # Panics
    ///
    /// Panics on a plate field; [`try_as_line`](Self::try_as_line) does not.
    pub fn as_line(&self) -> &DVector<f64> {
        match self {
            TemperatureField::Line(value) => value,
            _ => panic!("Not a line field"),
        }
    }

    pub fn try_as_line(&self) -> Option<&DVector<f64>> {
        match self {
            TemperatureField::Line(value) => Some(value),
            _ => None,
        }
    }

    /// Extract as a plate
    ///
    /// # Panics
    ///
    /// Panics on a line field; [`try_as_plate`](Self::try_as_plate) does not.
    pub fn as_plate(&self) -> &DMatrix<f64> {
        match self {
            TemperatureField::Plate(value) => value,
            _ => panic!("Not a plate field"),
        }
    }

    pub fn try_as_plate(&self) -> Option<&DMatrix<f64>> {
        match self {
            TemperatureField::Plate(value) => Some(value),
            _ => None,
        }
    }

    /// Largest absolute node-wise difference with another field of the same shape
    pub fn max_abs_diff(&self, other: &TemperatureField) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.values()
                .iter()
                .zip(other.values())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

// ======================== Display ============================

impl fmt::Display for TemperatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureField::Line(value) => write!(f, "Line [{}]", value.len()),
            TemperatureField::Plate(value) => {
                write!(f, "Plate [{} * {}]", value.nrows(), value.ncols())
            }
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line() {
        let field = TemperatureField::from_vec(vec![1.0, 5.0, 2.0]);
        assert!(field.is_line());
        assert_eq!(field.ndim(), 1);
        assert_eq!(field.len(), 3);
        assert_eq!(field.max(), 5.0);
        assert_eq!(field.min(), 1.0);
        assert!((field.mean() - 8.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_plate() {
        let field = TemperatureField::uniform_plate(4, 2.5);
        assert!(field.is_plate());
        assert_eq!(field.ndim(), 2);
        assert_eq!(field.shape(), vec![4, 4]);
        assert_eq!(field.len(), 16);
        assert_eq!(field.try_as_plate().map(|plate| plate[(3, 1)]), Some(2.5));
    }

    #[test]
    fn test_finiteness() {
        let mut values = vec![0.0; 5];
        assert!(TemperatureField::from_vec(values.clone()).is_finite());

        values[3] = f64::NAN;
        let field = TemperatureField::from_vec(values);
        assert!(!field.is_finite());
        assert_eq!(field.first_non_finite(), Some(3));
    }

    #[test]
    fn test_extractions() {
        let line = TemperatureField::uniform_line(3, 1.0);
        assert!(line.try_as_plate().is_none());
        assert_eq!(line.try_as_line().map(|v| v.len()), Some(3));
    }

    #[test]
    #[should_panic(expected = "Not a plate field")]
    fn test_as_plate_panics_on_line() {
        TemperatureField::uniform_line(3, 1.0).as_plate();
    }

    #[test]
    fn test_max_abs_diff() {
        let a = TemperatureField::from_vec(vec![1.0, 2.0, 3.0]);
        let b = TemperatureField::from_vec(vec![1.0, 2.5, 2.0]);
        assert_eq!(a.max_abs_diff(&b), Some(1.0));

        let plate = TemperatureField::uniform_plate(3, 0.0);
        assert_eq!(a.max_abs_diff(&plate), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TemperatureField::uniform_line(7, 0.0).to_string(), "Line [7]");
        assert_eq!(TemperatureField::uniform_plate(3, 0.0).to_string(), "Plate [3 * 3]");
    }
}
