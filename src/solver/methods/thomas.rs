//! Tridiagonal linear solver (Thomas algorithm)
//!
//! # Mathematical Background
//!
//! A tridiagonal system couples every unknown with its two neighbours:
//!
//! ```text
//! a[i-1]·x[i-1] + b[i]·x[i] + c[i]·x[i+1] = d[i]        i = 0..n-1
//! ```
//!
//! with `a` the sub-diagonal (length `n-1`), `b` the diagonal (length `n`) and
//! `c` the super-diagonal (length `n-1`).
//!
//! Gaussian elimination without pivoting reduces it in O(n):
//!
//! ```text
//! forward sweep:     m     = b[i] − a[i-1]·c'[i-1]
//!                    c'[i] = c[i] / m
//!                    d'[i] = (d[i] − a[i-1]·d'[i-1]) / m
//!
//! back substitution: x[n-1] = d'[n-1]
//!                    x[i]   = d'[i] − c'[i]·x[i+1]
//! ```
//!
//! # Stability
//!
//! Elimination without pivoting is stable when the matrix is diagonally
//! dominant, which every diffusion matrix built by this crate is
//! (`1 + 2r ≥ 2r` for any mesh ratio `r > 0`). A pivot `m` that is zero,
//! negligible relative to the row, or not finite stops the solve with a
//! [`HeatError::Numerical`].

use crate::error::{HeatError, Result};

/// Relative size under which a pivot counts as zero
const PIVOT_TOLERANCE: f64 = 1e-13;

// =================================================================================================
// Free functions
// =================================================================================================

/// Solve a tridiagonal system with the Thomas algorithm
///
/// # Arguments
///
/// * `a` - sub-diagonal, length `n - 1`
/// * `b` - diagonal, length `n`
/// * `c` - super-diagonal, length `n - 1`
/// * `d` - right-hand side, length `n`
///
/// # Errors
///
/// - `InvalidParameter` when `n = 0` or the lengths are inconsistent
/// - `Numerical` when a pivot vanishes or stops being finite
///
/// # Example
///
/// ```rust
/// use heat_rs::solver::thomas_solve;
///
/// // [ 2 -1  0 ] [x0]   [1]
/// // [-1  2 -1 ] [x1] = [0]
/// // [ 0 -1  2 ] [x2]   [1]
/// let x = thomas_solve(&[-1.0, -1.0], &[2.0, 2.0, 2.0], &[-1.0, -1.0], &[1.0, 0.0, 1.0]).unwrap();
/// assert!(x.iter().all(|&xi| (xi - 1.0).abs() < 1e-12));
/// ```
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> Result<Vec<f64>> {
    check_lengths(a, b, c, d.len())?;

    let mut x = d.to_vec();
    let mut scratch = vec![0.0; b.len()];
    solve_in_place(a, b, c, &mut x, &mut scratch)?;

    Ok(x)
}

/// Thomas elimination overwriting `rhs` with the solution
///
/// `scratch` must hold at least `b.len()` values and receives the modified
/// super-diagonal. Lengths are trusted: callers either went through
/// [`check_lengths`] or built the coefficients themselves.
pub(crate) fn solve_in_place(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    rhs: &mut [f64],
    scratch: &mut [f64],
) -> Result<()> {
    let n = b.len();
    debug_assert_eq!(rhs.len(), n);
    debug_assert!(scratch.len() >= n);

    // ====== Forward sweep ======

    let mut pivot = b[0];
    check_pivot(pivot, b[0].abs(), 0)?;

    scratch[0] = if n > 1 { c[0] / pivot } else { 0.0 };
    rhs[0] /= pivot;

    for i in 1..n {
        let coupling = a[i - 1] * scratch[i - 1];
        pivot = b[i] - coupling;
        check_pivot(pivot, b[i].abs() + coupling.abs(), i)?;

        if i < n - 1 {
            scratch[i] = c[i] / pivot;
        }
        rhs[i] = (rhs[i] - a[i - 1] * rhs[i - 1]) / pivot;
    }

    // ====== Back substitution ======

    for i in (0..n - 1).rev() {
        rhs[i] -= scratch[i] * rhs[i + 1];
    }

    if let Some(row) = rhs.iter().position(|x| !x.is_finite()) {
        return Err(HeatError::numerical(
            0,
            format!("non-finite solution at row {}", row),
        ));
    }

    Ok(())
}

fn check_pivot(pivot: f64, scale: f64, row: usize) -> Result<()> {
    if !pivot.is_finite() {
        return Err(HeatError::numerical(
            0,
            format!("non-finite pivot at row {}", row),
        ));
    }
    if pivot.abs() <= PIVOT_TOLERANCE * scale || pivot == 0.0 {
        return Err(HeatError::numerical(
            0,
            format!("zero pivot at row {} (singular tridiagonal system)", row),
        ));
    }
    Ok(())
}

fn check_lengths(a: &[f64], b: &[f64], c: &[f64], rhs: usize) -> Result<()> {
    let n = b.len();
    if n == 0 {
        return Err(HeatError::invalid("tridiagonal", "empty system"));
    }
    if rhs != n {
        return Err(HeatError::invalid(
            "tridiagonal",
            format!("right-hand side has length {}, diagonal has {}", rhs, n),
        ));
    }
    if a.len() != n - 1 || c.len() != n - 1 {
        return Err(HeatError::invalid(
            "tridiagonal",
            format!(
                "off-diagonals must have length {}, got {} (lower) and {} (upper)",
                n - 1,
                a.len(),
                c.len()
            ),
        ));
    }
    Ok(())
}

// =================================================================================================
// Tridiagonal system
// =================================================================================================

/// Owned tridiagonal system `A·x = rhs`
///
/// Built by the 1D solver to expose the system it solves at each step, and
/// handy in tests to check a solution by multiplying it back.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    lower: Vec<f64>,
    diagonal: Vec<f64>,
    upper: Vec<f64>,
    rhs: Vec<f64>,
}

impl TridiagonalSystem {
    /// Create a system, checking that the four bands have matching lengths
    pub fn new(lower: Vec<f64>, diagonal: Vec<f64>, upper: Vec<f64>, rhs: Vec<f64>) -> Result<Self> {
        check_lengths(&lower, &diagonal, &upper, rhs.len())?;
        Ok(Self {
            lower,
            diagonal,
            upper,
            rhs,
        })
    }

    pub fn len(&self) -> usize {
        self.diagonal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagonal.is_empty()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Solve the system
    pub fn solve(&self) -> Result<Vec<f64>> {
        let mut x = self.rhs.clone();
        let mut scratch = vec![0.0; self.len()];
        solve_in_place(&self.lower, &self.diagonal, &self.upper, &mut x, &mut scratch)?;
        Ok(x)
    }

    /// Matrix-vector product `A·x`
    ///
    /// # Panics
    ///
    /// Panics when `x` does not have the system's length.
    pub fn apply(&self, x: &[f64]) -> Vec<f64> {
        let n = self.len();
        assert_eq!(x.len(), n, "vector length must match the system");

        (0..n)
            .map(|i| {
                let mut value = self.diagonal[i] * x[i];
                if i > 0 {
                    value += self.lower[i - 1] * x[i - 1];
                }
                if i + 1 < n {
                    value += self.upper[i] * x[i + 1];
                }
                value
            })
            .collect()
    }

    /// `|b[i]| ≥ |a[i-1]| + |c[i]|` on every row
    pub fn is_diagonally_dominant(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            let lower = if i > 0 { self.lower[i - 1].abs() } else { 0.0 };
            let upper = if i + 1 < n { self.upper[i].abs() } else { 0.0 };
            self.diagonal[i].abs() >= lower + upper
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_identity() {
        let d = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x = thomas_solve(&[0.0; 4], &[1.0; 5], &[0.0; 4], &d).unwrap();
        assert_eq!(x, d);
    }

    #[test]
    fn test_single_equation() {
        let x = thomas_solve(&[], &[4.0], &[], &[2.0]).unwrap();
        assert_eq!(x, vec![0.5]);
    }

    #[test]
    fn test_laplacian() {
        // 1D Laplacian with unit Dirichlet data: exact solution is all ones
        let system = TridiagonalSystem::new(
            vec![-1.0; 3],
            vec![2.0; 4],
            vec![-1.0; 3],
            vec![1.0, 0.0, 0.0, 1.0],
        )
        .unwrap();

        let x = system.solve().unwrap();
        for xi in &x {
            assert!((xi - 1.0).abs() < 1e-12);
        }
        assert!(system.is_diagonally_dominant());
    }

    #[test]
    fn test_heat_pattern_stays_positive() {
        let n = 10;
        let r = 0.4;
        let x = thomas_solve(&vec![-r; n - 1], &vec![1.0 + 2.0 * r; n], &vec![-r; n - 1], &vec![1.0; n])
            .unwrap();

        for (i, &xi) in x.iter().enumerate() {
            assert!(xi > 0.0 && xi.is_finite(), "x[{i}] = {xi} should be positive finite");
        }
    }

    #[test]
    fn test_random_dominant_systems_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let n: usize = rng.gen_range(1..64);
            let lower: Vec<f64> = (0..n.saturating_sub(1)).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let upper: Vec<f64> = (0..n.saturating_sub(1)).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let diagonal: Vec<f64> = (0..n)
                .map(|i| {
                    let off = if i > 0 { lower[i - 1].abs() } else { 0.0 }
                        + if i + 1 < n { upper[i].abs() } else { 0.0 };
                    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                    sign * (off + rng.gen_range(0.1..2.0))
                })
                .collect();
            let rhs: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();

            let system = TridiagonalSystem::new(lower, diagonal, upper, rhs.clone()).unwrap();
            assert!(system.is_diagonally_dominant());

            let x = system.solve().unwrap();
            let ax = system.apply(&x);
            for (lhs, expected) in ax.iter().zip(&rhs) {
                assert!((lhs - expected).abs() < 1e-9, "A·x = {lhs}, expected {expected}");
            }
        }
    }

    #[test]
    fn test_zero_leading_pivot() {
        let error = thomas_solve(&[1.0], &[0.0, 1.0], &[1.0], &[1.0, 1.0]).unwrap_err();
        assert!(error.is_numerical());
        assert!(error.to_string().contains("row 0"));
    }

    #[test]
    fn test_singular_system() {
        // [1 1; 1 1] eliminates to a zero second pivot
        let error = thomas_solve(&[1.0], &[1.0, 1.0], &[1.0], &[1.0, 2.0]).unwrap_err();
        assert!(error.is_numerical());
        assert!(error.to_string().contains("row 1"));
    }

    #[test]
    fn test_non_finite_pivot() {
        let error = thomas_solve(&[], &[f64::NAN], &[], &[1.0]).unwrap_err();
        assert!(error.is_numerical());
    }

    #[test]
    fn test_inconsistent_lengths() {
        assert!(thomas_solve(&[], &[], &[], &[]).unwrap_err().is_invalid_parameter());
        assert!(thomas_solve(&[1.0], &[1.0, 1.0], &[], &[1.0, 1.0])
            .unwrap_err()
            .is_invalid_parameter());
        assert!(thomas_solve(&[1.0], &[2.0, 2.0], &[1.0], &[1.0])
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_apply() {
        let system = TridiagonalSystem::new(
            vec![1.0, 2.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0],
            vec![0.0; 3],
        )
        .unwrap();

        // [4 7 0; 1 5 8; 0 2 6] · [1 1 1]
        assert_eq!(system.apply(&[1.0, 1.0, 1.0]), vec![11.0, 14.0, 8.0]);
        assert!(!system.is_diagonally_dominant());
    }
}
