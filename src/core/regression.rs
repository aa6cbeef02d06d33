//! Feature scaling and ordinary least squares
//!
//! Small dense implementations sized for a handful of features:
//!
//! - [`StandardScaler`]: per-column z-score with population standard deviation
//! - [`LinearRegression`]: OLS with intercept, solved on the centered design
//!   matrix by SVD; rank-deficient systems get the minimum-norm solution

use nalgebra::{DMatrix, DVector};

use crate::error::CoachError;

/// Relative singular-value cutoff for the least-squares solve
const SINGULAR_VALUE_CUTOFF: f64 = 1e-10;
/// Relative spread below which a column counts as constant
const CONSTANT_COLUMN_TOLERANCE: f64 = 1e-10;

/// Column standardization fitted on a training matrix
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and standard deviations
    ///
    /// A constant column gets scale 1.0, so it transforms to zeros instead of NaN.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, CoachError> {
        let width = check_matrix(rows)?;
        let n = rows.len() as f64;

        let means: Vec<f64> = (0..width)
            .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();

        let scales = (0..width)
            .map(|j| {
                let variance = rows.iter().map(|row| (row[j] - means[j]).powi(2)).sum::<f64>() / n;
                let std = variance.sqrt();
                if std > CONSTANT_COLUMN_TOLERANCE * means[j].abs().max(1.0) {
                    std
                } else {
                    1.0
                }
            })
            .collect();

        Ok(Self { means, scales })
    }

    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }

    pub fn transform_all(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform(row)).collect()
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }
}

/// Fitted linear model `y = coefficients · x + intercept`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegression {
    /// Least-squares fit with intercept
    pub fn fit(rows: &[Vec<f64>], targets: &[f64]) -> Result<Self, CoachError> {
        let width = check_matrix(rows)?;
        if rows.len() != targets.len() {
            return Err(CoachError::InvalidInput(format!(
                "Feature rows ({}) and targets ({}) differ in length",
                rows.len(),
                targets.len()
            )));
        }

        let n = rows.len() as f64;
        let x_means: Vec<f64> = (0..width)
            .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        let y_mean = targets.iter().sum::<f64>() / n;

        let centered = DMatrix::from_fn(rows.len(), width, |i, j| rows[i][j] - x_means[j]);
        let centered_y = DVector::from_iterator(targets.len(), targets.iter().map(|y| y - y_mean));
        let coefficients = solve_min_norm(centered, &centered_y)?;

        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_means)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Ensure a non-empty rectangular matrix, returning its width
fn check_matrix(rows: &[Vec<f64>]) -> Result<usize, CoachError> {
    let width = rows
        .first()
        .map(|row| row.len())
        .ok_or_else(|| CoachError::InvalidInput("Feature matrix is empty".to_string()))?;

    if rows.iter().any(|row| row.len() != width) {
        return Err(CoachError::InvalidInput(
            "Feature rows have inconsistent widths".to_string(),
        ));
    }
    Ok(width)
}

/// Minimum-norm least-squares solution of `x · c = y`
///
/// Singular values below `SINGULAR_VALUE_CUTOFF` times the largest one are
/// treated as zero, so collinear columns share weight instead of one being dropped.
fn solve_min_norm(x: DMatrix<f64>, y: &DVector<f64>) -> Result<Vec<f64>, CoachError> {
    let svd = x
        .try_svd(true, true, f64::EPSILON, 0)
        .ok_or_else(|| CoachError::Data("SVD did not converge".to_string()))?;

    let largest = svd.singular_values.max();
    let solution = svd
        .solve(y, largest * SINGULAR_VALUE_CUTOFF)
        .map_err(|e| CoachError::Data(e.to_string()))?;

    Ok(solution.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaler_zero_mean_unit_variance() {
        let rows = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        let scaled = scaler.transform_all(&rows);

        for j in 0..2 {
            let mean: f64 = scaled.iter().map(|r| r[j]).sum::<f64>() / 3.0;
            let var: f64 = scaled.iter().map(|r| r[j].powi(2)).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }

        // Population std of [1, 2, 3] is sqrt(2/3)
        let x = scaler.transform(&[3.0, 30.0]);
        assert!((x[0] - 1.0 / (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_scaler_constant_column() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        let x = scaler.transform(&[7.0, 1.5]);
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!(x[1].abs() < 1e-12);
        assert_eq!(scaler.width(), 2);
    }

    #[test]
    fn test_scaler_rejects_empty() {
        assert!(StandardScaler::fit(&[]).is_err());
        assert!(StandardScaler::fit(&[vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_fit_exact_line() {
        // y = 2a - 3b + 4
        let rows = vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![2.0, 3.0],
            vec![4.0, 1.0],
            vec![3.0, 5.0],
        ];
        let targets: Vec<f64> = rows.iter().map(|r| 2.0 * r[0] - 3.0 * r[1] + 4.0).collect();
        let model = LinearRegression::fit(&rows, &targets).unwrap();

        assert!((model.coefficients[0] - 2.0).abs() < 1e-9);
        assert!((model.coefficients[1] + 3.0).abs() < 1e-9);
        assert!((model.intercept - 4.0).abs() < 1e-9);
        assert!((model.predict(&[10.0, 2.0]) - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_noisy_simple_regression() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.1, 5.9, 8.2];
        let rows: Vec<Vec<f64>> = xs.iter().map(|&x| vec![x]).collect();
        let model = LinearRegression::fit(&rows, &ys).unwrap();

        // slope = Sxy / Sxx = 10.2 / 5
        assert!((model.coefficients[0] - 2.04).abs() < 1e-9);
        assert!((model.intercept + 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_fit_constant_column_gets_zero_weight() {
        let rows = vec![vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]];
        let model = LinearRegression::fit(&rows, &[1.0, 2.0, 3.0]).unwrap();

        assert!((model.coefficients[0] - 1.0).abs() < 1e-9);
        assert!(model.coefficients[1].abs() < 1e-12);
        assert!(model.intercept.abs() < 1e-9);
    }

    #[test]
    fn test_fit_collinear_columns_still_fit() {
        // Second column duplicates the first
        let rows = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let model = LinearRegression::fit(&rows, &[3.0, 5.0, 7.0]).unwrap();

        for (row, y) in rows.iter().zip([3.0, 5.0, 7.0]) {
            assert!((model.predict(row) - y).abs() < 1e-9);
        }
        // Minimum-norm split of slope 2 across both columns
        assert!((model.coefficients[0] - 1.0).abs() < 1e-9);
        assert!((model.coefficients[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_anticorrelated_columns_share_weight() {
        // Second column is an affine image of the first: b = 10 - 2a
        let rows: Vec<Vec<f64>> = (0..5).map(|a| vec![a as f64, 10.0 - 2.0 * a as f64]).collect();
        let targets: Vec<f64> = (0..5).map(|a| 80.0 - a as f64).collect();
        let model = LinearRegression::fit(&rows, &targets).unwrap();

        // Minimum-norm c satisfies c0 - 2 c1 = -1 with c parallel to (1, -2)
        assert!((model.coefficients[0] + 0.2).abs() < 1e-9);
        assert!((model.coefficients[1] - 0.4).abs() < 1e-9);
        for (row, y) in rows.iter().zip(&targets) {
            assert!((model.predict(row) - y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fit_length_mismatch() {
        let rows = vec![vec![1.0], vec![2.0]];
        assert!(LinearRegression::fit(&rows, &[1.0]).is_err());
    }
}
