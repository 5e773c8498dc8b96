//! @ai:module:intent Least-squares polynomial trend lines for bar series
//! @ai:module:layer domain
//! @ai:module:public_api Polynomial, trend_line
//! @ai:module:stateless true

/// Highest degree fitted through a series
pub const TREND_DEGREE: usize = 3;

/// @ai:intent Polynomial in a centred and scaled variable
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Coefficients, lowest order first
    coefficients: Vec<f64>,
    center: f64,
    scale: f64,
}

impl Polynomial {
    /// @ai:intent Fit a polynomial of at most `degree` through the points
    /// @ai:effects pure
    /// @ai:post None for an empty point set; the degree drops until the system is solvable
    pub fn fit(points: &[(f64, f64)], degree: usize) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let center = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let scale = points
            .iter()
            .map(|(x, _)| (x - center).abs())
            .fold(0.0_f64, f64::max);
        let scale = if scale == 0.0 { 1.0 } else { scale };

        let normalized: Vec<(f64, f64)> = points
            .iter()
            .map(|(x, y)| ((x - center) / scale, *y))
            .collect();

        let max_degree = degree.min(points.len() - 1);

        (0..=max_degree).rev().find_map(|d| {
            solve_least_squares(&normalized, d).map(|coefficients| Self {
                coefficients,
                center,
                scale,
            })
        })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// @ai:intent Evaluate with Horner's scheme
    /// @ai:effects pure
    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.center) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * t + c)
    }
}

/// @ai:intent Trend points for a series, evaluated at the series' own x values
/// @ai:effects pure
/// @ai:post empty when fewer than two points
pub fn trend_line(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    if points.len() < 2 {
        return Vec::new();
    }

    match Polynomial::fit(points, TREND_DEGREE) {
        Some(poly) => points.iter().map(|(x, _)| (*x, poly.eval(*x))).collect(),
        None => Vec::new(),
    }
}

/// Normal equations solved by Gaussian elimination with partial pivoting.
fn solve_least_squares(points: &[(f64, f64)], degree: usize) -> Option<Vec<f64>> {
    let size = degree + 1;
    let mut matrix = vec![vec![0.0; size + 1]; size];

    for (x, y) in points {
        let powers: Vec<f64> = (0..2 * size).map(|p| x.powi(p as i32)).collect();

        for row in 0..size {
            for col in 0..size {
                matrix[row][col] += powers[row + col];
            }
            matrix[row][size] += y * powers[row];
        }
    }

    for col in 0..size {
        let pivot = (col..size).max_by(|a, b| {
            matrix[*a][col]
                .abs()
                .total_cmp(&matrix[*b][col].abs())
        })?;

        if matrix[pivot][col].abs() < 1e-12 {
            return None;
        }

        matrix.swap(col, pivot);

        for row in 0..size {
            if row == col {
                continue;
            }

            let factor = matrix[row][col] / matrix[col][col];

            for k in col..=size {
                matrix[row][k] -= factor * matrix[col][k];
            }
        }
    }

    Some((0..size).map(|i| matrix[i][size] / matrix[i][i]).collect())
}
