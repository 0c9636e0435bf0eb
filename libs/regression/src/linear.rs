use rayon::prelude::*;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// Why a data set has no least-squares line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    NoSamples,
    /// All samples share one x value (the fit would be a vertical line)
    ZeroXVariance,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoSamples => write!(f, "no samples"),
            Self::ZeroXVariance => write!(f, "zero variance in x"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegressionError {
    #[error("Degenerate input ({0}); cannot fit a line!")]
    DegenerateInput(Degeneracy),
}

/// Least-squares line: `y = slope * x + intercept`
///
/// The default (`0.0`, `0.0`) is what a failed fit leaves behind:
/// ```
/// use regression::linear_regression;
///
/// let fit = linear_regression(&[]).unwrap_or_default();
/// assert_eq!((fit.slope, fit.intercept), (0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "slope": self.slope,
            "intercept": self.intercept,
        }
    }
}

impl fmt::Display for LineFit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "y = {:.5} x + {:.5}", self.slope, self.intercept)
    }
}

/// Running sums of a set of samples. Accumulators over disjoint parts of a data set can be merged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accumulator {
    pub n: usize,
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_xx: f64,
    pub sum_xy: f64,
}

impl Accumulator {
    pub fn push(&mut self, (x, y): (f64, f64)) {
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_xy += x * y;
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            n: self.n + other.n,
            sum_x: self.sum_x + other.sum_x,
            sum_y: self.sum_y + other.sum_y,
            sum_xx: self.sum_xx + other.sum_xx,
            sum_xy: self.sum_xy + other.sum_xy,
        }
    }

    /// Solve for the least-squares line through the accumulated samples
    pub fn fit(&self) -> Result<LineFit, RegressionError> {
        if self.n == 0 {
            return Err(RegressionError::DegenerateInput(Degeneracy::NoSamples));
        }

        let n = self.n as f64;
        let mx = self.sum_x / n;
        let my = self.sum_y / n;
        let sxx = self.sum_xx / n - mx * mx;
        let sxy = self.sum_xy / n - mx * my;

        // exact comparison: only a truly constant x is rejected
        if sxx == 0.0 {
            return Err(RegressionError::DegenerateInput(Degeneracy::ZeroXVariance));
        }

        let slope = sxy / sxx;
        Ok(LineFit {
            slope,
            intercept: my - slope * mx,
        })
    }
}

impl Extend<(f64, f64)> for Accumulator {
    fn extend<I: IntoIterator<Item = (f64, f64)>>(&mut self, samples: I) {
        for sample in samples {
            self.push(sample);
        }
    }
}

impl FromIterator<(f64, f64)> for Accumulator {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(samples: I) -> Self {
        let mut acc = Self::default();
        acc.extend(samples);
        acc
    }
}

/// Ordinary least-squares fit of a line through `(x, y)` samples.
///
/// ```
/// use regression::linear_regression;
///
/// let fit = linear_regression(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]).unwrap();
/// assert!((fit.slope - 1.0).abs() < 1e-12);
/// assert!(fit.intercept.abs() < 1e-12);
/// ```
///
/// # Returns
/// * An `Err` if `samples` is empty
/// * An `Err` if all samples have exactly the same `x`
/// * The fitted [LineFit], otherwise
///
/// The variance check is exact. A constant `x` whose sums don't round exactly (ex: `0.1`) can
/// leave a tiny nonzero variance and still produce a (meaningless) fit.
pub fn linear_regression(samples: &[(f64, f64)]) -> Result<LineFit, RegressionError> {
    samples.iter().copied().collect::<Accumulator>().fit()
}

/// Same as [linear_regression], with the sums accumulated over the Rayon Global Threadpool
pub fn par_linear_regression(samples: &[(f64, f64)]) -> Result<LineFit, RegressionError> {
    samples
        .par_iter()
        .fold(Accumulator::default, |mut acc, sample| {
            acc.push(*sample);
            acc
        })
        .reduce(Accumulator::default, Accumulator::merge)
        .fit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_line() {
        let fit = linear_regression(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]).unwrap();
        assert_abs_diff_eq!(fit.slope, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn offset_line() {
        let samples: Vec<(f64, f64)> = (0..50)
            .map(|i| {
                let x = i as f64 * 0.3 - 4.0;
                (x, -2.5 * x + 7.0)
            })
            .collect();

        let fit = linear_regression(&samples).unwrap();
        assert_abs_diff_eq!(fit.slope, -2.5, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.intercept, 7.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.eval(2.0), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn noisy_samples() {
        // alternating +/- 0.5 residuals around y = 2x + 1
        let samples = [(0.0, 1.5), (1.0, 2.5), (2.0, 5.5), (3.0, 6.5)];
        let fit = linear_regression(&samples).unwrap();
        assert_abs_diff_eq!(fit.slope, 1.8, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 1.3, epsilon = 1e-12);
    }

    #[test]
    fn empty_input() {
        let result = linear_regression(&[]);
        assert_eq!(
            result,
            Err(RegressionError::DegenerateInput(Degeneracy::NoSamples))
        );
        assert_eq!(result.unwrap_or_default(), LineFit::default());
    }

    #[test]
    fn constant_x() {
        let result = linear_regression(&[(5.0, 1.0), (5.0, 2.0), (5.0, 3.0)]);
        assert_eq!(
            result,
            Err(RegressionError::DegenerateInput(Degeneracy::ZeroXVariance))
        );
    }

    #[test]
    fn constant_x_with_rounding() {
        // 1.1 rounds to an exact zero variance, 0.1 does not
        assert_eq!(
            linear_regression(&[(1.1, 2.0); 3]),
            Err(RegressionError::DegenerateInput(Degeneracy::ZeroXVariance))
        );

        let fit = linear_regression(&[(0.1, 2.0); 3]).unwrap();
        assert_abs_diff_eq!(fit.slope, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn single_sample_has_no_variance() {
        assert!(linear_regression(&[(2.0, 3.0)]).is_err());
    }

    #[test]
    fn order_independent() {
        let samples = [(0.5, 1.0), (1.5, 4.2), (-2.0, -3.0), (3.0, 4.0), (0.0, 0.7)];
        let mut reversed = samples;
        reversed.reverse();
        let mut rotated = samples;
        rotated.rotate_left(2);

        let fit = linear_regression(&samples).unwrap();
        for other in [reversed, rotated] {
            let other_fit = linear_regression(&other).unwrap();
            assert_abs_diff_eq!(fit.slope, other_fit.slope, epsilon = 1e-12);
            assert_abs_diff_eq!(fit.intercept, other_fit.intercept, epsilon = 1e-12);
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let samples: Vec<(f64, f64)> = (0..10_000)
            .map(|i| {
                let x = i as f64 / 1000.0;
                (x, 0.75 * x - 3.0 + 0.01 * (i % 7) as f64)
            })
            .collect();

        let fit = linear_regression(&samples).unwrap();
        let par_fit = par_linear_regression(&samples).unwrap();
        assert_abs_diff_eq!(fit.slope, par_fit.slope, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.intercept, par_fit.intercept, epsilon = 1e-9);

        assert!(par_linear_regression(&[]).is_err());
    }

    #[test]
    fn merged_accumulators() {
        let samples = [(1.0, 2.0), (2.0, 4.5), (3.0, 5.5), (4.0, 8.0)];
        let whole: Accumulator = samples.iter().copied().collect();
        let halves = samples[..2]
            .iter()
            .copied()
            .collect::<Accumulator>()
            .merge(samples[2..].iter().copied().collect());

        assert_eq!(whole, halves);
        assert_eq!(whole.fit(), halves.fit());
    }

    #[cfg(feature = "json_export")]
    #[test]
    fn fit_json() {
        let js = LineFit {
            slope: 2.0,
            intercept: -1.0,
        }
        .to_json();
        assert_eq!(js["slope"], 2.0);
        assert_eq!(js["intercept"], -1.0);
    }
}
