// ============================================================================
// Vector Statistics
// Moments, dispersion, covariance and sums of squares over a DecimalVector
// ============================================================================
//
// Conventions:
// - "sample" statistics divide by n - 1, "population" statistics by n
// - covariance and correlation are population statistics
// - division by zero (empty vectors, zero mean) propagates unchanged
// - results are rounded to the precision of the input vectors

use super::DecimalVector;
use crate::errors::{SeriesError, SeriesResult};
use crate::numeric::ExactDecimal;

/// Where `regression_sum_of_squares` takes its mean from.
#[derive(Debug, Clone, Copy)]
pub enum MeanSource<'a> {
    /// A mean that has already been computed
    Mean(ExactDecimal),
    /// A comparison vector whose mean is computed first
    Of(&'a DecimalVector),
}

impl MeanSource<'_> {
    fn resolve(self) -> SeriesResult<ExactDecimal> {
        match self {
            MeanSource::Mean(mean) => Ok(mean),
            MeanSource::Of(vector) => vector.mean(),
        }
    }
}

impl From<ExactDecimal> for MeanSource<'_> {
    fn from(mean: ExactDecimal) -> Self {
        MeanSource::Mean(mean)
    }
}

impl<'a> From<&'a DecimalVector> for MeanSource<'a> {
    fn from(vector: &'a DecimalVector) -> Self {
        MeanSource::Of(vector)
    }
}

impl DecimalVector {
    fn count(&self) -> ExactDecimal {
        ExactDecimal::from_integer(self.len() as i64)
    }

    /// Round a statistic to `precision` digits.
    fn settle(value: ExactDecimal, precision: u32) -> SeriesResult<ExactDecimal> {
        Ok(value.with_precision(precision)?)
    }

    /// Sum of `(v - center)^power` over every element.
    fn sum_of_powers(&self, center: ExactDecimal, power: i64) -> SeriesResult<ExactDecimal> {
        let mut total = ExactDecimal::ZERO;
        for v in self.iter() {
            total = total.checked_add(v.checked_sub(center)?.checked_powi(power)?)?;
        }
        Ok(total)
    }

    /// `k`-th central moment: `Σ(v - mean)^k / (n - 1)` for a sample,
    /// `/ n` for a population.
    pub fn central_moment(&self, k: u32, sample: bool) -> SeriesResult<ExactDecimal> {
        let mean = self.mean()?;
        let total = self.sum_of_powers(mean, i64::from(k))?;
        let n = self.count();
        let denominator = if sample {
            n.checked_sub(ExactDecimal::ONE)?
        } else {
            n
        };
        Self::settle(total.checked_div(denominator)?, self.precision())
    }

    /// `m3 / m2^(2/3)` over sample moments.
    pub fn skewness(&self) -> SeriesResult<ExactDecimal> {
        let m3 = self.central_moment(3, true)?;
        let m2 = self.central_moment(2, true)?;
        let exponent = ExactDecimal::from_integer(2).checked_div(ExactDecimal::from_integer(3))?;
        Self::settle(m3.checked_div(m2.checked_pow(exponent)?)?, self.precision())
    }

    /// Sample variance.
    pub fn var(&self) -> SeriesResult<ExactDecimal> {
        self.central_moment(2, true)
    }

    /// Population variance.
    pub fn varp(&self) -> SeriesResult<ExactDecimal> {
        self.central_moment(2, false)
    }

    /// Sample standard deviation.
    pub fn stdev(&self) -> SeriesResult<ExactDecimal> {
        Ok(self.var()?.sqrt()?)
    }

    /// Population standard deviation.
    pub fn stdevp(&self) -> SeriesResult<ExactDecimal> {
        Ok(self.varp()?.sqrt()?)
    }

    /// `stdev / mean`
    pub fn coefficient_of_variation(&self) -> SeriesResult<ExactDecimal> {
        Ok(self.stdev()?.checked_div(self.mean()?)?)
    }

    /// `var / mean`
    pub fn index_of_dispersion(&self) -> SeriesResult<ExactDecimal> {
        Ok(self.var()?.checked_div(self.mean()?)?)
    }

    /// Population covariance `(Σxy - Σx·Σy / n) / n`.
    pub fn covar(&self, y: &DecimalVector) -> SeriesResult<ExactDecimal> {
        SeriesError::check_lengths(self.len(), y.len())?;
        let n = self.count();

        let mut sum_xy = ExactDecimal::ZERO;
        for (a, b) in self.iter().zip(y.iter()) {
            sum_xy = sum_xy.checked_add(a.checked_mul(*b)?)?;
        }
        let cross = self.sum()?.checked_mul(y.sum()?)?.checked_div(n)?;
        Self::settle(
            sum_xy.checked_sub(cross)?.checked_div(n)?,
            self.precision().max(y.precision()),
        )
    }

    /// Pearson correlation over population standard deviations.
    pub fn correl(&self, y: &DecimalVector) -> SeriesResult<ExactDecimal> {
        let covar = self.covar(y)?;
        let scale = self.stdevp()?.checked_mul(y.stdevp()?)?;
        Ok(covar.checked_div(scale)?)
    }

    /// `Σ(x - ybar)^2`, where `ybar` is given or taken from a comparison vector.
    pub fn regression_sum_of_squares<'a, M>(&self, ybar: M) -> SeriesResult<ExactDecimal>
    where
        M: Into<MeanSource<'a>>,
    {
        let ybar = ybar.into().resolve()?;
        Self::settle(
            self.sum_of_powers(ybar, 2)?,
            self.precision().max(ybar.precision()),
        )
    }

    /// `Σ(x_i - y_i)^2`
    pub fn residual_sum_of_squares(&self, y: &DecimalVector) -> SeriesResult<ExactDecimal> {
        SeriesError::check_lengths(self.len(), y.len())?;
        let mut total = ExactDecimal::ZERO;
        for (a, b) in self.iter().zip(y.iter()) {
            total = total.checked_add(a.checked_sub(*b)?.checked_powi(2)?)?;
        }
        Self::settle(total, self.precision().max(y.precision()))
    }

    /// Regression sum of squares against `y`'s mean plus the residual sum of squares.
    pub fn total_sum_of_squares(&self, y: &DecimalVector) -> SeriesResult<ExactDecimal> {
        SeriesError::check_lengths(self.len(), y.len())?;
        let regression = self.regression_sum_of_squares(y)?;
        let residual = self.residual_sum_of_squares(y)?;
        Ok(regression.checked_add(residual)?)
    }
}
