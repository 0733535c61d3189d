use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

/// Descriptive statistics over a set of decimal values: count, extremes,
/// mean, sample standard deviation and linearly interpolated quartiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub min: Decimal,
    pub max: Decimal,
    pub mean: Decimal,
    /// Sample standard deviation; undefined below two values.
    pub std_dev: Option<Decimal>,
    pub q1: Decimal,
    pub median: Decimal,
    pub q3: Decimal
}

impl DescriptiveStats {
    /// Computes the summary, or `None` when there are no values.
    pub fn from_values(values: &[Decimal]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort();

        let count = sorted.len();
        let mean_value = mean(&sorted)?;

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: mean_value,
            std_dev: sample_std_dev(&sorted, mean_value),
            q1: quantile(&sorted, 1),
            median: quantile(&sorted, 2),
            q3: quantile(&sorted, 3),
        })
    }
}

pub(crate) fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let sum: Decimal = values.iter().copied().sum();

    Some(sum / Decimal::from(values.len()))
}

/// Sample standard deviation (n - 1 divisor); `None` below two values.
pub(crate) fn sample_std_dev(values: &[Decimal], mean: Decimal) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }

    let sum_of_squares: Decimal = values.iter()
        .map(|value| {
            let deviation = value - mean;
            deviation * deviation
        })
        .sum();

    let variance = sum_of_squares / Decimal::from(values.len() - 1);

    variance.sqrt()
}

/// Quartile at `numerator`/4 over an ascending slice, interpolating linearly
/// between neighbors the way conventional describe() implementations do.
fn quantile(sorted: &[Decimal], numerator: usize) -> Decimal {
    let scaled_position = (sorted.len() - 1) * numerator;
    let lower = scaled_position / 4;
    let remainder = scaled_position % 4;
    let lower_value = sorted[lower];

    if remainder == 0 {
        return lower_value;
    }

    let upper_value = sorted[lower + 1];
    let fraction = Decimal::from(remainder) / Decimal::from(4);

    lower_value + (upper_value - lower_value) * fraction
}
