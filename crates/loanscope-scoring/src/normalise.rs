//! Scaling helpers for the radar charts.

/// Upper bound of the radar axis.
pub const RADAR_MAX: f64 = 100.0;

/// Value emitted when a feature has no spread across the population.
pub const RADAR_MIDPOINT: f64 = 50.0;

/// Min-max rescaling onto [0, 100] using a population-wide range.
/// Callers pass values inside the range; the clamp only absorbs rounding.
/// A degenerate range yields the neutral midpoint rather than a division by zero.
pub fn rescale(value: f64, min_val: f64, max_val: f64) -> f64 {
    let range = max_val - min_val;
    if range.abs() < 1e-12 {
        return RADAR_MIDPOINT;
    }
    ((value - min_val) * RADAR_MAX / range).clamp(0.0, RADAR_MAX)
}

/// Minimum and maximum over the defined cells of a column.
pub fn defined_range(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Median of a sample; the mean of the two middle values for even sizes.
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Concatenate feature lists keeping the first occurrence of each name.
pub fn union_preserving_order<'a, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut out: Vec<String> = Vec::new();
    for list in lists {
        for name in list {
            if !out.contains(name) {
                out.push(name.clone());
            }
        }
    }
    out
}
