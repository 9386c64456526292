//! Daily statistics of inflammation tables.
//!
//! Every function takes a table with one row per patient and one column per day
//! and leaves it untouched.

use crate::error::StatsError;
use crate::table::from_rows;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewD, Axis, Ix2};

/// Compute the mean of each day across all patients.
pub fn daily_mean(data: ArrayView2<f64>) -> Array1<f64> {
    data.map_axis(Axis(0), compute_mean)
}

/// Compute the maximum of each day across all patients.
pub fn daily_max(data: ArrayView2<f64>) -> Array1<f64> {
    data.map_axis(Axis(0), |col| {
        col.fold(f64::NEG_INFINITY, |acc, &val| nan_or(acc, val, f64::max))
    })
}

/// Compute the minimum of each day across all patients.
pub fn daily_min(data: ArrayView2<f64>) -> Array1<f64> {
    data.map_axis(Axis(0), |col| {
        col.fold(f64::INFINITY, |acc, &val| nan_or(acc, val, f64::min))
    })
}

/// Compute the population standard deviation of each day across all patients.
pub fn daily_std(data: ArrayView2<f64>) -> Array1<f64> {
    data.map_axis(Axis(0), |col| compute_var(col).sqrt())
}

/// Flag the days on which a patient's reading is strictly above `threshold`.
///
/// # Errors
/// Returns [`StatsError::PatientIndex`] if `patient_idx` is not a row of `data`.
pub fn daily_above_threshold(
    patient_idx: usize,
    data: ArrayView2<f64>,
    threshold: f64,
) -> Result<Vec<bool>, StatsError> {
    let row = patient_row(patient_idx, data)?;
    Ok(row.iter().map(|&val| val > threshold).collect())
}

/// Count the days on which a patient's reading is strictly above `threshold`.
///
/// # Errors
/// Returns [`StatsError::PatientIndex`] if `patient_idx` is not a row of `data`.
pub fn patient_above_threshold(
    patient_idx: usize,
    data: ArrayView2<f64>,
    threshold: f64,
) -> Result<usize, StatsError> {
    let row = patient_row(patient_idx, data)?;
    Ok(row.iter().filter(|&&val| val > threshold).count())
}

/// Normalise each patient's readings to the range `[0, 1]`.
///
/// Every row is divided by its maximum present (non-`NaN`) value. Entries that
/// end up undefined, such as missing readings or rows whose maximum is zero,
/// are set to zero. A new table is returned.
///
/// # Errors
/// Returns [`StatsError::NegativeValue`] if any reading is negative and
/// [`StatsError::Dimension`] if `data` is not two-dimensional.
pub fn normalise(data: ArrayViewD<f64>) -> Result<Array2<f64>, StatsError> {
    check_non_negative(data.iter())?;

    let ndim = data.ndim();
    let data = data
        .into_dimensionality::<Ix2>()
        .map_err(|_| StatsError::Dimension { ndim })?;

    let mut normalised = data.to_owned();
    for mut row in normalised.rows_mut() {
        let max = row
            .iter()
            .filter(|val| !val.is_nan())
            .fold(f64::NAN, |acc, &val| acc.max(val));
        row.mapv_inplace(|val| val / max);
    }

    normalised.mapv_inplace(|val| if val.is_nan() || val < 0.0 { 0.0 } else { val });
    Ok(normalised)
}

/// Normalise raw rows of readings, see [`normalise`].
///
/// # Errors
/// Returns [`StatsError::NegativeValue`] if any reading is negative and
/// [`StatsError::NotMatrix`] if the rows are ragged.
pub fn normalise_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>, StatsError> {
    check_non_negative(rows.iter().flatten())?;
    let data = from_rows(rows)?;
    normalise(data.view().into_dyn())
}

fn patient_row<'a>(
    patient_idx: usize,
    data: ArrayView2<'a, f64>,
) -> Result<ArrayView1<'a, f64>, StatsError> {
    let n_rows = data.nrows();
    if patient_idx >= n_rows {
        return Err(StatsError::PatientIndex {
            index: patient_idx,
            n_rows,
        });
    }
    Ok(data.index_axis_move(Axis(0), patient_idx))
}

fn check_non_negative<'a, I>(vals: I) -> Result<(), StatsError>
where
    I: IntoIterator<Item = &'a f64>,
{
    match vals.into_iter().find(|&&val| val < 0.0) {
        Some(&value) => Err(StatsError::NegativeValue { value }),
        None => Ok(()),
    }
}

/// Combine two readings, letting a missing one poison the result.
fn nan_or(acc: f64, val: f64, op: fn(f64, f64) -> f64) -> f64 {
    if acc.is_nan() || val.is_nan() {
        f64::NAN
    } else {
        op(acc, val)
    }
}

fn compute_mean(vals: ArrayView1<f64>) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

fn compute_var(vals: ArrayView1<f64>) -> f64 {
    let n_vals = vals.len();
    if n_vals == 0 {
        return f64::NAN;
    }
    let mean = compute_mean(vals);
    vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / n_vals as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, array};

    fn example() -> Array2<f64> {
        array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]
    }

    fn assert_close(a: &Array2<f64>, b: &Array2<f64>) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-12, "{a} != {b}");
        }
    }

    #[test]
    fn daily_reductions_of_example() {
        let data = example();
        assert_eq!(daily_mean(data.view()), array![2.5, 3.5, 4.5]);
        assert_eq!(daily_max(data.view()), array![4.0, 5.0, 6.0]);
        assert_eq!(daily_min(data.view()), array![1.0, 2.0, 3.0]);
        assert_eq!(daily_std(data.view()), array![1.5, 1.5, 1.5]);
    }

    #[test]
    fn daily_mean_is_column_sum_over_rows() {
        let data = array![[0.0, 7.0], [2.0, 1.0], [4.0, 4.0], [10.0, 0.0]];
        let mean = daily_mean(data.view());
        for (j, col) in data.columns().into_iter().enumerate() {
            assert_eq!(mean[j], col.sum() / data.nrows() as f64);
        }
    }

    #[test]
    fn daily_std_of_constant_days_is_zero() {
        let data = array![[3.0, 0.0], [3.0, 0.0], [3.0, 0.0]];
        assert_eq!(daily_std(data.view()), array![0.0, 0.0]);
    }

    #[test]
    fn daily_reductions_of_table_without_patients() {
        let data = Array2::<f64>::zeros((0, 2));
        assert!(daily_mean(data.view()).iter().all(|val| val.is_nan()));
        assert!(daily_std(data.view()).iter().all(|val| val.is_nan()));
        assert_eq!(daily_max(data.view()), array![f64::NEG_INFINITY, f64::NEG_INFINITY]);
        assert_eq!(daily_min(data.view()), array![f64::INFINITY, f64::INFINITY]);
    }

    #[test]
    fn daily_reductions_propagate_missing_readings() {
        let data = array![[1.0, f64::NAN, 2.0], [f64::NAN, f64::NAN, 4.0]];
        let reductions: [fn(ArrayView2<f64>) -> Array1<f64>; 4] =
            [daily_mean, daily_max, daily_min, daily_std];
        for daily in reductions {
            let vals = daily(data.view());
            assert!(vals[0].is_nan() && vals[1].is_nan());
            assert!(!vals[2].is_nan());
        }
        assert_eq!(daily_max(data.view())[2], 4.0);
        assert_eq!(daily_min(data.view())[2], 2.0);
    }

    #[test]
    fn patient_row_borrows_from_the_table() {
        let data = example();
        let row = patient_row(1, data.view()).unwrap();
        assert_eq!(row, array![4.0, 5.0, 6.0]);
    }

    #[test]
    fn patient_above_threshold_counts_strictly_greater() {
        let data = example();
        assert_eq!(patient_above_threshold(0, data.view(), 2.0), Ok(1));
        assert_eq!(patient_above_threshold(1, data.view(), 4.0), Ok(2));
        assert_eq!(patient_above_threshold(1, data.view(), 6.0), Ok(0));
    }

    #[test]
    fn daily_above_threshold_flags_each_day() {
        let data = example();
        assert_eq!(
            daily_above_threshold(0, data.view(), 2.0),
            Ok(vec![false, false, true])
        );
    }

    #[test]
    fn patient_above_threshold_rejects_missing_patient() {
        let data = example();
        assert_eq!(
            patient_above_threshold(2, data.view(), 0.0),
            Err(StatsError::PatientIndex { index: 2, n_rows: 2 })
        );
        assert!(daily_above_threshold(5, data.view(), 0.0).is_err());
    }

    #[test]
    fn normalise_divides_rows_by_their_max() {
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let normalised = normalise(data.view().into_dyn()).unwrap();
        let expected = array![
            [1.0 / 3.0, 2.0 / 3.0, 1.0],
            [4.0 / 6.0, 5.0 / 6.0, 1.0],
            [7.0 / 9.0, 8.0 / 9.0, 1.0]
        ];
        assert_close(&normalised, &expected);
        assert_eq!(data[[0, 0]], 1.0);
    }

    #[test]
    fn normalise_zeroes_missing_and_undefined_entries() {
        let data = array![[0.0, 0.0, 0.0], [1.0, f64::NAN, 2.0], [f64::NAN, f64::NAN, f64::NAN]];
        let normalised = normalise(data.view().into_dyn()).unwrap();
        let expected = array![[0.0, 0.0, 0.0], [0.5, 0.0, 1.0], [0.0, 0.0, 0.0]];
        assert_close(&normalised, &expected);
    }

    #[test]
    fn normalise_keeps_shape_and_unit_range() {
        let data = array![[0.0, 13.0, 2.5, 7.0], [20.0, 1.0, 0.5, 3.0], [4.0, 4.0, 4.0, 4.0]];
        let normalised = normalise(data.view().into_dyn()).unwrap();
        assert_eq!(normalised.dim(), data.dim());
        assert!(normalised.iter().all(|&val| (0.0..=1.0).contains(&val)));
    }

    #[test]
    fn normalise_rejects_negative_values() {
        let data = array![[1.0, -2.0], [3.0, 4.0]];
        assert_eq!(
            normalise(data.view().into_dyn()),
            Err(StatsError::NegativeValue { value: -2.0 })
        );
    }

    #[test]
    fn normalise_rejects_other_dimensions() {
        let data = array![1.0, 2.0, 3.0];
        assert_eq!(
            normalise(data.view().into_dyn()),
            Err(StatsError::Dimension { ndim: 1 })
        );
        let data = Array3::<f64>::ones((2, 2, 2));
        assert_eq!(
            normalise(data.view().into_dyn()),
            Err(StatsError::Dimension { ndim: 3 })
        );
    }

    #[test]
    fn normalise_checks_negative_values_before_dimensions() {
        let data = array![1.0, -1.0];
        assert!(matches!(
            normalise(data.view().into_dyn()),
            Err(StatsError::NegativeValue { .. })
        ));
    }

    #[test]
    fn normalise_rows_rejects_ragged_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            normalise_rows(&rows),
            Err(StatsError::NotMatrix { .. })
        ));
        let rows = vec![vec![1.0, 2.0], vec![-3.0]];
        assert!(matches!(
            normalise_rows(&rows),
            Err(StatsError::NegativeValue { .. })
        ));
    }

    #[test]
    fn normalise_rows_matches_normalise() {
        let rows = vec![vec![2.0, 4.0], vec![1.0, 0.0]];
        let normalised = normalise_rows(&rows).unwrap();
        assert_eq!(normalised, array![[0.5, 1.0], [1.0, 0.0]]);
    }
}
