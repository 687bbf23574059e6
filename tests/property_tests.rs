//! Property-based tests for the analysis building blocks.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated monthly series.

use chrono::NaiveDate;
use proptest::prelude::*;
use registration_trends::core::{MonthlySeries, YearMonth, MONTH_ABBREVIATIONS};
use registration_trends::data::read_registration_dates;
use registration_trends::detection::{find_peaks, find_troughs, OutlierBand};
use registration_trends::models::linear_forecast;
use registration_trends::pipeline::seasonality::SeasonalityReport;
use registration_trends::seasonality::ClassicalDecomposition;
use registration_trends::transform::trailing_mean;

fn start() -> YearMonth {
    YearMonth::new(2000, 1).unwrap()
}

/// Strategy for monthly registration counts.
fn counts_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len)
        .prop_flat_map(|len| prop::collection::vec((0u32..5000).prop_map(f64::from), len))
}

/// Strategy for dates between 1995 and 2024.
fn dates_strategy() -> impl Strategy<Value = Vec<NaiveDate>> {
    prop::collection::vec(
        (1995i32..2025, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
        1..300,
    )
}

// =============================================================================
// Property: Winsorized values stay inside the percentile band
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn winsorized_series_within_band(values in counts_strategy(1, 200)) {
        let band = OutlierBand::p1_p99(&values).unwrap();
        let capped = band.winsorize(&values);

        prop_assert_eq!(capped.len(), values.len());
        for (orig, c) in values.iter().zip(&capped) {
            prop_assert!(*c >= band.lower && *c <= band.upper);
            if !band.is_outlier(*orig) {
                prop_assert_eq!(orig, c);
            }
        }
    }

    #[test]
    fn moving_average_is_trailing_mean(values in counts_strategy(1, 120)) {
        let ma = trailing_mean(&values, 12);
        for (i, avg) in ma.iter().enumerate() {
            let from = i.saturating_sub(11);
            let window = &values[from..=i];
            let expected = window.iter().sum::<f64>() / window.len() as f64;
            prop_assert!((avg - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn peaks_are_separated_interior_maxima(values in counts_strategy(3, 150)) {
        let peaks = find_peaks(&values, 6);
        for pair in peaks.windows(2) {
            prop_assert!(pair[1] - pair[0] >= 6);
        }
        for &p in &peaks {
            prop_assert!(p > 0 && p < values.len() - 1);
            prop_assert!(values[p] >= values[p - 1] && values[p] >= values[p + 1]);
        }
        let troughs = find_troughs(&values, 6);
        for pair in troughs.windows(2) {
            prop_assert!(pair[1] - pair[0] >= 6);
        }
        for &t in &troughs {
            prop_assert!(values[t] <= values[t - 1] && values[t] <= values[t + 1]);
        }
    }

    #[test]
    fn decomposition_components_sum_to_series(values in counts_strategy(24, 120)) {
        let decomp = ClassicalDecomposition::new(12).decompose(&values).unwrap();
        for i in 0..values.len() {
            let (t, r) = (decomp.trend[i], decomp.residual[i]);
            if t.is_finite() {
                prop_assert!((t + decomp.seasonal[i] + r - values[i]).abs() < 1e-6);
            }
        }
        let cycle: f64 = decomp.seasonal[..12].iter().sum();
        prop_assert!(cycle.abs() < 1e-6);
    }

    #[test]
    fn forecast_ignores_history_before_window(
        values in counts_strategy(30, 100),
        scale in 0.0..10.0_f64,
    ) {
        let series = MonthlySeries::contiguous(start(), values.clone());
        let mut altered = values;
        let early = altered.len() - 24;
        for v in altered.iter_mut().take(early) {
            *v *= scale;
        }
        let altered = MonthlySeries::contiguous(start(), altered);

        let a = linear_forecast(&series, 24, 12).unwrap();
        let b = linear_forecast(&altered, 24, 12).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn pivot_rows_always_calendar_ordered(dates in dates_strategy()) {
        let report = SeasonalityReport::from_dates(&dates, 2000);
        prop_assert_eq!(report.pivot.row_labels(), MONTH_ABBREVIATIONS);
        prop_assert_eq!(report.pivot.rows().len(), 12);
        prop_assert!(report.pivot.years().iter().all(|&y| y >= 2000));

        let counted = dates.iter().filter(|d| chrono::Datelike::year(*d) >= 2000).count();
        prop_assert_eq!(report.totals.iter().sum::<f64>() as usize, counted);
    }

    #[test]
    fn null_dates_never_counted(valid in 0usize..20, nulls in 0usize..20) {
        let mut csv = String::from("id,regvalidfrom\n");
        for i in 0..valid {
            csv.push_str(&format!("{i},2010-0{}-15\n", 1 + i % 9));
        }
        for i in 0..nulls {
            let token = ["", "NaT", "null", "garbage"][i % 4];
            csv.push_str(&format!("x{i},{token}\n"));
        }
        let loaded = read_registration_dates(csv.as_bytes(), "regvalidfrom").unwrap().unwrap();
        prop_assert_eq!(loaded.len(), valid);
        prop_assert_eq!(loaded.dropped, nulls);
    }
}
