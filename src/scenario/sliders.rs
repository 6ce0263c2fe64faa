use std::collections::HashSet;

use crate::config::SliderSettings;

fn geomspace(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    if steps <= 1 {
        return vec![start];
    }
    let ratio = (stop / start).powf(1.0 / (steps - 1) as f64);
    (0..steps).map(|i| start * ratio.powi(i as i32)).collect()
}

/// Round to the nearest multiple of `step`, ties to even.
pub fn round_to_step(value: f64, step: u64) -> u64 {
    ((value / step as f64).round_ties_even() * step as f64) as u64
}

/// Round up to the next multiple of `step`.
pub fn round_up_to_step(value: f64, step: u64) -> u64 {
    ((value / step as f64).ceil() * step as f64) as u64
}

/// Non-linearly spaced cohort sizes: two geometric progressions joined at
/// `mid_val` (dense near the anchor, still reaching both extremes), rounded
/// to `round_step` and deduplicated preserving first-seen order.
pub fn generate_cohort_slider_options(
    min_val: u64,
    mid_val: u64,
    max_val: u64,
    below_steps: usize,
    above_steps: usize,
    round_step: u64,
) -> Vec<u64> {
    let below = geomspace(min_val as f64, mid_val as f64, below_steps);
    let above = geomspace(mid_val as f64, max_val as f64, above_steps + 1);

    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for value in below.iter().chain(above.iter().skip(1)) {
        let rounded = round_to_step(*value, round_step);
        if seen.insert(rounded) {
            options.push(rounded);
        }
    }
    options
}

/// Tier percentile choices, finer near the elite end.
pub fn generate_percentile_options() -> Vec<f64> {
    let fine_grain = [0.1, 0.2, 0.3, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 5.0, 7.5, 10.0];
    let broader = [
        12.5, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0,
    ];
    fine_grain.iter().chain(broader.iter()).copied().collect()
}

/// "Top 10%", "Top 0.5%": one decimal place with trailing zeros stripped.
pub fn format_percentile_option(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("Top {}%", trimmed)
}

/// The entry of `options` closest to `value`. Ties go to the earliest
/// option; an empty option list returns `value` unchanged.
pub fn snap_value_to_options(value: f64, options: &[f64]) -> f64 {
    let mut best = match options.first() {
        Some(&first) => first,
        None => return value,
    };
    let mut best_diff = (best - value).abs();
    for &option in &options[1..] {
        let diff = (option - value).abs();
        if diff < best_diff {
            best = option;
            best_diff = diff;
        }
    }
    best
}

/// Slider options and midpoint anchored to a cohort's estimated size. The
/// midpoint snaps to the estimate and the range stretches to 1.2x the
/// estimate when the configured maximum would not reach it.
pub fn build_slider_defaults(settings: &SliderSettings, estimate: u64) -> (Vec<u64>, u64) {
    let mut mid = settings.cohort_mid;
    let mut max = settings.cohort_max;

    if estimate > 0 {
        mid = round_to_step(estimate.max(settings.cohort_min) as f64, settings.round_step);
        max = max.max(round_up_to_step(estimate as f64 * 1.2, settings.round_step));
        mid = mid.min(max);
    }

    let options = generate_cohort_slider_options(
        settings.cohort_min,
        mid,
        max,
        settings.below_steps,
        settings.above_steps,
        settings.round_step,
    );

    (options, mid)
}
