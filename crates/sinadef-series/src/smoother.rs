//! Trailing rolling mean over daily counts.

use sinadef_common::{DailySeries, Result, SinadefError, SmoothedPoint, SmoothedSeries};
use tracing::debug;

/// Replaces each count with the mean of the `window_size` counts ending at it.
///
/// Every mean is taken over the original counts. The first `window_size - 1`
/// entries lack a full window and are dropped, so the result has
/// `len - window_size + 1` points, each dated like the last count in its window.
///
/// # Errors
///
/// [`SinadefError::InsufficientData`] when the series is shorter than the
/// window, and a configuration error for a window of zero.
pub fn smooth(series: &DailySeries, window_size: usize) -> Result<SmoothedSeries> {
    if window_size == 0 {
        return Err(SinadefError::config("Smoothing window must be at least 1"));
    }
    if series.len() < window_size {
        return Err(SinadefError::InsufficientData {
            available: series.len(),
            window: window_size,
        });
    }

    let points = series.points();
    let counts: Vec<u64> = series.counts().map(u64::from).collect();
    #[allow(clippy::cast_precision_loss)]
    let divisor = window_size as f64;

    let smoothed = counts
        .windows(window_size)
        .zip(&points[window_size - 1..])
        .map(|(window, point)| {
            #[allow(clippy::cast_precision_loss)]
            let sum = window.iter().sum::<u64>() as f64;
            SmoothedPoint {
                date: point.date,
                value: sum / divisor,
            }
        })
        .collect();

    let smoothed = SmoothedSeries::new(smoothed)?;
    debug!(
        input = series.len(),
        output = smoothed.len(),
        window = window_size,
        "Smoothed daily series"
    );
    Ok(smoothed)
}
