//! Immutable per-run parameters handed to the series engine.

use crate::schema::Config;
use chrono::NaiveDate;

/// Engine parameters resolved for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Records dropped from the end of the sorted input.
    pub tail_trim: usize,
    /// Rolling mean window.
    pub window_size: usize,
    /// Calendar years overlaid, ending with the current one.
    pub years: u32,
    /// Months kept past the current one on the current year's axis.
    pub lookahead_months: u32,
    /// The run's notion of today.
    pub today: NaiveDate,
}

impl Config {
    /// Resolves the engine settings, preferring the configured date over `today`.
    pub fn engine_settings(&self, today: NaiveDate) -> EngineSettings {
        EngineSettings {
            tail_trim: self.pipeline.tail_trim,
            window_size: self.pipeline.window_size,
            years: self.pipeline.years,
            lookahead_months: self.pipeline.lookahead_months,
            today: self.pipeline.current_date.unwrap_or(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_date_used_without_override() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let settings = Config::default().engine_settings(today);
        assert_eq!(settings.today, today);
        assert_eq!(settings.window_size, 7);
    }

    #[test]
    fn test_configured_date_wins() {
        let fixed = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        let mut config = Config::default();
        config.pipeline.current_date = Some(fixed);

        let settings = config.engine_settings(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(settings.today, fixed);
    }
}
