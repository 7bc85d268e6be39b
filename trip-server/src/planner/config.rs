//! Planner configuration.

use crate::domain::LegMode;

/// Default timetable lookup base URL (IDOS connection search).
const DEFAULT_TIMETABLE_BASE_URL: &str = "https://idos.idnes.cz/vlakyautobusymhdvse/spojeni/";

/// Tunable parameters for trip planning.
///
/// The fallback factors convert a straight-line distance into an
/// estimated duration when the routing service is unavailable. They are
/// calibration values, not laws; the transit factor in particular is an
/// inherited estimate.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Fallback minutes per km for driving legs.
    pub drive_fallback_min_per_km: f64,

    /// Fallback minutes per km for bus-proxy legs.
    pub bus_fallback_min_per_km: f64,

    /// Fallback minutes per km for walking legs.
    pub walk_fallback_min_per_km: f64,

    /// Base URL for the timetable deep link built from stop names.
    pub timetable_base_url: String,

    /// Maximum number of stops returned by the nearest-stop endpoint.
    pub max_nearby_stops: usize,
}

impl PlannerConfig {
    /// Fallback duration factor (minutes per km) for a leg mode.
    pub fn fallback_min_per_km(&self, mode: LegMode) -> f64 {
        match mode {
            LegMode::Walk => self.walk_fallback_min_per_km,
            LegMode::Drive => self.drive_fallback_min_per_km,
            LegMode::Transit => self.bus_fallback_min_per_km,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            drive_fallback_min_per_km: 1.5,
            bus_fallback_min_per_km: 2.0,
            walk_fallback_min_per_km: 12.0, // 5 km/h walking pace
            timetable_base_url: DEFAULT_TIMETABLE_BASE_URL.to_string(),
            max_nearby_stops: 50,
        }
    }
}
