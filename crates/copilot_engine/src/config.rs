//! Recognized autopilot options.

use copilot_core::DepartSettings;
use serde::{Deserialize, Serialize};

/// Player-facing settings, deserialized from the daemon's JSON settings
/// file. All automation is opt-in; a missing key falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSettings {
    pub auto_rebuy_fuel: bool,
    /// Use the shared price-alert value instead of `fuel_threshold`.
    pub fuel_use_alert: bool,
    pub fuel_threshold: f64,
    pub fuel_alert_price: f64,

    pub auto_rebuy_co2: bool,
    pub co2_use_alert: bool,
    pub co2_threshold: f64,
    pub co2_alert_price: f64,

    pub auto_depart_all: bool,
    pub auto_depart_use_route_defaults: bool,
    /// Minimum hold utilization to depart, percent 0–100.
    pub min_vessel_utilization: u32,
    /// Derived sail speed as a percentage of max speed, 0–100.
    pub auto_vessel_speed: u32,

    pub auto_campaign_renewal: bool,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            auto_rebuy_fuel: false,
            fuel_use_alert: false,
            fuel_threshold: 400.0,
            fuel_alert_price: 400.0,
            auto_rebuy_co2: false,
            co2_use_alert: false,
            co2_threshold: 10.0,
            co2_alert_price: 10.0,
            auto_depart_all: false,
            auto_depart_use_route_defaults: true,
            min_vessel_utilization: 45,
            auto_vessel_speed: 100,
            auto_campaign_renewal: false,
        }
    }
}

impl AutopilotSettings {
    pub fn depart_settings(&self) -> DepartSettings {
        DepartSettings {
            use_route_defaults: self.auto_depart_use_route_defaults,
            speed_pct: self.auto_vessel_speed.min(100),
            min_utilization_pct: self.min_vessel_utilization.min(100),
        }
    }

    /// Copy with every feature flag off — the paused form of this config.
    pub fn disabled(&self) -> Self {
        Self {
            auto_rebuy_fuel: false,
            auto_rebuy_co2: false,
            auto_depart_all: false,
            auto_campaign_renewal: false,
            ..self.clone()
        }
    }

    pub fn any_rebuy_enabled(&self) -> bool {
        self.auto_rebuy_fuel || self.auto_rebuy_co2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_file_fills_defaults() {
        let settings: AutopilotSettings =
            serde_json::from_str(r#"{"auto_rebuy_fuel": true, "fuel_threshold": 350}"#)
                .expect("valid settings json");
        assert!(settings.auto_rebuy_fuel);
        assert!((settings.fuel_threshold - 350.0).abs() < f64::EPSILON);
        assert_eq!(settings.min_vessel_utilization, 45);
        assert!(settings.auto_depart_use_route_defaults);
    }

    #[test]
    fn disabled_copy_keeps_thresholds() {
        let mut settings = AutopilotSettings::default();
        settings.auto_depart_all = true;
        settings.fuel_threshold = 123.0;
        let off = settings.disabled();
        assert!(!off.auto_depart_all);
        assert!((off.fuel_threshold - 123.0).abs() < f64::EPSILON);
    }

    #[test]
    fn utilization_is_clamped_to_percent_range() {
        let mut settings = AutopilotSettings::default();
        settings.min_vessel_utilization = 250;
        assert_eq!(settings.depart_settings().min_utilization_pct, 100);
    }
}
