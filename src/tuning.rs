//! Gameplay tuning
//!
//! Every constant the simulation reads lives here so a run can be
//! reconfigured from JSON. Persisted separately from the high score in
//! LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// LocalStorage key for a JSON tuning override
pub const STORAGE_KEY: &str = "gapwing_tuning";

/// Field size, bird physics and obstacle behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Bird ===
    /// Fixed horizontal centre of the bird
    pub bird_x: f32,
    /// Vertical centre on start/restart
    pub bird_start_y: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    /// Velocity added per tick
    pub gravity: f32,
    /// Velocity set on flap (negative is up)
    pub jump_impulse: f32,
    /// Presentation tilt per unit of velocity
    pub tilt_factor: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Leftward movement per tick
    pub obstacle_speed: f32,
    /// Vertical opening between the barriers
    pub gap_size: f32,
    /// Ticks between spawns
    pub spawn_interval: u32,
    /// Minimum distance between a field edge and the gap
    pub min_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            bird_x: BIRD_X,
            bird_start_y: BIRD_START_Y,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            tilt_factor: TILT_FACTOR,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            gap_size: GAP_SIZE,
            spawn_interval: SPAWN_INTERVAL,
            min_margin: MIN_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot run.
    ///
    /// Must pass before a game may enter Playing: the spawn range is only
    /// well formed when the gap and both margins fit in the field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("gravity", self.gravity),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("gap_size", self.gap_size),
        ];
        for (name, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return Err(ConfigError::JumpNotUpward(self.jump_impulse));
        }
        if !(self.min_margin.is_finite() && self.min_margin >= 0.0) {
            return Err(ConfigError::BadMargin(self.min_margin));
        }

        let (min, max) = self.gap_top_bounds();
        if self.gap_size + 2.0 * self.min_margin > self.field_height || min > max {
            return Err(ConfigError::GapDoesNotFit {
                gap_size: self.gap_size,
                min_margin: self.min_margin,
                field_height: self.field_height,
            });
        }

        let (x, y) = (self.bird_x, self.bird_start_y);
        let half_w = self.bird_width / 2.0;
        let half_h = self.bird_height / 2.0;
        let inside_x = x.is_finite() && x - half_w >= 0.0 && x + half_w <= self.field_width;
        let inside_y = y.is_finite() && y - half_h >= 0.0 && y + half_h <= self.field_height;
        if !(inside_x && inside_y) {
            return Err(ConfigError::StartOutOfField { x, y });
        }

        Ok(())
    }

    /// Whole-pixel range of legal gap-top offsets, `min..=max`
    pub fn gap_top_range(&self) -> (u32, u32) {
        let (min, max) = self.gap_top_bounds();
        (min.max(0.0) as u32, max.max(0.0) as u32)
    }

    fn gap_top_bounds(&self) -> (f32, f32) {
        (
            self.min_margin.ceil(),
            (self.field_height - self.gap_size - self.min_margin).floor(),
        )
    }

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native runs take overrides from `--tuning` instead
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gap_top_range(), (50, 400));
    }

    #[test]
    fn test_gap_must_fit_with_margins() {
        let tuning = Tuning {
            gap_size: 520.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));

        // Exactly fitting is fine: the range collapses to one value
        let tuning = Tuning {
            gap_size: 500.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gap_top_range(), (50, 50));
    }

    #[test]
    fn test_fractional_range_without_whole_pixel_rejected() {
        let tuning = Tuning {
            field_height: 600.0,
            gap_size: 499.5,
            min_margin: 50.2,
            bird_start_y: 300.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let tuning = Tuning {
            obstacle_speed: 0.0,
            ..Default::default()
        };
        match tuning.validate() {
            Err(ConfigError::NotPositive { name, .. }) => assert_eq!(name, "obstacle_speed"),
            other => panic!("unexpected: {:?}", other),
        }

        let tuning = Tuning {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotPositive { name: "gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_downward_jump_and_negative_margin() {
        let tuning = Tuning {
            jump_impulse: 6.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::JumpNotUpward(_))));

        let tuning = Tuning {
            min_margin: -1.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::BadMargin(_))));
    }

    #[test]
    fn test_start_must_be_inside_field() {
        let tuning = Tuning {
            bird_start_y: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::StartOutOfField { .. })
        ));
    }

    #[test]
    fn test_bird_x_must_be_inside_field() {
        let tuning = Tuning {
            bird_x: 1000.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::StartOutOfField { x, .. }) if x == 1000.0
        ));

        // Left edge poking out
        let tuning = Tuning {
            bird_x: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::StartOutOfField { .. })
        ));

        assert!(matches!(
            Tuning::from_json(r#"{ "bird_x": 1000 }"#),
            Err(ConfigError::StartOutOfField { .. })
        ));
    }

    #[test]
    fn test_native_load_uses_defaults() {
        assert_eq!(Tuning::load(), Tuning::default());
        assert_eq!(STORAGE_KEY, "gapwing_tuning");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "spawn_interval": 90 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.spawn_interval, 90);
        assert_eq!(tuning.field_height, FIELD_HEIGHT);
        assert_eq!(tuning.gap_size, GAP_SIZE);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "gap_size": 900 }"#),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }
}
