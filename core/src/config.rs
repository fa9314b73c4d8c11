use serde::{Deserialize, Serialize};

use crate::error::{KickError, KickResult};

pub const KICK_THRESHOLD: f64 = 1000.0; // px/s – utløser spark
pub const COOLDOWN_SPEED: f64 = 400.0;  // px/s – re-armerer detektoren
pub const WARMUP_SAMPLES: usize = 5;    // ustabile oppstartsframes fra trackeren
pub const MIN_SAMPLES: usize = 6;       // len <= MIN_SAMPLES => ingen analyse
pub const MIN_DT_S: f64 = 0.001;        // dt <= MIN_DT_S => hopp over paret

/// Parametre for spark-detektoren. Defaults tilsvarer appens konstanter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub kick_threshold: f64,
    pub cooldown_speed: f64,
    pub warmup_samples: usize,
    pub min_samples: usize,
    pub min_dt: f64,
    /// Valgfri ekstra debounce (antall trimmede frames siden forrige spark).
    /// `None` = kun hysterese, slik appen faktisk oppfører seg.
    pub min_frame_gap: Option<usize>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            kick_threshold: KICK_THRESHOLD,
            cooldown_speed: COOLDOWN_SPEED,
            warmup_samples: WARMUP_SAMPLES,
            min_samples: MIN_SAMPLES,
            min_dt: MIN_DT_S,
            min_frame_gap: None,
        }
    }
}

impl DetectorConfig {
    pub fn with_min_frame_gap(mut self, gap: usize) -> Self {
        self.min_frame_gap = Some(gap);
        self
    }

    pub fn validate(&self) -> KickResult<()> {
        let finite_nonneg = |name: &str, v: f64| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(KickError::InvalidConfig(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )))
            }
        };
        finite_nonneg("kick_threshold", self.kick_threshold)?;
        finite_nonneg("cooldown_speed", self.cooldown_speed)?;
        finite_nonneg("min_dt", self.min_dt)?;

        // Hysterese krever at re-armeringsterskelen ligger under utløserterskelen
        if self.cooldown_speed > self.kick_threshold {
            return Err(KickError::InvalidConfig(format!(
                "cooldown_speed ({}) must not exceed kick_threshold ({})",
                self.cooldown_speed, self.kick_threshold
            )));
        }
        Ok(())
    }
}
