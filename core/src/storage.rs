use std::path::Path;

use log::{info, warn};

use crate::config::DetectorConfig;
use crate::error::KickResult;

/// Leser inn detektor-konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig. Manglende felt fylles fra default.
pub fn load_config<P: AsRef<Path>>(path: P) -> KickResult<DetectorConfig> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg: DetectorConfig = crate::parse_json(&contents)?;
        cfg.validate()?;
        info!(
            "config loaded from {} (kick_threshold={}, cooldown_speed={})",
            path.display(),
            cfg.kick_threshold,
            cfg.cooldown_speed
        );
        Ok(cfg)
    } else {
        warn!("config not found at {}, using defaults", path.display());
        Ok(DetectorConfig::default())
    }
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config<P: AsRef<Path>>(cfg: &DetectorConfig, path: P) -> KickResult<()> {
    let path = path.as_ref();
    cfg.validate()?;
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json)?;
    info!("config saved to {}", path.display());
    Ok(())
}
