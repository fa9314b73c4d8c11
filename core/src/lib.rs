//! KickSim core: buffrer ankel-trajektorien under opptak og finner spark
//! med en terskel/cooldown-tilstandsmaskin.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

pub mod config;
pub mod detector;
pub mod error;
pub mod metrics;
pub mod session;
pub mod storage;
pub mod tracking;
pub mod trajectory;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use config::DetectorConfig;
pub use detector::{speed_between, CooldownState, KickDetector, KickStream, PassStats};
pub use error::{KickError, KickResult};
pub use metrics::Metrics;
pub use session::KickSession;
pub use storage::{load_config, save_config};
pub use trajectory::TrajectoryBuffer;
pub use types::{Analysis, KickEvent, Sample, SessionResult, SessionSummary};

/// JSON → T med sti til feilen (f.eks. `[3].t`).
pub(crate) fn parse_json<T: DeserializeOwned>(json_in: &str) -> KickResult<T> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de).map_err(|e| KickError::Parse {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

// Objekt først ({t,x,y} / {timestamp,x,y}), deretter [t, x, y]
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SampleIn {
    Object(Sample),
    Triple(f64, f64, f64),
}

impl From<SampleIn> for Sample {
    fn from(s: SampleIn) -> Self {
        match s {
            SampleIn::Object(s) => s,
            SampleIn::Triple(t, x, y) => Sample::new(t, x, y),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnalyzeOut {
    kick_count: usize,
    events: Vec<KickEvent>,
    peak: Option<KickEvent>,
}

/// Analyserer en trajektorie gitt som JSON-array og returnerer JSON.
///
/// Utdata: `{ "kick_count": n, "events": [...], "peak": {...} | null }`.
pub fn analyze_trajectory_json(samples_json: &str, config_json: Option<&str>) -> KickResult<String> {
    let raw: Vec<SampleIn> = parse_json(samples_json)?;
    let samples: Vec<Sample> = raw.into_iter().map(Sample::from).collect();

    let cfg = match config_json {
        Some(c) => parse_json::<DetectorConfig>(c)?,
        None => DetectorConfig::default(),
    };
    cfg.validate()?;

    let analysis = KickDetector::new(cfg).analyze(&samples);
    let out = AnalyzeOut {
        kick_count: analysis.kick_count(),
        events: analysis.events,
        peak: analysis.peak,
    };
    Ok(serde_json::to_string(&out)?)
}
