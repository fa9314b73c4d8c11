use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Én observasjon av et sporet punkt (ankel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(alias = "timestamp")]
    pub t: f64, // sekunder
    pub x: f64, // skjermkoordinater (px)
    pub y: f64, // skjermkoordinater (px)
}

impl Sample {
    pub fn new(t: f64, x: f64, y: f64) -> Self {
        Self { t, x, y }
    }

    /// Euklidsk avstand til et annet sample (samme koordinatsystem).
    #[inline]
    pub fn distance_to(&self, other: &Sample) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Et detektert spark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickEvent {
    /// Indeks i den trimmede trajektorien (etter oppvarmings-samples)
    pub index: usize,
    /// Tidsstempel (sek) for samplet som utløste sparket
    pub time: f64,
    /// Fart (px/s) i øyeblikket sparket ble utløst
    pub speed: f64,
}

/// Utledet sammendrag: antall spark og raskeste spark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub kick_count: usize,
    pub peak: Option<KickEvent>,
}

impl SessionSummary {
    /// Bygger sammendrag fra en ordnet liste av spark.
    /// Ved lik fart vinner første forekomst (streng `>`).
    pub fn from_events(events: &[KickEvent]) -> Self {
        let mut peak: Option<KickEvent> = None;
        for ev in events {
            match peak {
                Some(p) if ev.speed <= p.speed => {}
                _ => peak = Some(*ev),
            }
        }
        Self { kick_count: events.len(), peak }
    }
}

/// Resultat fra `analyze`: spark i rekkefølge + toppspark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub events: Vec<KickEvent>,
    pub peak: Option<KickEvent>,
}

impl Analysis {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn kick_count(&self) -> usize {
        self.events.len()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            kick_count: self.events.len(),
            peak: self.peak,
        }
    }
}

/// Det `stop_session` returnerer til presentasjonslaget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub started_at: DateTime<Utc>,
    pub stopped_at: DateTime<Utc>,
    pub sample_count: usize,
    pub events: Vec<KickEvent>,
    pub summary: SessionSummary,
}

impl SessionResult {
    pub fn kick_count(&self) -> usize {
        self.summary.kick_count
    }

    pub fn peak(&self) -> Option<&KickEvent> {
        self.summary.peak.as_ref()
    }

    pub fn duration_secs(&self) -> f64 {
        (self.stopped_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}
