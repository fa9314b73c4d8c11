use once_cell::sync::Lazy;
use prometheus::{Encoder, Gauge, IntCounter, Registry, TextEncoder};

/// Prosess-global metrikk-instans (brukes når sesjonen ikke får egen).
pub static GLOBAL_METRICS: Lazy<Metrics> =
    Lazy::new(|| Metrics::try_new().expect("metric names are static and valid"));

/// Tellere for kjernen, registrert i eget `Registry`.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    samples_total: IntCounter,
    sessions_total: IntCounter,
    kicks_total: IntCounter,
    pairs_skipped_total: IntCounter,
    peak_speed: Gauge,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("samples_total", &self.samples_total.get())
            .field("sessions_total", &self.sessions_total.get())
            .field("kicks_total", &self.kicks_total.get())
            .field("pairs_skipped_total", &self.pairs_skipped_total.get())
            .field("peak_speed", &self.peak_speed.get())
            .finish()
    }
}

impl Metrics {
    pub fn try_new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let samples_total = IntCounter::new(
            "kicksim_samples_total",
            "Tracked-point samples accepted into a recording session",
        )?;
        let sessions_total =
            IntCounter::new("kicksim_sessions_total", "Recording sessions analysed")?;
        let kicks_total = IntCounter::new("kicksim_kicks_total", "Kick events detected")?;
        let pairs_skipped_total = IntCounter::new(
            "kicksim_pairs_skipped_total",
            "Sample pairs skipped because dt was too small",
        )?;
        let peak_speed = Gauge::new(
            "kicksim_peak_speed",
            "Peak kick speed of the last analysed session",
        )?;

        registry.register(Box::new(samples_total.clone()))?;
        registry.register(Box::new(sessions_total.clone()))?;
        registry.register(Box::new(kicks_total.clone()))?;
        registry.register(Box::new(pairs_skipped_total.clone()))?;
        registry.register(Box::new(peak_speed.clone()))?;

        Ok(Self {
            registry,
            samples_total,
            sessions_total,
            kicks_total,
            pairs_skipped_total,
            peak_speed,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn samples_total(&self) -> &IntCounter {
        &self.samples_total
    }

    pub fn sessions_total(&self) -> &IntCounter {
        &self.sessions_total
    }

    pub fn kicks_total(&self) -> &IntCounter {
        &self.kicks_total
    }

    pub fn pairs_skipped_total(&self) -> &IntCounter {
        &self.pairs_skipped_total
    }

    pub fn peak_speed(&self) -> &Gauge {
        &self.peak_speed
    }

    /// Tekstformat (Prometheus exposition) for alle tellere.
    pub fn gather_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
