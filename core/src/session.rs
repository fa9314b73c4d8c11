// core/src/session.rs
//! Opptaksøkt med eksplisitt livssyklus: start → samples → stopp → analyse.
//!
//! Samples kommer fra frame-callbacken (én tråd), start/stopp fra UI (en annen).
//! Bufferet ligger bak én `Mutex`; analysen kjører først etter at stopp har
//! snudd tilstanden under låsen, så ingen append kan slippe inn etterpå.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::DetectorConfig;
use crate::detector::{CooldownState, KickDetector, KickStream};
use crate::error::{KickError, KickResult};
use crate::metrics::{Metrics, GLOBAL_METRICS};
use crate::trajectory::TrajectoryBuffer;
use crate::types::{KickEvent, Sample, SessionResult, SessionSummary};

pub type KickCallback = Box<dyn Fn(&KickEvent) + Send + Sync>;

#[derive(Debug, Default)]
struct Recording {
    buffer: TrajectoryBuffer,
    live: Option<KickStream>,
    started_at: Option<DateTime<Utc>>,
}

pub struct KickSession {
    detector: KickDetector,
    inner: Mutex<Recording>,
    subscribers: Mutex<Vec<KickCallback>>,
    metrics: Metrics,
}

impl std::fmt::Debug for KickSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KickSession")
            .field("detector", &self.detector)
            .field("recording", &self.is_recording())
            .field("samples", &self.sample_count())
            .finish()
    }
}

// En forgiftet lås betyr bare at en subscriber paniket; dataene er fortsatt gyldige
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Default for KickSession {
    fn default() -> Self {
        Self::with_detector(KickDetector::default())
    }
}

impl KickSession {
    pub fn new(config: DetectorConfig) -> KickResult<Self> {
        config.validate()?;
        Ok(Self::with_detector(KickDetector::new(config)))
    }

    fn with_detector(detector: KickDetector) -> Self {
        Self {
            detector,
            inner: Mutex::new(Recording::default()),
            subscribers: Mutex::new(Vec::new()),
            metrics: GLOBAL_METRICS.clone(),
        }
    }

    /// Bytter ut den globale metrikk-instansen (f.eks. per test).
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn config(&self) -> &DetectorConfig {
        self.detector.config()
    }

    /// Registrerer en callback som får hvert spark live under opptak.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&KickEvent) + Send + Sync + 'static,
    {
        lock(&self.subscribers).push(Box::new(callback));
    }

    /// Starter (eller restarter) en økt. Tidligere samples forkastes.
    pub fn start_session(&self) {
        let mut rec = lock(&self.inner);
        if rec.buffer.is_active() {
            info!("restarting active session, discarding {} samples", rec.buffer.len());
        }
        rec.buffer.start();
        rec.live = Some(KickStream::new(self.detector.config().clone()));
        rec.started_at = Some(Utc::now());
        info!("session started");
    }

    /// Inngang fra tracking-laget: ett akseptert ankelpunkt per frame.
    pub fn on_tracked_point(&self, timestamp: f64, x: f64, y: f64) -> bool {
        self.push(Sample::new(timestamp, x, y))
    }

    /// Legger et sample i bufferet. `false` når ingen økt er aktiv.
    pub fn push(&self, sample: Sample) -> bool {
        let fired = {
            let mut rec = lock(&self.inner);
            if !rec.buffer.append(sample) {
                debug!("sample at t={:.3}s dropped: no active session", sample.t);
                return false;
            }
            match rec.live.as_mut() {
                Some(stream) => stream.push(sample),
                None => Vec::new(),
            }
        };
        self.metrics.samples_total().inc();

        if !fired.is_empty() {
            let subs = lock(&self.subscribers);
            for ev in &fired {
                for cb in subs.iter() {
                    cb(ev);
                }
            }
        }
        true
    }

    /// Stopper økten og analyserer hele trajektorien.
    pub fn stop_session(&self) -> KickResult<SessionResult> {
        let (samples, live, started_at) = {
            let mut rec = lock(&self.inner);
            if !rec.buffer.is_active() {
                return Err(KickError::SessionNotActive);
            }
            let samples = rec.buffer.stop().to_vec();
            (samples, rec.live.take(), rec.started_at.take())
        };
        let stopped_at = Utc::now();

        let (analysis, stats) = self.detector.analyze_with_stats(&samples);

        if let Some(stream) = live {
            let streamed = stream.finish();
            if streamed.events != analysis.events {
                warn!(
                    "live stream emitted {} kicks, analysis found {}",
                    streamed.events.len(),
                    analysis.events.len()
                );
            }
        }

        self.metrics.sessions_total().inc();
        self.metrics.kicks_total().inc_by(analysis.events.len() as u64);
        self.metrics.pairs_skipped_total().inc_by(stats.pairs_skipped as u64);
        if let Some(p) = analysis.peak {
            self.metrics.peak_speed().set(p.speed);
        }

        info!(
            "session stopped: samples={} kicks={} skipped_pairs={} peak={:?}",
            samples.len(),
            analysis.events.len(),
            stats.pairs_skipped,
            analysis.peak.map(|p| p.speed)
        );

        let summary = SessionSummary::from_events(&analysis.events);
        Ok(SessionResult {
            started_at: started_at.unwrap_or(stopped_at),
            stopped_at,
            sample_count: samples.len(),
            events: analysis.events,
            summary,
        })
    }

    pub fn is_recording(&self) -> bool {
        lock(&self.inner).buffer.is_active()
    }

    pub fn sample_count(&self) -> usize {
        lock(&self.inner).buffer.len()
    }

    /// Trajektorien fra siste (eller pågående) økt.
    pub fn trajectory(&self) -> Vec<Sample> {
        lock(&self.inner).buffer.samples().to_vec()
    }

    /// Tilstanden til live-detektoren, `None` utenfor opptak.
    pub fn live_state(&self) -> Option<CooldownState> {
        lock(&self.inner).live.as_ref().map(|s| s.state())
    }
}
