// core/src/detector.rs
//! Spark-deteksjon fra ankel-trajektorie.
//!
//! Fart beregnes per par av påfølgende samples (avstand / dt) og mates inn i
//! en to-tilstands maskin med hysterese:
//!
//! - `Armed --(fart > kick_threshold)--> Cooldown` (sender `KickEvent`)
//! - `Cooldown --(fart < cooldown_speed)--> Armed`
//!
//! Et vedvarende høyfartsparti gir derfor nøyaktig ett spark.
//! `KickDetector::analyze` kjører over en ferdig trajektorie; `KickStream`
//! kjører samme maskin inkrementelt under opptak og gir identiske spark.

use log::debug;

use crate::config::DetectorConfig;
use crate::types::{Analysis, KickEvent, Sample, SessionSummary};

/// Fart mellom to samples, eller `None` når `dt <= min_dt` (paret hoppes over).
#[inline]
pub fn speed_between(prev: &Sample, cur: &Sample, min_dt: f64) -> Option<f64> {
    let dt = cur.t - prev.t;
    if dt.is_nan() || dt <= min_dt {
        return None;
    }
    Some(cur.distance_to(prev) / dt)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CooldownState {
    #[default]
    Armed,
    Cooldown,
}

/// Selve tilstandsmaskinen. Deles av batch- og strømvarianten.
#[derive(Debug, Clone)]
struct KickGate {
    state: CooldownState,
    last_kick_index: Option<usize>,
    kick_threshold: f64,
    cooldown_speed: f64,
    min_frame_gap: Option<usize>,
}

impl KickGate {
    fn new(cfg: &DetectorConfig) -> Self {
        Self {
            state: CooldownState::Armed,
            last_kick_index: None,
            kick_threshold: cfg.kick_threshold,
            cooldown_speed: cfg.cooldown_speed,
            min_frame_gap: cfg.min_frame_gap,
        }
    }

    fn frame_gap_ok(&self, index: usize) -> bool {
        match (self.min_frame_gap, self.last_kick_index) {
            (Some(gap), Some(prev)) => index.saturating_sub(prev) >= gap,
            _ => true,
        }
    }

    /// Ett steg: først utløser-sjekk, deretter (uavhengig) re-armering.
    fn step(&mut self, index: usize, time: f64, speed: f64) -> Option<KickEvent> {
        let mut fired = None;

        if speed > self.kick_threshold
            && self.state == CooldownState::Armed
            && self.frame_gap_ok(index)
        {
            let ev = KickEvent { index, time, speed };
            debug!("kick at index={} t={:.3}s speed={:.1}", index, time, speed);
            self.state = CooldownState::Cooldown;
            self.last_kick_index = Some(index);
            fired = Some(ev);
        }

        if speed < self.cooldown_speed {
            self.state = CooldownState::Armed;
        }

        fired
    }
}

/// Tellere fra én analysegjennomgang.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub pairs_evaluated: usize,
    pub pairs_skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct KickDetector {
    config: DetectorConfig,
}

impl KickDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Ren funksjon av input: samme trajektorie gir alltid samme resultat.
    pub fn analyze(&self, samples: &[Sample]) -> Analysis {
        self.analyze_with_stats(samples).0
    }

    pub fn analyze_with_stats(&self, samples: &[Sample]) -> (Analysis, PassStats) {
        let mut stats = PassStats::default();

        // For lite data: bevisst vakt, ikke en feil
        if samples.len() <= self.config.min_samples {
            return (Analysis::empty(), stats);
        }
        let trimmed = match samples.get(self.config.warmup_samples..) {
            Some(t) => t,
            None => return (Analysis::empty(), stats),
        };

        let mut gate = KickGate::new(&self.config);
        let mut events = Vec::new();

        for (i, pair) in trimmed.windows(2).enumerate() {
            let (prev, cur) = (&pair[0], &pair[1]);
            let index = i + 1;

            let speed = match speed_between(prev, cur, self.config.min_dt) {
                Some(v) => v,
                None => {
                    debug!("skip pair at index={} (dt={:.4}s)", index, cur.t - prev.t);
                    stats.pairs_skipped += 1;
                    continue;
                }
            };
            stats.pairs_evaluated += 1;

            if let Some(ev) = gate.step(index, cur.t, speed) {
                events.push(ev);
            }
        }

        let peak = SessionSummary::from_events(&events).peak;
        (Analysis { events, peak }, stats)
    }
}

/// Inkrementell variant for live-visning under opptak.
///
/// Spark som utløses før antall samples har passert `min_samples` holdes
/// tilbake og slippes først når terskelen passeres, slik at strømmen aldri
/// sender et spark `analyze` ikke ville gitt.
#[derive(Debug, Clone)]
pub struct KickStream {
    config: DetectorConfig,
    gate: KickGate,
    seen: usize,
    prev: Option<Sample>,
    trimmed_index: usize,
    events: Vec<KickEvent>,
    released: usize,
    stats: PassStats,
}

impl KickStream {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            gate: KickGate::new(&config),
            config,
            seen: 0,
            prev: None,
            trimmed_index: 0,
            events: Vec::new(),
            released: 0,
            stats: PassStats::default(),
        }
    }

    /// Mater inn ett sample og returnerer spark som nå kan sendes ut.
    pub fn push(&mut self, sample: Sample) -> Vec<KickEvent> {
        self.seen += 1;
        if self.seen <= self.config.warmup_samples {
            return Vec::new();
        }

        if let Some(prev) = self.prev.replace(sample) {
            self.trimmed_index += 1;
            match speed_between(&prev, &sample, self.config.min_dt) {
                Some(speed) => {
                    self.stats.pairs_evaluated += 1;
                    if let Some(ev) = self.gate.step(self.trimmed_index, sample.t, speed) {
                        self.events.push(ev);
                    }
                }
                None => self.stats.pairs_skipped += 1,
            }
        }

        if self.seen <= self.config.min_samples {
            return Vec::new();
        }
        let out = self.events[self.released..].to_vec();
        self.released = self.events.len();
        out
    }

    pub fn state(&self) -> CooldownState {
        self.gate.state
    }

    pub fn samples_seen(&self) -> usize {
        self.seen
    }

    pub fn stats(&self) -> PassStats {
        self.stats
    }

    /// Avslutter strømmen. Samme vakt som `analyze` for korte trajektorier.
    pub fn finish(self) -> Analysis {
        if self.seen <= self.config.min_samples {
            return Analysis::empty();
        }
        let peak = SessionSummary::from_events(&self.events).peak;
        Analysis {
            events: self.events,
            peak,
        }
    }
}
