// core/src/tracking.rs
//! Grensesnitt mot pose-trackeren (kamera + positur-estimering ligger utenfor kjernen).
//!
//! Trackeren leverer normaliserte leddpunkter (0..1, y opp). Her filtreres de på
//! confidence, ankelen plukkes ut og mappes til skjermkoordinater før de sendes
//! inn i en `KickSession`.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::KickResult;
use crate::session::KickSession;
use crate::types::Sample;

/// Minste confidence for at et leddpunkt regnes som gyldig (streng `>`).
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose,
    Neck,
    Root,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::Neck => "neck",
            Joint::Root => "root",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
        }
    }
}

/// Beinene i skjelettet overlayen tegner (par av ledd).
pub const SKELETON_BONES: [(Joint, Joint); 14] = [
    (Joint::Neck, Joint::Root),
    (Joint::Root, Joint::RightHip),
    (Joint::Root, Joint::LeftHip),
    (Joint::RightHip, Joint::RightKnee),
    (Joint::RightKnee, Joint::RightAnkle),
    (Joint::LeftHip, Joint::LeftKnee),
    (Joint::LeftKnee, Joint::LeftAnkle),
    (Joint::Neck, Joint::Nose),
    (Joint::Neck, Joint::RightShoulder),
    (Joint::RightShoulder, Joint::RightElbow),
    (Joint::RightElbow, Joint::RightWrist),
    (Joint::Neck, Joint::LeftShoulder),
    (Joint::LeftShoulder, Joint::LeftElbow),
    (Joint::LeftElbow, Joint::LeftWrist),
];

/// Ett leddpunkt fra trackeren, normalisert (0..1) med y opp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedPoint {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
}

impl TrackedPoint {
    /// Mapper til skjermkoordinater (px) med y ned.
    pub fn to_screen(&self, width: f64, height: f64) -> (f64, f64) {
        (self.x * width, (1.0 - self.y) * height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    pub min_confidence: f64,
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl ConfidenceGate {
    pub fn accepts(&self, point: &TrackedPoint) -> bool {
        point.confidence > self.min_confidence
    }
}

/// Én frame fra trackeren: tidsstempel + gjenkjente ledd.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseObservation {
    pub timestamp: f64,
    pub joints: HashMap<Joint, TrackedPoint>,
}

impl PoseObservation {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            joints: HashMap::new(),
        }
    }

    pub fn with_joint(mut self, joint: Joint, point: TrackedPoint) -> Self {
        self.joints.insert(joint, point);
        self
    }

    /// Skjermpunkt for et ledd hvis det finnes og passerer confidence-vakten.
    pub fn screen_point(
        &self,
        joint: Joint,
        gate: &ConfidenceGate,
        width: f64,
        height: f64,
    ) -> Option<(f64, f64)> {
        let p = self.joints.get(&joint)?;
        if !gate.accepts(p) {
            return None;
        }
        Some(p.to_screen(width, height))
    }

    /// Bein (linjesegmenter i skjermkoordinater) der begge ender er gyldige.
    pub fn skeleton_segments(
        &self,
        gate: &ConfidenceGate,
        width: f64,
        height: f64,
    ) -> Vec<((f64, f64), (f64, f64))> {
        SKELETON_BONES
            .iter()
            .filter_map(|(a, b)| {
                let pa = self.screen_point(*a, gate, width, height)?;
                let pb = self.screen_point(*b, gate, width, height)?;
                Some((pa, pb))
            })
            .collect()
    }
}

/// Kilden til pose-observasjoner (kamera + positur-modell i appen).
///
/// `Ok(None)` betyr at strømmen er slutt. Kamera- og tilgangsfeil rapporteres
/// som `KickError::DeviceUnavailable` / `KickError::PermissionDenied`.
pub trait PoseSource {
    fn next_observation(&mut self) -> KickResult<Option<PoseObservation>>;
}

/// Hvilket ledd som spores, og skjermstørrelsen punktene mappes til.
#[derive(Debug, Clone, Copy)]
pub struct TrackingTarget {
    pub joint: Joint,
    pub gate: ConfidenceGate,
    pub width: f64,
    pub height: f64,
}

impl TrackingTarget {
    pub fn ankle(width: f64, height: f64) -> Self {
        Self {
            joint: Joint::RightAnkle,
            gate: ConfidenceGate::default(),
            width,
            height,
        }
    }

    pub fn sample_from(&self, obs: &PoseObservation) -> Option<Sample> {
        let (x, y) = obs.screen_point(self.joint, &self.gate, self.width, self.height)?;
        Some(Sample::new(obs.timestamp, x, y))
    }
}

/// Pumper observasjoner inn i økten til kilden er tom.
/// Returnerer antall samples som ble akseptert.
pub fn drive_session<S: PoseSource + ?Sized>(
    source: &mut S,
    target: &TrackingTarget,
    session: &KickSession,
) -> KickResult<usize> {
    let mut accepted = 0usize;
    loop {
        let obs = match source.next_observation() {
            Ok(Some(obs)) => obs,
            Ok(None) => break,
            Err(e) => {
                warn!("pose source failed after {} samples: {}", accepted, e);
                return Err(e);
            }
        };

        match target.sample_from(&obs) {
            Some(sample) => {
                if session.push(sample) {
                    accepted += 1;
                }
            }
            None => debug!(
                "frame t={:.3}s: {} missing or below confidence",
                obs.timestamp,
                target.joint.as_str()
            ),
        }
    }
    Ok(accepted)
}
