use crate::types::Sample;

/// Samler samples for én opptaksøkt. Ingen deteksjonslogikk her.
///
/// Bufferet er kun append/clear; ingen validering av monoton tid.
#[derive(Debug, Default)]
pub struct TrajectoryBuffer {
    samples: Vec<Sample>,
    active: bool,
}

impl TrajectoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tømmer tidligere data og markerer økten som aktiv.
    /// Trygt å kalle mens en økt allerede er aktiv.
    pub fn start(&mut self) {
        self.samples.clear();
        self.active = true;
    }

    /// Legger til et sample. Returnerer `false` (no-op) hvis økten ikke er aktiv.
    pub fn append(&mut self, sample: Sample) -> bool {
        if !self.active {
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Markerer økten som inaktiv og eksponerer den ferdige sekvensen.
    pub fn stop(&mut self) -> &[Sample] {
        self.active = false;
        &self.samples
    }

    /// Som `stop`, men flytter sekvensen ut (bufferet står tomt igjen).
    pub fn stop_and_take(&mut self) -> Vec<Sample> {
        self.active = false;
        std::mem::take(&mut self.samples)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
