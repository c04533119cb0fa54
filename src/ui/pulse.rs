//! Highlight animation capability for the search bar pulse
//!
//! The shell picks one implementation at startup. Targets without a smooth
//! repaint loop, and users who asked for reduced motion, get a static ring.

use std::f64::consts::TAU;

pub trait PulseAnimation {
    /// Ring opacity in `0.0..=1.0` at `time` seconds
    fn intensity(&self, time: f64) -> f32;

    /// Whether the caller must keep repainting while the pulse is visible
    fn is_animated(&self) -> bool;
}

/// Smooth breathing ring
pub struct BreathingPulse {
    pub period_secs: f64,
}

impl Default for BreathingPulse {
    fn default() -> Self {
        Self { period_secs: 1.6 }
    }
}

impl PulseAnimation for BreathingPulse {
    fn intensity(&self, time: f64) -> f32 {
        let phase = (time / self.period_secs) * TAU;
        // Map cos from [-1, 1] to [0.25, 1.0] so the ring never disappears
        (0.625 - 0.375 * phase.cos()) as f32
    }

    fn is_animated(&self) -> bool {
        true
    }
}

/// Constant ring for reduced motion
pub struct StaticHighlight;

impl PulseAnimation for StaticHighlight {
    fn intensity(&self, _time: f64) -> f32 {
        1.0
    }

    fn is_animated(&self) -> bool {
        false
    }
}

pub fn select(reduce_motion: bool) -> Box<dyn PulseAnimation> {
    if reduce_motion || cfg!(target_arch = "wasm32") {
        Box::new(StaticHighlight)
    } else {
        Box::new(BreathingPulse::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breathing_stays_in_range() {
        let pulse = BreathingPulse::default();
        for i in 0..200 {
            let v = pulse.intensity(i as f64 * 0.05);
            assert!((0.25..=1.0).contains(&v), "intensity {v} out of range");
        }
        assert!((pulse.intensity(0.0) - 0.25).abs() < 1e-6);
        assert!((pulse.intensity(0.8) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reduced_motion_is_static() {
        let pulse = select(true);
        assert!(!pulse.is_animated());
        assert_eq!(pulse.intensity(3.3), 1.0);
    }
}
