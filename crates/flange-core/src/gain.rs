//! Dry/wet gain balancing for feedback delay effects.
//!
//! Mixing a signal with a delayed copy of itself can double its level, and
//! a feedback loop adds resonance on top. [`GainBalance`] derives the
//! coefficients that keep both in check:
//!
//! - dry and wet are normalised by `1 / (1 + mix)` so their sum stays at
//!   unity gain,
//! - the wet gain is further scaled by `1 - |feedback|`, the inverse of the
//!   feedback comb's peak gain.

/// Mix, feedback and channel-phase coefficients derived from percentages.
///
/// # Example
///
/// ```rust
/// use flange_core::GainBalance;
///
/// let g = GainBalance::from_percent(50.0, 71.0, 25.0);
/// assert!((g.in_gain - 1.0 / 1.71).abs() < 1e-12);
/// assert!((g.mix_gain - 0.71 / 1.71 * 0.5).abs() < 1e-12);
/// assert_eq!(g.feedback_gain, 0.5);
/// assert_eq!(g.channel_phase, 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainBalance {
    /// Gain applied to the dry input.
    pub in_gain: f64,
    /// Fraction of the previous delayed output fed back into the line.
    pub feedback_gain: f64,
    /// Gain applied to the delayed (wet) signal.
    pub mix_gain: f64,
    /// Per-channel LFO rotation as a fraction of a period.
    pub channel_phase: f64,
}

impl GainBalance {
    /// Derive coefficients from feedback (−100..100 %), mix (0..100 %) and
    /// channel phase (0..100 %).
    pub fn from_percent(feedback_pct: f64, mix_pct: f64, channel_phase_pct: f64) -> Self {
        let feedback_gain = feedback_pct / 100.0;
        let mix = mix_pct / 100.0;
        let channel_phase = channel_phase_pct / 100.0;

        let in_gain = 1.0 / (1.0 + mix);
        let mix_gain = mix / (1.0 + mix) * (1.0 - libm::fabs(feedback_gain));

        Self {
            in_gain,
            feedback_gain,
            mix_gain,
            channel_phase,
        }
    }

    /// Unity dry path, no wet signal, no feedback.
    pub const fn passthrough() -> Self {
        Self {
            in_gain: 1.0,
            feedback_gain: 0.0,
            mix_gain: 0.0,
            channel_phase: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mix_is_passthrough() {
        let g = GainBalance::from_percent(0.0, 0.0, 0.0);
        assert_eq!(g, GainBalance::passthrough());
    }

    #[test]
    fn test_feedback_scales_wet_only() {
        let dry = GainBalance::from_percent(0.0, 100.0, 0.0);
        assert_eq!(dry.in_gain, 0.5);
        assert_eq!(dry.mix_gain, 0.5);

        let pos = GainBalance::from_percent(95.0, 100.0, 0.0);
        let neg = GainBalance::from_percent(-95.0, 100.0, 0.0);
        assert_eq!(pos.in_gain, 0.5);
        assert!((pos.mix_gain - 0.025).abs() < 1e-12);
        assert_eq!(pos.mix_gain, neg.mix_gain);
        assert_eq!(neg.feedback_gain, -0.95);
    }

    #[test]
    fn test_dry_plus_wet_at_most_unity() {
        for mix in [0.0, 10.0, 50.0, 71.0, 100.0] {
            for fb in [-95.0, -50.0, 0.0, 50.0, 95.0] {
                let g = GainBalance::from_percent(fb, mix, 25.0);
                assert!(g.in_gain + g.mix_gain <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn test_reference_gains() {
        let g = GainBalance::from_percent(50.0, 71.0, 25.0);
        assert!((g.in_gain - 0.5848).abs() < 1e-4);
        assert!((g.mix_gain - 0.2076).abs() < 1e-4);
    }
}
