//! Flanger parameter set: defaults, validation and positional parsing.
//!
//! ## Parameters
//!
//! | Position | Name | Range | Default | Unit |
//! |----------|------|-------|---------|------|
//! | 0 | delay | 0–10 | 0 | ms |
//! | 1 | depth | 0–10 | 2 | ms |
//! | 2 | regen | −95–95 | 0 | % |
//! | 3 | width | 0–100 | 71 | % |
//! | 4 | speed | 0.1–10 | 0.5 | Hz |
//! | 5 | shape | sine, triangle | sine | - |
//! | 6 | phase | 0–100 | 25 | % |
//! | 7 | interp | linear, quadratic | linear | - |
//!
//! ## Positional grammar
//!
//! Every slot is optional. A numeric slot only takes a token that starts
//! with a number; otherwise it keeps its default and the token is offered
//! to the next slot. Keyword slots accept any unambiguous case-insensitive
//! prefix (`tri`, `quad`) and skip numeric tokens. So `flanger 1 3 tri`
//! and `flanger quad` are both valid.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use crate::error::{ConfigError, FlangerError};
use alloc::string::ToString;
use alloc::vec::Vec;
use flange_core::{GainBalance, Interpolation, WaveShape};

/// Usage line for the positional parameters.
pub const USAGE: &str = "[delay depth regen width speed shape phase interp]";

/// Name, bounds, default and unit of a numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericParam {
    /// Positional name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Inclusive minimum.
    pub min: f64,
    /// Inclusive maximum.
    pub max: f64,
    /// Default value.
    pub default: f64,
    /// Unit suffix for display.
    pub unit: &'static str,
}

impl NumericParam {
    /// Accept `value` if it lies in `[min, max]`.
    pub fn check(&self, value: f64) -> Result<f64, ConfigError> {
        if (self.min..=self.max).contains(&value) {
            Ok(value)
        } else {
            Err(ConfigError::OutOfRange {
                param: self.name,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Base delay.
pub const DELAY: NumericParam = NumericParam {
    name: "delay",
    description: "base delay",
    min: 0.0,
    max: 10.0,
    default: 0.0,
    unit: "ms",
};

/// Added swept delay.
pub const DEPTH: NumericParam = NumericParam {
    name: "depth",
    description: "added swept delay",
    min: 0.0,
    max: 10.0,
    default: 2.0,
    unit: "ms",
};

/// Regeneration (delayed signal feedback).
pub const REGEN: NumericParam = NumericParam {
    name: "regen",
    description: "regeneration (delayed signal feedback)",
    min: -95.0,
    max: 95.0,
    default: 0.0,
    unit: "%",
};

/// Delayed signal mixed with the original.
pub const WIDTH: NumericParam = NumericParam {
    name: "width",
    description: "delayed signal mixed with original",
    min: 0.0,
    max: 100.0,
    default: 71.0,
    unit: "%",
};

/// Sweeps per second.
pub const SPEED: NumericParam = NumericParam {
    name: "speed",
    description: "sweeps per second",
    min: 0.1,
    max: 10.0,
    default: 0.5,
    unit: "Hz",
};

/// Sweep phase shift between channels.
pub const PHASE: NumericParam = NumericParam {
    name: "phase",
    description: "sweep phase shift per channel (0 = 100 = same phase)",
    min: 0.0,
    max: 100.0,
    default: 25.0,
    unit: "%",
};

/// All numeric parameters in positional order (shape sits between speed and phase).
pub const NUMERIC_PARAMS: [NumericParam; 6] = [DELAY, DEPTH, REGEN, WIDTH, SPEED, PHASE];

const SHAPE_KEYWORDS: &str = "sine|triangle";
const INTERP_KEYWORDS: &str = "linear|quadratic";

/// Validated, immutable flanger configuration.
///
/// # Example
///
/// ```rust
/// use flange_effects::ParameterSet;
/// use flange_core::{Interpolation, WaveShape};
///
/// let params = ParameterSet::parse(&["0", "3", "-50", "tri", "quad"]).unwrap();
/// assert_eq!(params.depth_ms(), 3.0);
/// assert_eq!(params.feedback_pct(), -50.0);
/// assert_eq!(params.mix_pct(), 71.0);
/// assert_eq!(params.shape(), WaveShape::Triangle);
/// assert_eq!(params.interpolation(), Interpolation::Quadratic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    delay_ms: f64,
    depth_ms: f64,
    feedback_pct: f64,
    mix_pct: f64,
    speed_hz: f64,
    shape: WaveShape,
    channel_phase_pct: f64,
    interpolation: Interpolation,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            delay_ms: DELAY.default,
            depth_ms: DEPTH.default,
            feedback_pct: REGEN.default,
            mix_pct: WIDTH.default,
            speed_hz: SPEED.default,
            shape: WaveShape::Sine,
            channel_phase_pct: PHASE.default,
            interpolation: Interpolation::Linear,
        }
    }
}

impl ParameterSet {
    /// Start from the defaults and override selected values.
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder {
            params: Self::default(),
        }
    }

    /// Parse up to eight positional arguments.
    ///
    /// Fails with [`FlangerError::Config`] on an out-of-range number or an
    /// unknown keyword, and with [`FlangerError::Usage`] if arguments are
    /// left over once every slot has been tried.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, FlangerError> {
        let mut tokens = Tokens {
            args,
            next: 0,
            declined: None,
        };
        let mut params = Self::default();

        if let Some(v) = tokens.numeric(&DELAY)? {
            params.delay_ms = v;
        }
        if let Some(v) = tokens.numeric(&DEPTH)? {
            params.depth_ms = v;
        }
        if let Some(v) = tokens.numeric(&REGEN)? {
            params.feedback_pct = v;
        }
        if let Some(v) = tokens.numeric(&WIDTH)? {
            params.mix_pct = v;
        }
        if let Some(v) = tokens.numeric(&SPEED)? {
            params.speed_hz = v;
        }
        if let Some(v) = tokens.keyword("shape", &shape_table(), SHAPE_KEYWORDS) {
            params.shape = v;
        }
        if let Some(v) = tokens.numeric(&PHASE)? {
            params.channel_phase_pct = v;
        }
        if let Some(v) = tokens.keyword("interp", &interp_table(), INTERP_KEYWORDS) {
            params.interpolation = v;
        }

        tokens.finish()?;
        Ok(ParameterSetBuilder { params }.build()?)
    }

    /// Base delay in milliseconds.
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Swept delay depth in milliseconds.
    pub fn depth_ms(&self) -> f64 {
        self.depth_ms
    }

    /// Feedback (regeneration) in percent.
    pub fn feedback_pct(&self) -> f64 {
        self.feedback_pct
    }

    /// Wet mix (width) in percent.
    pub fn mix_pct(&self) -> f64 {
        self.mix_pct
    }

    /// Sweep speed in Hz.
    pub fn speed_hz(&self) -> f64 {
        self.speed_hz
    }

    /// Sweep waveform.
    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    /// Per-channel sweep phase shift in percent.
    pub fn channel_phase_pct(&self) -> f64 {
        self.channel_phase_pct
    }

    /// Delay-line interpolation.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Derived dry/wet/feedback coefficients.
    pub fn gains(&self) -> GainBalance {
        GainBalance::from_percent(self.feedback_pct, self.mix_pct, self.channel_phase_pct)
    }

    /// Minimum sweep delay in whole samples.
    pub fn min_delay_samples(&self, sample_rate: f64) -> usize {
        (self.delay_ms / 1000.0 * sample_rate + 0.5) as usize
    }

    /// Delay buffer length: maximum delay in samples, plus one slot for
    /// inclusive addressing and one for the quadratic interpolator.
    pub fn delay_len(&self, sample_rate: f64) -> usize {
        ((self.delay_ms + self.depth_ms) / 1000.0 * sample_rate + 0.5) as usize + 2
    }

    /// LFO table length: samples per sweep period.
    pub fn lfo_len(&self, sample_rate: f64) -> usize {
        (sample_rate / self.speed_hz + 0.5) as usize
    }
}

impl core::fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "parameters:")?;
        writeln!(f, "delay = {}ms", self.delay_ms)?;
        writeln!(f, "depth = {}ms", self.depth_ms)?;
        writeln!(f, "regen = {}%", self.feedback_pct)?;
        writeln!(f, "width = {}%", self.mix_pct)?;
        writeln!(f, "speed = {}Hz", self.speed_hz)?;
        writeln!(f, "shape = {}", self.shape)?;
        writeln!(f, "phase = {}%", self.channel_phase_pct)?;
        write!(f, "interp= {}", self.interpolation)
    }
}

/// Programmatic construction with the same validation as [`ParameterSet::parse`].
#[derive(Debug, Clone, Copy)]
pub struct ParameterSetBuilder {
    params: ParameterSet,
}

impl ParameterSetBuilder {
    /// Base delay in ms.
    pub fn delay_ms(mut self, v: f64) -> Self {
        self.params.delay_ms = v;
        self
    }

    /// Swept depth in ms.
    pub fn depth_ms(mut self, v: f64) -> Self {
        self.params.depth_ms = v;
        self
    }

    /// Feedback in percent.
    pub fn feedback_pct(mut self, v: f64) -> Self {
        self.params.feedback_pct = v;
        self
    }

    /// Mix in percent.
    pub fn mix_pct(mut self, v: f64) -> Self {
        self.params.mix_pct = v;
        self
    }

    /// Speed in Hz.
    pub fn speed_hz(mut self, v: f64) -> Self {
        self.params.speed_hz = v;
        self
    }

    /// Sweep waveform.
    pub fn shape(mut self, shape: WaveShape) -> Self {
        self.params.shape = shape;
        self
    }

    /// Channel phase in percent.
    pub fn channel_phase_pct(mut self, v: f64) -> Self {
        self.params.channel_phase_pct = v;
        self
    }

    /// Interpolation mode.
    pub fn interpolation(mut self, interp: Interpolation) -> Self {
        self.params.interpolation = interp;
        self
    }

    /// Range-check every numeric value and log the resulting summary.
    ///
    /// [`ParameterSet::parse`] finishes here too, so every validated set is
    /// reported exactly once.
    pub fn build(self) -> Result<ParameterSet, ConfigError> {
        let p = self.params;
        DELAY.check(p.delay_ms)?;
        DEPTH.check(p.depth_ms)?;
        REGEN.check(p.feedback_pct)?;
        WIDTH.check(p.mix_pct)?;
        SPEED.check(p.speed_hz)?;
        PHASE.check(p.channel_phase_pct)?;

        #[cfg(feature = "tracing")]
        tracing::info!("{p}");

        Ok(p)
    }
}

/// Look up a wave shape by keyword or unambiguous prefix.
pub fn parse_shape(token: &str) -> Result<WaveShape, ConfigError> {
    match_keyword(token, &shape_table()).ok_or_else(|| ConfigError::UnknownKeyword {
        param: "shape",
        token: token.to_string(),
        expected: SHAPE_KEYWORDS,
    })
}

/// Look up an interpolation mode by keyword or unambiguous prefix.
pub fn parse_interpolation(token: &str) -> Result<Interpolation, ConfigError> {
    match_keyword(token, &interp_table()).ok_or_else(|| ConfigError::UnknownKeyword {
        param: "interp",
        token: token.to_string(),
        expected: INTERP_KEYWORDS,
    })
}

fn shape_table() -> [(&'static str, WaveShape); 2] {
    WaveShape::ALL.map(|s| (s.keyword(), s))
}

fn interp_table() -> [(&'static str, Interpolation); 2] {
    Interpolation::ALL.map(|i| (i.keyword(), i))
}

/// Exact match first, then a unique case-insensitive prefix.
fn match_keyword<T: Copy>(token: &str, table: &[(&'static str, T)]) -> Option<T> {
    if let Some((_, v)) = table.iter().find(|(k, _)| k.eq_ignore_ascii_case(token)) {
        return Some(*v);
    }
    let lower = token.to_ascii_lowercase();
    let mut found = None;
    for (k, v) in table {
        if k.starts_with(lower.as_str()) {
            if found.is_some() {
                return None;
            }
            found = Some(*v);
        }
    }
    found
}

/// How a token reads as a number.
enum Number {
    /// The whole token is a number.
    Whole(f64),
    /// A number followed by something else.
    Junk,
    /// Does not start with a number.
    NotNumeric,
}

fn classify(token: &str) -> Number {
    if let Ok(v) = token.parse::<f64>() {
        return Number::Whole(v);
    }
    let body = token.strip_prefix(|c| c == '+' || c == '-').unwrap_or(token);
    let mut chars = body.chars();
    let starts_numeric = match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    };
    if starts_numeric { Number::Junk } else { Number::NotNumeric }
}

struct Tokens<'a, S> {
    args: &'a [S],
    next: usize,
    /// First keyword slot that declined a token: (index, param, expected).
    declined: Option<(usize, &'static str, &'static str)>,
}

impl<S: AsRef<str>> Tokens<'_, S> {
    fn peek(&self) -> Option<&str> {
        self.args.get(self.next).map(AsRef::as_ref)
    }

    fn numeric(&mut self, param: &NumericParam) -> Result<Option<f64>, ConfigError> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };
        match classify(token) {
            Number::Whole(v) => {
                let v = param.check(v)?;
                self.next += 1;
                Ok(Some(v))
            }
            Number::Junk => Err(ConfigError::InvalidNumber {
                param: param.name,
                token: token.to_string(),
            }),
            Number::NotNumeric => Ok(None),
        }
    }

    fn keyword<T: Copy>(
        &mut self,
        param: &'static str,
        table: &[(&'static str, T)],
        expected: &'static str,
    ) -> Option<T> {
        let token = self.peek()?;
        if !matches!(classify(token), Number::NotNumeric) {
            return None;
        }
        let found = match_keyword(token, table);
        match found {
            Some(_) => self.next += 1,
            None => {
                if self.declined.is_none_or(|(at, _, _)| at != self.next) {
                    self.declined = Some((self.next, param, expected));
                }
            }
        }
        found
    }

    /// Leftover tokens become an unknown-keyword error if a keyword slot
    /// declined the first of them, and a usage error otherwise.
    fn finish(self) -> Result<(), FlangerError> {
        let rest = &self.args[self.next..];
        let Some(first) = rest.first() else {
            return Ok(());
        };
        if let Some((at, param, expected)) = self.declined {
            if at == self.next {
                return Err(ConfigError::UnknownKeyword {
                    param,
                    token: first.as_ref().to_string(),
                    expected,
                }
                .into());
            }
        }
        let trailing: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();
        Err(FlangerError::Usage {
            trailing: trailing.join(" "),
            usage: USAGE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_defaults() {
        let p = ParameterSet::parse::<&str>(&[]).unwrap();
        assert_eq!(p, ParameterSet::default());
        assert_eq!(p.delay_ms(), 0.0);
        assert_eq!(p.depth_ms(), 2.0);
        assert_eq!(p.feedback_pct(), 0.0);
        assert_eq!(p.mix_pct(), 71.0);
        assert_eq!(p.speed_hz(), 0.5);
        assert_eq!(p.shape(), WaveShape::Sine);
        assert_eq!(p.channel_phase_pct(), 25.0);
        assert_eq!(p.interpolation(), Interpolation::Linear);
    }

    #[test]
    fn test_all_positional() {
        let p = ParameterSet::parse(&["1", "4", "-30", "50", "2", "triangle", "50", "quadratic"])
            .unwrap();
        assert_eq!(p.delay_ms(), 1.0);
        assert_eq!(p.depth_ms(), 4.0);
        assert_eq!(p.feedback_pct(), -30.0);
        assert_eq!(p.mix_pct(), 50.0);
        assert_eq!(p.speed_hz(), 2.0);
        assert_eq!(p.shape(), WaveShape::Triangle);
        assert_eq!(p.channel_phase_pct(), 50.0);
        assert_eq!(p.interpolation(), Interpolation::Quadratic);
    }

    #[test]
    fn test_keyword_skips_numeric_slots() {
        let p = ParameterSet::parse(&["tri"]).unwrap();
        assert_eq!(p.shape(), WaveShape::Triangle);
        assert_eq!(p.depth_ms(), 2.0);

        let p = ParameterSet::parse(&["QUAD"]).unwrap();
        assert_eq!(p.interpolation(), Interpolation::Quadratic);
    }

    #[test]
    fn test_numeric_skips_shape_slot() {
        // Five numbers, then phase without a shape
        let p = ParameterSet::parse(&["0", "2", "0", "71", "0.5", "50"]).unwrap();
        assert_eq!(p.shape(), WaveShape::Sine);
        assert_eq!(p.channel_phase_pct(), 50.0);
    }

    #[test]
    fn test_out_of_range_fails() {
        let err = ParameterSet::parse(&["11"]).unwrap_err();
        assert!(matches!(
            err,
            FlangerError::Config(ConfigError::OutOfRange { param: "delay", .. })
        ));

        let err = ParameterSet::parse(&["0", "2", "96"]).unwrap_err();
        assert!(matches!(
            err,
            FlangerError::Config(ConfigError::OutOfRange { param: "regen", .. })
        ));

        let err = ParameterSet::parse(&["0", "2", "0", "71", "0.05"]).unwrap_err();
        assert!(matches!(
            err,
            FlangerError::Config(ConfigError::OutOfRange { param: "speed", .. })
        ));
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let err = ParameterSet::parse(&["NaN"]).unwrap_err();
        assert!(matches!(err, FlangerError::Config(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_number_with_junk_fails() {
        let err = ParameterSet::parse(&["5ms"]).unwrap_err();
        assert!(matches!(
            err,
            FlangerError::Config(ConfigError::InvalidNumber { param: "delay", .. })
        ));
    }

    #[test]
    fn test_unknown_keyword_fails() {
        let err = ParameterSet::parse(&["square"]).unwrap_err();
        assert!(matches!(
            err,
            FlangerError::Config(ConfigError::UnknownKeyword { param: "shape", .. })
        ));
    }

    #[test]
    fn test_trailing_arguments_fail_with_usage() {
        let args = vec!["0", "2", "0", "71", "0.5", "sine", "25", "linear", "extra"];
        let err = ParameterSet::parse(&args).unwrap_err();
        assert_eq!(
            err,
            FlangerError::Usage {
                trailing: "extra".into(),
                usage: USAGE
            }
        );
    }

    #[test]
    fn test_trailing_number_after_interp_fails() {
        let err = ParameterSet::parse(&["lin", "3"]).unwrap_err();
        assert!(matches!(err, FlangerError::Usage { .. }));
    }

    #[test]
    fn test_keyword_prefix_matching() {
        assert_eq!(parse_shape("s").unwrap(), WaveShape::Sine);
        assert_eq!(parse_shape("Triangle").unwrap(), WaveShape::Triangle);
        assert_eq!(parse_interpolation("l").unwrap(), Interpolation::Linear);
        assert!(parse_interpolation("").is_err());
        assert!(parse_interpolation("cubic").is_err());
    }

    #[test]
    fn test_builder_validates() {
        let p = ParameterSet::builder()
            .feedback_pct(50.0)
            .channel_phase_pct(100.0)
            .build()
            .unwrap();
        assert_eq!(p.feedback_pct(), 50.0);

        let err = ParameterSet::builder().mix_pct(101.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { param: "width", .. }));
    }

    #[test]
    fn test_reference_sizes() {
        let p = ParameterSet::default();
        assert_eq!(p.delay_len(44100.0), 90);
        assert_eq!(p.lfo_len(44100.0), 88200);
        assert_eq!(p.min_delay_samples(44100.0), 0);

        let p = ParameterSet::builder().delay_ms(1.0).depth_ms(0.0).build().unwrap();
        assert_eq!(p.delay_len(48000.0), 50);
        assert_eq!(p.min_delay_samples(48000.0), 48);
    }

    #[test]
    fn test_summary() {
        let summary = ParameterSet::default().to_string();
        assert!(summary.starts_with("parameters:\n"));
        assert!(summary.contains("depth = 2ms"));
        assert!(summary.contains("width = 71%"));
        assert!(summary.contains("speed = 0.5Hz"));
        assert!(summary.contains("shape = sine"));
        assert!(summary.ends_with("interp= linear"));
    }
}
