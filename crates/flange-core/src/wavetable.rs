//! Periodic wave-table generation for LFO lookup tables.
//!
//! A wave table holds one full period of a unipolar waveform mapped onto
//! an arbitrary `[min, max]` range, starting at a given phase. Modulated
//! delay effects precompute the table once and index it per sample,
//! instead of evaluating `sin` in the audio path.
//!
//! The destination element type selects the sample format:
//!
//! | Element | Conversion |
//! |---------|------------|
//! | `f32`, `f64` | stored as computed |
//! | `i16`, `i32` | rounded half away from zero |

use core::f64::consts::PI;
use libm::sin;

/// Sweep waveform shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveShape {
    /// Smooth sinusoidal sweep.
    #[default]
    Sine,
    /// Linear up/down ramps.
    Triangle,
}

impl WaveShape {
    /// All shapes, in keyword order.
    pub const ALL: [WaveShape; 2] = [WaveShape::Sine, WaveShape::Triangle];

    /// Keyword used on command lines and in presets.
    pub const fn keyword(self) -> &'static str {
        match self {
            WaveShape::Sine => "sine",
            WaveShape::Triangle => "triangle",
        }
    }

    /// Unipolar value in `[0, 1]` at `point` of a table of `size` entries.
    #[inline]
    fn unipolar(self, point: usize, size: usize) -> f64 {
        match self {
            WaveShape::Sine => (sin(point as f64 / size as f64 * 2.0 * PI) + 1.0) / 2.0,
            WaveShape::Triangle => {
                let d = point as f64 * 2.0 / size as f64;
                match 4 * point / size {
                    0 => d + 0.5,
                    1 | 2 => 1.5 - d,
                    _ => d - 1.5,
                }
            }
        }
    }
}

impl core::fmt::Display for WaveShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Element type a wave table can be generated into.
pub trait WaveTableSample: Copy {
    /// Convert a computed table value into this format.
    fn from_wave(value: f64) -> Self;
}

impl WaveTableSample for f32 {
    #[inline]
    fn from_wave(value: f64) -> Self {
        value as f32
    }
}

impl WaveTableSample for f64 {
    #[inline]
    fn from_wave(value: f64) -> Self {
        value
    }
}

impl WaveTableSample for i16 {
    #[inline]
    fn from_wave(value: f64) -> Self {
        (value + if value < 0.0 { -0.5 } else { 0.5 }) as i16
    }
}

impl WaveTableSample for i32 {
    #[inline]
    fn from_wave(value: f64) -> Self {
        (value + if value < 0.0 { -0.5 } else { 0.5 }) as i32
    }
}

/// Fill `table` with one period of `shape` spanning `[min, max]`.
///
/// `phase` is the initial phase in radians. A sine at `3π/2` (or a
/// triangle at the same phase) starts at `min`.
///
/// # Example
///
/// ```rust
/// use flange_core::{WaveShape, generate_wave_table};
///
/// let mut table = [0.0f32; 8];
/// generate_wave_table(WaveShape::Triangle, &mut table, 0.0, 4.0, 0.0);
/// assert_eq!(table[0], 2.0);
/// assert_eq!(table[2], 4.0);
/// assert_eq!(table[6], 0.0);
/// ```
pub fn generate_wave_table<T: WaveTableSample>(
    shape: WaveShape,
    table: &mut [T],
    min: f64,
    max: f64,
    phase: f64,
) {
    let size = table.len();
    if size == 0 {
        return;
    }
    let phase_offset = (phase / PI / 2.0 * size as f64 + 0.5) as usize;

    for (t, slot) in table.iter_mut().enumerate() {
        let point = (t + phase_offset) % size;
        let d = shape.unipolar(point, size);
        *slot = T::from_wave(d * (max - min) + min);
    }
}

/// Source of LFO tables for modulated effects.
///
/// Effects receive their sweep curve through this seam so that tests and
/// hosts can substitute a different curve generator.
pub trait WaveTableGenerator {
    /// Fill `table` with one period of `shape` over `[min, max]`, starting
    /// at `phase` radians.
    fn generate(&self, shape: WaveShape, table: &mut [f32], min: f64, max: f64, phase: f64);
}

/// The built-in sine/triangle generator backed by [`generate_wave_table`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWaveTable;

impl WaveTableGenerator for StandardWaveTable {
    fn generate(&self, shape: WaveShape, table: &mut [f32], min: f64, max: f64, phase: f64) {
        generate_wave_table(shape, table, min, max, phase);
    }
}
