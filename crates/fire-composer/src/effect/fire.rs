//! Classic fire effect
//!
//! A one-dimensional heat simulation: every frame each cell cools a little,
//! heat drifts towards the start of the strip while blurring with its
//! neighbours, and new sparks are injected near the end ("the kernel").
//! The heat of each cell is then mapped through [`heat_color`].

use fastrand::Rng;

use super::EffectImpl;
use crate::color::{Rgb, add_colors, heat_color};

/// Weights of the drift/diffuse step (self, +1, +2, +3)
const BLEND_SELF: u16 = 2;
const BLEND_NEIGHBOR_1: u16 = 3;
const BLEND_NEIGHBOR_2: u16 = 2;
const BLEND_NEIGHBOR_3: u16 = 1;
const BLEND_TOTAL: u16 = BLEND_SELF + BLEND_NEIGHBOR_1 + BLEND_NEIGHBOR_2 + BLEND_NEIGHBOR_3;

/// Heat added by a single spark, before 8-bit wrap-around
const SPARK_HEAT_MIN: u8 = 160;
const SPARK_HEAT_MAX: u8 = 255;

/// Fire simulation tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireConfig {
    /// How quickly cells lose heat
    pub cooling: u8,
    /// Chance (out of 255) that each spark attempt ignites
    pub sparking: u8,
    /// Spark attempts per frame
    pub sparks: u8,
    /// Depth of the kernel, in cells, where sparks may land
    pub spark_height: u8,
    /// Draw the kernel at the start of the strip instead of the end
    pub reversed: bool,
    /// Simulate half the strip and mirror it onto the other half
    pub mirrored: bool,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            cooling: 80,
            sparking: 50,
            sparks: 3,
            spark_height: 4,
            reversed: true,
            mirrored: true,
        }
    }
}

/// Fire effect over a strip of `N` LEDs
#[derive(Clone)]
pub struct FireEffect<const N: usize> {
    config: FireConfig,
    /// Number of simulated cells (half of `N` when mirrored)
    size: usize,
    heat: [u8; N],
    seed: u64,
    rng: Rng,
}

impl<const N: usize> FireEffect<N> {
    /// Create a new fire effect
    ///
    /// The same `seed` always produces the same sequence of frames.
    pub fn new(config: FireConfig, seed: u64) -> Self {
        let size = if config.mirrored { N / 2 } else { N };
        Self {
            config,
            size,
            heat: [0; N],
            seed,
            rng: Rng::with_seed(seed),
        }
    }

    /// Number of cells the simulation runs on
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Current heat of each simulated cell
    pub fn heat(&self) -> &[u8] {
        &self.heat[..self.size]
    }

    fn cool(&mut self) {
        let max_cooling = (usize::from(self.config.cooling) * 10) / self.size + 2;
        for cell in &mut self.heat[..self.size] {
            let amount = self.rng.usize(0..max_cooling);
            *cell = cell.saturating_sub(u8::try_from(amount).unwrap_or(u8::MAX));
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn drift(&mut self) {
        let size = self.size;
        // In place and in index order: cell i already sees the updated i-1.
        for i in 0..size {
            let at = |offset: usize| u16::from(self.heat[(i + offset) % size]);
            let blended = (at(0) * BLEND_SELF
                + at(1) * BLEND_NEIGHBOR_1
                + at(2) * BLEND_NEIGHBOR_2
                + at(3) * BLEND_NEIGHBOR_3)
                / BLEND_TOTAL;
            self.heat[i] = blended as u8;
        }
    }

    fn ignite(&mut self) {
        let height = usize::from(self.config.spark_height).clamp(1, self.size);
        for _ in 0..self.config.sparks {
            if self.rng.u8(0..255) < self.config.sparking {
                let y = self.size - 1 - self.rng.usize(0..height);
                // Rolling over is part of the look: a hot cell can flash dark.
                self.heat[y] = self.heat[y].wrapping_add(self.rng.u8(SPARK_HEAT_MIN..SPARK_HEAT_MAX));
            }
        }
    }

    fn colorize(&self, frame: &mut [Rgb; N]) {
        let size = self.size;
        for (i, &heat) in self.heat[..size].iter().enumerate() {
            let color = heat_color(heat);
            let j = if self.config.reversed { size - 1 - i } else { i };
            draw_pixel(frame, j, color);
            if self.config.mirrored {
                let j2 = if self.config.reversed {
                    size + i
                } else {
                    2 * size - 1 - i
                };
                draw_pixel(frame, j2, color);
            }
        }
    }
}

fn draw_pixel<const N: usize>(frame: &mut [Rgb; N], index: usize, color: Rgb) {
    if let Some(pixel) = frame.get_mut(index) {
        *pixel = add_colors(*pixel, color);
    }
}

impl<const N: usize> EffectImpl<N> for FireEffect<N> {
    fn render(&mut self, frame: &mut [Rgb; N]) {
        if self.size == 0 {
            return;
        }

        self.cool();
        self.drift();
        self.ignite();
        self.colorize(frame);
    }

    fn reset(&mut self) {
        self.heat = [0; N];
        self.rng = Rng::with_seed(self.seed);
    }
}
