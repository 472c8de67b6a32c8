//! A continuous-kernel Life variant on a toroidal boolean field.
//!
//! Every cell measures two densities: `center`, the live fraction of its own
//! 3x3 block, and `near`, the live fraction of a disk of radius `R` with that
//! 3x3 block cut out. A cell is alive in the next generation when
//!
//! - `center >= 0.5` and `0.26 <= near <= 0.46`, or
//! - `center < 0.5` and `0.27 <= near <= 0.36`.
//!
//! When an update leaves the field unchanged, the field is reseeded at random.

use super::{Automaton, probability_or};
use crate::Pos2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::ops::RangeInclusive;

const CENTER_SPLIT: f64 = 0.5;
const NEAR_WHEN_FULL: RangeInclusive<f64> = 0.26..=0.46;
const NEAR_WHEN_SPARSE: RangeInclusive<f64> = 0.27..=0.36;

/// Construction parameters for [`SmoothLife`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothConfig {
    /// Radius of the outer disk. 10 to 12 stays lively, 5 grows mazes.
    pub radius: usize,
    /// Probability of a cell starting alive, also used when reseeding
    pub p_alive: f64,
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self {
            radius: 10,
            p_alive: 0.4,
        }
    }
}

/// The next state of a cell given its inner and outer live fractions
#[inline]
pub fn smooth_rule(center: f64, near: f64) -> bool {
    if center >= CENTER_SPLIT {
        NEAR_WHEN_FULL.contains(&near)
    } else {
        NEAR_WHEN_SPARSE.contains(&near)
    }
}

/// A convolution kernel whose taps all weigh 1
#[derive(Debug, Clone)]
pub struct Kernel {
    taps: Vec<(isize, isize)>,
}

impl Kernel {
    /// Every offset within `radius` of the origin, minus the 3x3 block around it
    pub fn ring(radius: usize) -> Self {
        let r = radius as isize;
        let taps = (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx * dx + dy * dy <= r * r)
            .filter(|&(dx, dy)| dx.abs() > 1 || dy.abs() > 1)
            .collect();
        Self { taps }
    }

    /// The 3x3 block around the origin, origin included
    pub fn block() -> Self {
        let taps = (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .collect();
        Self { taps }
    }

    #[inline]
    pub fn taps(&self) -> &[(isize, isize)] {
        &self.taps
    }

    /// Sum of all weights
    #[inline]
    pub fn sum(&self) -> usize {
        self.taps.len()
    }

    /// Live fraction of the kernel's footprint centered on `(x, y)`, wrapping at the edges
    fn density(&self, field: &[bool], width: usize, height: usize, x: usize, y: usize) -> f64 {
        let (w, h) = (width as isize, height as isize);
        let live = self
            .taps
            .iter()
            .filter(|&&(dx, dy)| {
                let nx = (x as isize + dx).rem_euclid(w) as usize;
                let ny = (y as isize + dy).rem_euclid(h) as usize;
                field[ny * width + nx]
            })
            .count();
        live as f64 / self.sum() as f64
    }
}

#[derive(Debug, Clone)]
pub struct SmoothLife {
    width: usize,
    height: usize,
    array: Vec<bool>,
    near: Vec<f64>,
    kouter: Kernel,
    kinner: Kernel,
    config: SmoothConfig,
    rng: StdRng,
    generation: usize,
    reseeds: usize,
}

impl SmoothLife {
    /// A randomly filled field
    pub fn new(width: usize, height: usize, config: SmoothConfig) -> Self {
        Self::seeded(width, height, config, rand::random())
    }

    /// A field filled from a deterministic random stream
    pub fn seeded(width: usize, height: usize, config: SmoothConfig, seed: u64) -> Self {
        let mut life = Self::from_array(width, height, vec![false; width * height], config, seed);
        life.reseed();
        life
    }

    /// Starts from a given row-major field; `seed` drives later reseeds
    ///
    /// The radius is raised to at least 2 so the outer ring is never empty, and
    /// `p_alive` is clamped to `[0, 1]`, with a non-finite value reset to the default.
    ///
    /// # Panics
    /// If either dimension is zero or `array` does not hold `width * height` cells.
    pub fn from_array(
        width: usize,
        height: usize,
        array: Vec<bool>,
        config: SmoothConfig,
        seed: u64,
    ) -> Self {
        assert!(width > 0 && height > 0, "field must not be empty");
        assert_eq!(array.len(), width * height, "field size mismatch");

        let config = SmoothConfig {
            radius: config.radius.max(2),
            p_alive: probability_or(config.p_alive, SmoothConfig::default().p_alive),
        };
        Self {
            width,
            height,
            array,
            near: vec![0.0; width * height],
            kouter: Kernel::ring(config.radius),
            kinner: Kernel::block(),
            config,
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            reseeds: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn config(&self) -> SmoothConfig {
        self.config
    }

    /// Row-major cell states
    #[inline]
    pub fn array(&self) -> &[bool] {
        &self.array
    }

    /// Row-major outer ring densities from the last update
    ///
    /// All zeros before the first [`SmoothLife::update`].
    #[inline]
    pub fn near(&self) -> &[f64] {
        &self.near
    }

    #[inline]
    pub fn kouter(&self) -> &Kernel {
        &self.kouter
    }

    /// How many times a stagnant field has been reseeded
    #[inline]
    pub fn reseeds(&self) -> usize {
        self.reseeds
    }

    fn reseed(&mut self) {
        let p = self.config.p_alive;
        for cell in self.array.iter_mut() {
            *cell = self.rng.random_bool(p);
        }
    }

    /// Advances one generation, reseeding the field if it stopped changing
    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        let array = &self.array;

        let kouter = &self.kouter;
        self.near
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, near) in row.iter_mut().enumerate() {
                    *near = kouter.density(array, width, height, x, y);
                }
            });

        let kinner = &self.kinner;
        let near = &self.near;
        let next: Vec<bool> = (0..width * height)
            .into_par_iter()
            .map(|i| {
                let center = kinner.density(array, width, height, i % width, i / width);
                smooth_rule(center, near[i])
            })
            .collect();

        self.generation += 1;
        if next == self.array {
            log::debug!(
                "field stagnated at generation {}, reseeding",
                self.generation
            );
            self.reseeds += 1;
            self.reseed();
        } else {
            self.array = next;
        }
    }
}

impl Automaton for SmoothLife {
    fn step(&mut self) {
        self.update()
    }
    fn generation(&self) -> usize {
        self.generation
    }
    fn alive_count(&self) -> usize {
        self.array.iter().filter(|&&alive| alive).count()
    }
    fn is_alive(&self, pos: Pos2) -> bool {
        let (x, y) = (pos.x as usize, pos.y as usize);
        pos.x >= 0 && pos.y >= 0 && x < self.width && y < self.height && self.array[y * self.width + x]
    }
    fn set_cell(&mut self, pos: Pos2, alive: bool) {
        let pos = pos.wrap(self.width as i32, self.height as i32);
        self.array[pos.y as usize * self.width + pos.x as usize] = alive;
    }
}
