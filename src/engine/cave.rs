use super::torus::count_neighbors;
use super::{Automaton, probability_or};
use crate::Pos2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Number of smoothing passes that turns noise into caves
pub const CAVE_CYCLES: usize = 12;

/// Construction parameters for [`CaveGen`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaveConfig {
    /// Probability of a cell starting as wall
    pub density: f64,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self { density: 0.58 }
    }
}

/// Cave generator: a toroidal majority vote over the Moore neighborhood
///
/// Alive cells are walls. Each step a cell becomes wall iff more than 4 of its
/// 8 neighbors are walls, so noise settles into open caverns after a dozen
/// steps.
#[derive(Debug, Clone)]
pub struct CaveGen {
    width: usize,
    height: usize,
    array: Vec<bool>,
    neighbors: Vec<u8>,
    generation: usize,
}

impl CaveGen {
    pub fn new(width: usize, height: usize, config: CaveConfig) -> Self {
        Self::seeded(width, height, config, rand::random())
    }

    /// Random walls from a deterministic stream, with the outer ring forced to wall
    pub fn seeded(width: usize, height: usize, config: CaveConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let density = probability_or(config.density, CaveConfig::default().density);
        let array = (0..width * height).map(|_| rng.random_bool(density)).collect();
        Self::from_array(width, height, array)
    }

    /// Starts from a given row-major field, forcing the outer ring to wall
    ///
    /// # Panics
    /// If either dimension is zero or `array` does not hold `width * height` cells.
    pub fn from_array(width: usize, height: usize, mut array: Vec<bool>) -> Self {
        assert!(width > 0 && height > 0, "field must not be empty");
        assert_eq!(array.len(), width * height, "field size mismatch");

        for x in 0..width {
            array[x] = true;
            array[(height - 1) * width + x] = true;
        }
        for y in 0..height {
            array[y * width] = true;
            array[y * width + width - 1] = true;
        }

        Self {
            width,
            height,
            array,
            neighbors: vec![0; width * height],
            generation: 0,
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

    /// Row-major wall states
    #[inline]
    pub fn array(&self) -> &[bool] {
        &self.array
    }

    /// Row-major wall counts from the last step
    #[inline]
    pub fn neighbors(&self) -> &[u8] {
        &self.neighbors
    }

    pub fn step(&mut self) {
        count_neighbors(&self.array, self.width, self.height, &mut self.neighbors);
        self.array
            .par_iter_mut()
            .zip(self.neighbors.par_iter())
            .for_each(|(wall, &n)| *wall = n > 4);
        self.generation += 1;
    }
}

impl Automaton for CaveGen {
    fn step(&mut self) {
        CaveGen::step(self)
    }
    fn generation(&self) -> usize {
        self.generation
    }
    fn alive_count(&self) -> usize {
        self.array.iter().filter(|&&wall| wall).count()
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
