use super::torus::count_neighbors;
use super::{Automaton, Rule, ScreenMap};
use crate::pattern::Pattern;
use crate::Pos2;
use rayon::prelude::*;

/// Pixel bias applied before mapping a cursor onto the dense grid
pub const DENSE_POKE_BIAS: Pos2 = Pos2::new(2, 4);

/// A fixed-size toroidal Game of Life grid
///
/// Alongside the cell states the grid keeps the neighbor count of every cell
/// from the most recent [`DenseLife::step`], for presentation layers that
/// color cells by crowding.
#[derive(Debug, Clone)]
pub struct DenseLife {
    width: usize,
    height: usize,
    grid: Vec<bool>,
    neighbor_counts: Vec<u8>,
    rule: Rule,
    generation: usize,
}

impl DenseLife {
    /// Creates a `width` x `height` Life grid seeded with `pattern`
    ///
    /// See [`DenseLife::with_rule`].
    pub fn new(width: usize, height: usize, pattern: &Pattern) -> Self {
        Self::with_rule(width, height, pattern, Rule::LIFE)
    }

    /// Creates a grid seeded with `pattern` anchored at `(width / 2, height / 2)`
    ///
    /// Offset patterns are added to the anchor, matrix patterns are centered on
    /// it. Cells that fall outside the grid wrap around. Until the first step,
    /// the neighbor counts mirror the seeded states.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn with_rule(width: usize, height: usize, pattern: &Pattern, rule: Rule) -> Self {
        assert!(width > 0 && height > 0, "grid must not be empty");

        let mut grid = vec![false; width * height];
        let anchor = Pos2::new((width / 2) as i32, (height / 2) as i32);
        for cell in pattern.cells_around(anchor) {
            let cell = cell.wrap(width as i32, height as i32);
            grid[cell.y as usize * width + cell.x as usize] = true;
        }
        let neighbor_counts = grid.iter().map(|&alive| u8::from(alive)).collect();

        Self {
            width,
            height,
            grid,
            neighbor_counts,
            rule,
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
    #[inline]
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Row-major cell states
    #[inline]
    pub fn grid(&self) -> &[bool] {
        &self.grid
    }

    /// Row-major neighbor counts from the last step
    #[inline]
    pub fn neighbor_counts(&self) -> &[u8] {
        &self.neighbor_counts
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// State of the cell at `(x, y)`, dead outside the grid
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.grid[self.index(x, y)]
    }

    /// Neighbor count slot of the cell at `(x, y)`, 0 outside the grid
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.neighbor_counts[self.index(x, y)]
        } else {
            0
        }
    }

    /// Live cells in row-major order
    pub fn alive_cells(&self) -> Vec<Pos2> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| Pos2::new((i % self.width) as i32, (i / self.width) as i32))
            .collect()
    }

    /// Advances one generation
    ///
    /// Neighbor counts are taken from the whole grid before any cell changes,
    /// then every cell is updated from its own previous state and that count.
    pub fn step(&mut self) {
        count_neighbors(&self.grid, self.width, self.height, &mut self.neighbor_counts);

        let rule = self.rule;
        self.grid
            .par_iter_mut()
            .zip(self.neighbor_counts.par_iter())
            .for_each(|(cell, &n)| *cell = rule.apply(*cell, n));
        self.generation += 1;
        log::trace!("dense generation {}", self.generation);
    }

    /// Sets the cell under a screen cursor
    ///
    /// The cursor is mapped with [`DENSE_POKE_BIAS`], `cell_size` pixels per
    /// cell and the view `offset` in cells, then wrapped onto the grid.
    pub fn poke(&mut self, cursor: Pos2, cell_size: i32, offset: Pos2, alive: bool) {
        let cell = ScreenMap::new(cell_size, offset, DENSE_POKE_BIAS).to_cell(cursor);
        self.set_cell(cell, alive);
    }

    /// Sets a cell directly, wrapping coordinates onto the grid
    ///
    /// The cell's neighbor count slot is overwritten with the new state (0 or
    /// 1) instead of a recomputed count. It stays that way until the next
    /// [`DenseLife::step`] recounts every cell.
    pub fn set_cell(&mut self, pos: Pos2, alive: bool) {
        let pos = pos.wrap(self.width as i32, self.height as i32);
        let i = self.index(pos.x as usize, pos.y as usize);
        self.grid[i] = alive;
        self.neighbor_counts[i] = u8::from(alive);
    }
}

impl Automaton for DenseLife {
    fn step(&mut self) {
        DenseLife::step(self)
    }
    fn generation(&self) -> usize {
        self.generation
    }
    fn alive_count(&self) -> usize {
        self.grid.iter().filter(|&&alive| alive).count()
    }
    fn is_alive(&self, pos: Pos2) -> bool {
        pos.x >= 0 && pos.y >= 0 && self.get(pos.x as usize, pos.y as usize)
    }
    fn set_cell(&mut self, pos: Pos2, alive: bool) {
        DenseLife::set_cell(self, pos, alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternMatrix;

    fn offsets(cells: &[(i32, i32)]) -> Pattern {
        Pattern::Offsets(cells.iter().map(|&(x, y)| Pos2::new(x, y)).collect())
    }

    fn pseudo_random_grid(width: usize, height: usize) -> DenseLife {
        let mut game = DenseLife::new(width, height, &Pattern::Offsets(Vec::new()));
        let mut state: u32 = 0x2545_f491;
        for y in 0..height {
            for x in 0..width {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                game.set_cell(Pos2::new(x as i32, y as i32), state % 3 == 0);
            }
        }
        game
    }

    #[test]
    fn offsets_are_anchored_at_midpoint() {
        let game = DenseLife::new(10, 7, &offsets(&[(0, 0), (-1, 2)]));

        assert_eq!(game.alive_cells(), vec![Pos2::new(5, 3), Pos2::new(4, 5)]);
    }

    #[test]
    fn matrix_is_centered() {
        let game = DenseLife::new(10, 10, &Pattern::r_pentomino());

        assert_eq!(
            game.alive_cells(),
            vec![
                Pos2::new(5, 4),
                Pos2::new(6, 4),
                Pos2::new(4, 5),
                Pos2::new(5, 5),
                Pos2::new(5, 6),
            ]
        );
    }

    #[test]
    fn neighbor_counts_match_toroidal_neighbors() {
        let (w, h) = (13, 9);
        let mut game = pseudo_random_grid(w, h);
        let before = game.grid().to_vec();

        game.step();

        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let expected = Pos2::new(x, y)
                    .neighbors()
                    .map(|p| p.wrap(w as i32, h as i32))
                    .filter(|p| before[p.y as usize * w + p.x as usize])
                    .count();
                assert_eq!(
                    game.neighbor_count(x as usize, y as usize) as usize,
                    expected,
                    "({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn step_applies_rule_to_snapshot() {
        let (w, h) = (11, 8);
        let mut game = pseudo_random_grid(w, h);
        let before = game.grid().to_vec();

        game.step();

        for i in 0..w * h {
            let expected = crate::engine::rule(before[i], game.neighbor_counts()[i]);
            assert_eq!(game.grid()[i], expected, "cell {i}");
        }
    }

    #[test]
    fn block_is_still() {
        let mut game = DenseLife::new(8, 8, &offsets(&[(0, 0), (1, 0), (0, 1), (1, 1)]));
        let start = game.alive_cells();

        for _ in 0..10 {
            game.step();
            assert_eq!(game.alive_cells(), start);
        }
    }

    #[test]
    fn blinker_has_period_two() {
        let mut game = DenseLife::new(9, 9, &offsets(&[(-1, 0), (0, 0), (1, 0)]));
        let start = game.alive_cells();

        game.step();
        assert_eq!(game.alive_cells(), vec![Pos2::new(4, 3), Pos2::new(4, 4), Pos2::new(4, 5)]);
        game.step();
        assert_eq!(game.alive_cells(), start);
        assert_eq!(game.generation(), 2);
    }

    #[test]
    fn glider_wraps_around_torus() {
        let glider = PatternMatrix::from_rows(&[[0u8, 1, 0], [0, 0, 1], [1, 1, 1]]);
        let mut game = DenseLife::new(8, 8, &Pattern::Matrix(glider));
        let start = game.alive_cells();

        // a glider moves one cell diagonally every 4 generations
        for _ in 0..4 * 8 {
            game.step();
        }

        assert_eq!(game.alive_cells(), start);
    }

    #[test]
    fn poke_maps_pixels_and_overwrites_count_slot() {
        let mut game = DenseLife::new(20, 20, &Pattern::Offsets(Vec::new()));

        game.poke(Pos2::new(2 + 5 * 3, 4 + 5 * 7), 5, Pos2::new(1, 1), true);

        assert!(game.get(4, 8));
        assert_eq!(game.neighbor_count(4, 8), 1);

        game.poke(Pos2::new(2 + 5 * 3, 4 + 5 * 7), 5, Pos2::new(1, 1), false);
        assert!(!game.get(4, 8));
        assert_eq!(game.neighbor_count(4, 8), 0);
    }

    #[test]
    fn poke_on_far_edge_wraps_to_zero() {
        let mut game = DenseLife::new(10, 6, &Pattern::Offsets(Vec::new()));

        game.poke(Pos2::new(2 + 10 * 4, 4 + 6 * 4), 4, Pos2::zero(), true);

        assert_eq!(game.alive_cells(), vec![Pos2::new(0, 0)]);
    }

    #[test]
    fn poke_far_outside_wraps_defensively() {
        let mut game = DenseLife::new(10, 6, &Pattern::Offsets(Vec::new()));

        game.poke(Pos2::new(0, 0), 4, Pos2::new(25, 13), true);

        // (-1 + 25, -1 + 13) wraps to (4, 0)
        assert_eq!(game.alive_cells(), vec![Pos2::new(4, 0)]);
    }

    #[test]
    fn seeded_counts_mirror_states() {
        let game = DenseLife::new(5, 5, &offsets(&[(0, 0)]));

        assert_eq!(game.neighbor_count(2, 2), 1);
        assert_eq!(game.neighbor_count(1, 2), 0);
    }
}
