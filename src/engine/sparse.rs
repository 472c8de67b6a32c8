use super::{Automaton, Rule, ScreenMap};
use crate::pattern::Pattern;
use crate::Pos2;
use rayon::prelude::*;
use std::collections::HashSet;

/// Pixel bias applied before mapping a cursor onto the sparse grid
pub const SPARSE_POKE_BIAS: Pos2 = Pos2::new(3, 4);

/// An unbounded Game of Life grid that stores only its live cells
///
/// A cell is alive exactly when its coordinate is in the set; dead cells are
/// never stored. Each step only evaluates live cells and their neighbors.
#[derive(Debug, Clone, Default)]
pub struct SparseLife {
    alive: HashSet<Pos2>,
    rule: Rule,
    generation: usize,
}

impl SparseLife {
    /// Places `pattern` at `anchor` under Conway's rule
    pub fn new(anchor: Pos2, pattern: &Pattern) -> Self {
        Self::with_rule(anchor, pattern, Rule::LIFE)
    }

    pub fn with_rule(anchor: Pos2, pattern: &Pattern, rule: Rule) -> Self {
        Self {
            alive: pattern.cells_around(anchor).into_iter().collect(),
            rule,
            generation: 0,
        }
    }

    #[inline]
    pub fn from_alive<I: IntoIterator<Item = Pos2>>(alive: I) -> Self {
        Self {
            alive: alive.into_iter().collect(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// 1 if the cell is alive, 0 otherwise
    #[inline]
    fn state(&self, pos: Pos2) -> u8 {
        u8::from(self.alive.contains(&pos))
    }

    #[inline]
    fn live_neighbors(&self, pos: Pos2) -> u8 {
        pos.neighbors().map(|p| self.state(p)).sum()
    }

    /// Every cell that can change this step: live cells and their neighbors
    fn candidates(&self) -> HashSet<Pos2> {
        self.alive.iter().flat_map(|&p| p.footprint()).collect()
    }

    #[inline]
    pub fn contains(&self, pos: Pos2) -> bool {
        self.alive.contains(&pos)
    }

    /// Live cells in arbitrary order
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = &Pos2> {
        self.alive.iter()
    }

    /// Live cells in row-major order
    pub fn alive_cells(&self) -> Vec<Pos2> {
        let mut cells: Vec<_> = self.alive.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Advances one generation
    ///
    /// Births and deaths are collected over all candidates first and only
    /// applied once every candidate has been evaluated.
    pub fn step(&mut self) {
        let rule = self.rule;
        let (live, dead): (Vec<Pos2>, Vec<Pos2>) = self
            .candidates()
            .into_par_iter()
            .filter_map(|cell| {
                let was = self.alive.contains(&cell);
                let next = rule.apply(was, self.live_neighbors(cell));
                (was != next).then_some((cell, next))
            })
            .partition_map(|(cell, next)| {
                if next {
                    rayon::iter::Either::Left(cell)
                } else {
                    rayon::iter::Either::Right(cell)
                }
            });

        for cell in &dead {
            self.alive.remove(cell);
        }
        self.alive.extend(live);
        self.generation += 1;
        log::trace!(
            "sparse generation {}: {} alive, {} died",
            self.generation,
            self.alive.len(),
            dead.len()
        );
    }

    /// Sets the cell under a screen cursor
    ///
    /// The cursor is mapped with [`SPARSE_POKE_BIAS`], `cell_size` pixels per
    /// cell and the view `offset` in cells. The domain is unbounded, so no
    /// wrapping happens.
    pub fn poke(&mut self, cursor: Pos2, cell_size: i32, offset: Pos2, alive: bool) {
        let cell = ScreenMap::new(cell_size, offset, SPARSE_POKE_BIAS).to_cell(cursor);
        self.set_cell(cell, alive);
    }

    pub fn set_cell(&mut self, pos: Pos2, alive: bool) {
        if alive {
            self.alive.insert(pos);
        } else {
            self.alive.remove(&pos);
        }
    }
}

impl Automaton for SparseLife {
    fn step(&mut self) {
        SparseLife::step(self)
    }
    fn generation(&self) -> usize {
        self.generation
    }
    fn alive_count(&self) -> usize {
        self.alive.len()
    }
    fn is_alive(&self, pos: Pos2) -> bool {
        self.contains(pos)
    }
    fn set_cell(&mut self, pos: Pos2, alive: bool) {
        SparseLife::set_cell(self, pos, alive)
    }
}
