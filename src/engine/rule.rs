/// The number of possible Moore neighbor counts, 0 through 8
const COUNTS: usize = 9;

/// Conway's rule: a live cell survives on 2 or 3 neighbors, a dead cell is born on 3
#[inline]
pub fn rule(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// An outer-totalistic birth/survival table over the Moore neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    birth: [bool; COUNTS],
    survive: [bool; COUNTS],
}

impl Rule {
    /// B3/S23
    pub const LIFE: Rule = Rule::from_counts(&[3], &[2, 3]);
    /// B3/S12348, grows maze-like corridors
    pub const MAZE: Rule = Rule::from_counts(&[3], &[1, 2, 3, 4, 8]);

    /// Builds a table from the neighbor counts that cause birth and survival
    ///
    /// Counts above 8 are ignored.
    pub const fn from_counts(birth: &[u8], survive: &[u8]) -> Self {
        Self {
            birth: Self::table(birth),
            survive: Self::table(survive),
        }
    }

    const fn table(counts: &[u8]) -> [bool; COUNTS] {
        let mut table = [false; COUNTS];
        let mut i = 0;
        while i < counts.len() {
            if (counts[i] as usize) < COUNTS {
                table[counts[i] as usize] = true;
            }
            i += 1;
        }
        table
    }

    /// Looks up a rule by its command line name
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "life" => Some(Self::LIFE),
            "maze" => Some(Self::MAZE),
            _ => None,
        }
    }

    /// The next state of a cell given its current state and live neighbor count
    #[inline]
    pub fn apply(&self, alive: bool, neighbors: u8) -> bool {
        let table = if alive { &self.survive } else { &self.birth };
        table.get(neighbors as usize).copied().unwrap_or(false)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::LIFE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_match_conway_life() {
        assert!(rule(true, 2));
        assert!(rule(true, 3));
        assert!(rule(false, 3));

        assert!(!rule(true, 0));
        assert!(!rule(true, 1));
        assert!(!rule(true, 4));
        assert!(!rule(false, 2));
        assert!(!rule(false, 4));
    }

    #[test]
    fn life_table_agrees_with_rule_fn() {
        for alive in [false, true] {
            for n in 0..=8 {
                assert_eq!(Rule::LIFE.apply(alive, n), rule(alive, n), "alive={alive} n={n}");
            }
        }
    }

    #[test]
    fn maze_survives_crowding() {
        for n in [1, 2, 3, 4, 8] {
            assert!(Rule::MAZE.apply(true, n), "survive on {n}");
        }
        for n in [0, 5, 6, 7] {
            assert!(!Rule::MAZE.apply(true, n), "die on {n}");
        }
        assert!(Rule::MAZE.apply(false, 3));
        assert!(!Rule::MAZE.apply(false, 4));
    }

    #[test]
    fn out_of_range_counts_are_dead() {
        assert!(!Rule::LIFE.apply(true, 9));
        assert_eq!(Rule::from_counts(&[3, 12], &[]), Rule::from_counts(&[3], &[]));
    }
}
