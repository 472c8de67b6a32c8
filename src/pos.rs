use std::{
    cmp::Ordering,
    ops::{Add, Neg, Sub},
};

/// The 8 offsets of the Moore neighborhood, row by row
pub const MOORE: [Pos2; 8] = [
    Pos2 { x: -1, y: -1 },
    Pos2 { x: 0, y: -1 },
    Pos2 { x: 1, y: -1 },
    Pos2 { x: -1, y: 0 },
    Pos2 { x: 1, y: 0 },
    Pos2 { x: -1, y: 1 },
    Pos2 { x: 0, y: 1 },
    Pos2 { x: 1, y: 1 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos2 {
    pub x: i32,
    pub y: i32,
}
impl Pos2 {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// The 8 cells surrounding this one
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Pos2> {
        MOORE.into_iter().map(move |offset| self + offset)
    }

    /// This cell and its 8 neighbors, i.e. its full 3x3 footprint
    #[inline]
    pub fn footprint(self) -> impl Iterator<Item = Pos2> {
        std::iter::once(self).chain(self.neighbors())
    }

    /// Wraps both axes onto a `width` x `height` torus
    ///
    /// Negative values and values past the edge wrap around, so `width`
    /// maps to 0 and `-1` maps to `width - 1`.
    #[inline]
    pub fn wrap(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: y first, then x
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}
impl Neg for Pos2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Pos2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_folds_edges_onto_torus() {
        assert_eq!(Pos2::new(5, 3).wrap(5, 3), Pos2::new(0, 0));
        assert_eq!(Pos2::new(-1, -1).wrap(5, 3), Pos2::new(4, 2));
        assert_eq!(Pos2::new(12, 7).wrap(5, 3), Pos2::new(2, 1));
    }

    #[test]
    fn neighbors_exclude_self() {
        let center = Pos2::new(4, -2);
        let around: Vec<_> = center.neighbors().collect();

        assert_eq!(around.len(), 8);
        assert!(!around.contains(&center));
        assert_eq!(center.footprint().count(), 9);
    }

    #[test]
    fn ordering_is_row_major() {
        let mut cells = vec![Pos2::new(2, 1), Pos2::new(0, 1), Pos2::new(5, 0)];
        cells.sort();

        assert_eq!(cells, vec![Pos2::new(5, 0), Pos2::new(0, 1), Pos2::new(2, 1)]);
    }
}
