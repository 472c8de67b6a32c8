use super::Automaton;
use crate::Pos2;

/// Maps a cursor position in screen pixels to a grid cell
///
/// `cell = (cursor - bias).div_euclid(cell_size) + offset` on each axis. The
/// bias compensates for the edge rounding of the upscaled display, so a click
/// near a cell's border lands where the user expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMap {
    cell_size: i32,
    offset: Pos2,
    bias: Pos2,
}

impl ScreenMap {
    /// A `cell_size` below 1 is treated as 1
    pub fn new(cell_size: i32, offset: Pos2, bias: Pos2) -> Self {
        Self {
            cell_size: cell_size.max(1),
            offset,
            bias,
        }
    }

    #[inline]
    pub fn to_cell(&self, cursor: Pos2) -> Pos2 {
        let shifted = cursor - self.bias;
        Pos2 {
            x: shifted.x.div_euclid(self.cell_size),
            y: shifted.y.div_euclid(self.cell_size),
        } + self.offset
    }
}

/// A rectangular view over an engine's live cells
///
/// `top_left` is inclusive and `bottom_right` exclusive.
pub struct Window<'a, A: ?Sized> {
    tl: Pos2,
    br: Pos2,
    engine: &'a A,
}

impl<'a, A: Automaton + ?Sized> Window<'a, A> {
    pub fn new(engine: &'a A, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            engine,
        }
    }

    /// Live cells inside the window in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Pos2> + '_ {
        (self.tl.y..self.br.y)
            .flat_map(move |y| (self.tl.x..self.br.x).map(move |x| Pos2 { x, y }))
            .filter(move |&pos| self.engine.is_alive(pos))
    }
}

impl<A: Automaton + ?Sized> std::fmt::Display for Window<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in self.tl.y..self.br.y {
            if y != self.tl.y {
                writeln!(f)?;
            }
            for x in self.tl.x..self.br.x {
                let glyph = if self.engine.is_alive(Pos2 { x, y }) { '█' } else { ' ' };
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}
