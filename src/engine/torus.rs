use rayon::prelude::*;

/// Counts, for every cell of a `width` x `height` torus, how many of its 8 neighbors are alive
///
/// This is the sum of the grid shifted by each of the 8 non-zero offsets in
/// `{-1, 0, 1}²` with wraparound on both axes. On grids narrower than 3 cells
/// a shifted copy can land on the cell itself, which is then counted like
/// any other neighbor.
///
/// `cells` and `counts` are row-major and must both hold `width * height` entries.
pub(crate) fn count_neighbors(cells: &[bool], width: usize, height: usize, counts: &mut [u8]) {
    debug_assert_eq!(cells.len(), width * height);
    debug_assert_eq!(counts.len(), width * height);

    counts
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let rows = [(y + height - 1) % height, y, (y + 1) % height];
            for (x, count) in row.iter_mut().enumerate() {
                let cols = [(x + width - 1) % width, x, (x + 1) % width];
                let mut n = 0;
                for (dy, &ny) in rows.iter().enumerate() {
                    for (dx, &nx) in cols.iter().enumerate() {
                        // (1, 1) is the unshifted grid
                        if (dx, dy) != (1, 1) && cells[ny * width + nx] {
                            n += 1;
                        }
                    }
                }
                *count = n;
            }
        });
}
