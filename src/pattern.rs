//! Seed patterns consumed once when an engine is constructed.

use crate::enc::{CoordinateList, PatternDecoder, RunLengthEncoded};
use crate::error::PatternError;
use crate::pos::Pos2;
use std::path::Path;

/// A dense `width` x `height` matrix of cell states, row-major
///
/// `(0, 0)` is the top-left of the pattern's bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatrix {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl PatternMatrix {
    /// An all-dead matrix
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Builds a matrix from rows of `0`/`1` values, one slice per `y`
    ///
    /// Short rows are padded with dead cells up to the longest row.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut matrix = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, &state) in row.as_ref().iter().enumerate() {
                matrix.cells[y * width + x] = u8::from(state != 0);
            }
        }
        matrix
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// State at `(x, y)`, dead outside the bounding box
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            0
        }
    }

    /// Writes a run of `len` cells starting at `(x, y)`, returning false if it overflows the row
    pub(crate) fn fill_run(&mut self, x: usize, y: usize, len: usize, state: u8) -> bool {
        if len == 0 {
            return true;
        }
        if y >= self.height || x.checked_add(len).is_none_or(|end| end > self.width) {
            return false;
        }
        let start = y * self.width + x;
        self.cells[start..start + len].fill(state);
        true
    }

    /// Positions of the live cells relative to the top-left corner
    pub fn alive(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state != 0)
            .map(move |(i, _)| Pos2::new((i % self.width) as i32, (i / self.width) as i32))
    }
}

/// An initial arrangement of live cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A bounding-box matrix, placed centered on the anchor
    Matrix(PatternMatrix),
    /// Offsets relative to the anchor
    Offsets(Vec<Pos2>),
}

impl Pattern {
    /// The R-pentomino, used whenever a pattern file cannot be decoded
    pub fn r_pentomino() -> Self {
        Self::Matrix(PatternMatrix::from_rows(&[[0u8, 1, 1], [1, 1, 0], [0, 1, 0]]))
    }

    /// Decodes RLE text, substituting [`Pattern::r_pentomino`] on any decode error
    pub fn from_rle_or_default(text: &str) -> Self {
        match RunLengthEncoded::default().decode(text) {
            Ok(pattern) => pattern,
            Err(err) => {
                log::debug!("falling back to the R-pentomino: {err}");
                Self::r_pentomino()
            }
        }
    }

    /// Reads a pattern file, choosing the decoder by extension
    ///
    /// `.rle` files fall back to the default pattern when they cannot be decoded,
    /// every other file is read as a coordinate list and fails on the first bad row.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_rle = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("rle"));

        if is_rle {
            Ok(Self::from_rle_or_default(&text))
        } else {
            CoordinateList.decode(&text)
        }
    }

    /// Number of live cells in the pattern
    pub fn len(&self) -> usize {
        match self {
            Self::Matrix(matrix) => matrix.alive().count(),
            Self::Offsets(offsets) => offsets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute positions of the live cells when the pattern is placed at `anchor`
    ///
    /// Offsets are added to the anchor directly. A matrix is centered on it,
    /// its top-left landing at `anchor - (width / 2, height / 2)`.
    pub fn cells_around(&self, anchor: Pos2) -> Vec<Pos2> {
        match self {
            Self::Offsets(offsets) => offsets.iter().map(|&d| anchor + d).collect(),
            Self::Matrix(matrix) => {
                let top_left = anchor
                    - Pos2::new((matrix.width() / 2) as i32, (matrix.height() / 2) as i32);
                matrix.alive().map(|p| top_left + p).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_pentomino_has_five_cells() {
        let pattern = Pattern::r_pentomino();

        assert_eq!(pattern.len(), 5);
        let Pattern::Matrix(matrix) = pattern else {
            panic!("expected a matrix");
        };
        assert_eq!((matrix.width(), matrix.height()), (3, 3));
        assert_eq!(matrix.get(1, 0), 1);
        assert_eq!(matrix.get(0, 0), 0);
    }

    #[test]
    fn matrix_is_centered_on_anchor() {
        let pattern = Pattern::Matrix(PatternMatrix::from_rows(&[[1u8, 0, 0], [0, 0, 0], [0, 0, 1]]));

        let cells = pattern.cells_around(Pos2::new(10, 20));

        assert_eq!(cells, vec![Pos2::new(9, 19), Pos2::new(11, 21)]);
    }

    #[test]
    fn offsets_are_relative_to_anchor() {
        let pattern = Pattern::Offsets(vec![Pos2::new(-1, 0), Pos2::new(2, -3)]);

        let cells = pattern.cells_around(Pos2::new(5, 5));

        assert_eq!(cells, vec![Pos2::new(4, 5), Pos2::new(7, 2)]);
    }

    #[test]
    fn undecodable_rle_falls_back() {
        let pattern = Pattern::from_rle_or_default("#C no header here\n3o$!");

        assert_eq!(pattern, Pattern::r_pentomino());
    }

    #[test]
    fn oversized_rle_falls_back() {
        let pattern = Pattern::from_rle_or_default("x = 3000000000, y = 3000000000\n!");

        assert_eq!(pattern, Pattern::r_pentomino());
    }

    fn scratch_file(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("lifegrid-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[test]
    fn load_picks_decoder_by_extension() {
        let rle = scratch_file("block.RLE", "x = 2, y = 2\n2o$2o!");
        let csv = scratch_file("pair.csv", "0,0\n-1,2\n");

        let block = Pattern::load(&rle).expect("rle loads");
        let pair = Pattern::load(&csv).expect("csv loads");

        assert_eq!(block, Pattern::Matrix(PatternMatrix::from_rows(&[[1u8; 2]; 2])));
        assert_eq!(pair.len(), 2);
        assert!(matches!(pair, Pattern::Offsets(_)));
    }

    #[test]
    fn bad_rle_file_falls_back_but_bad_csv_fails() {
        let rle = scratch_file("broken.rle", "#C no header\n3o!");
        let csv = scratch_file("broken.csv", "0,0\nnot,a,row\n");

        assert_eq!(Pattern::load(&rle).expect("rle falls back"), Pattern::r_pentomino());
        assert!(matches!(
            Pattern::load(&csv),
            Err(PatternError::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("lifegrid-does-not-exist.rle");

        assert!(matches!(Pattern::load(&path), Err(PatternError::Io(_))));
    }

    #[test]
    fn fill_run_rejects_overflow() {
        let mut matrix = PatternMatrix::new(3, 2);

        assert!(matrix.fill_run(1, 1, 2, 1));
        assert!(!matrix.fill_run(2, 1, 2, 1));
        assert!(!matrix.fill_run(0, 2, 1, 1));
        assert_eq!(matrix.alive().collect::<Vec<_>>(), vec![Pos2::new(1, 1), Pos2::new(2, 1)]);
    }
}
