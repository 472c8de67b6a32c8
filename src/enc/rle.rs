use super::PatternDecoder;
use crate::error::DecodeError;
use crate::pattern::{Pattern, PatternMatrix};
use regex::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));
/// Largest bounding box a header may declare, in cells
pub const MAX_CELLS: usize = 1 << 26;

// a run is an optional count followed by any single non-digit tag
static RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d*)(\D)").expect("valid regex"));

/// Decoder for the Life RLE format
///
/// The header is every line up to and including the first line starting
/// with `x`, whose first two integers are the width and height. Every line
/// after it is concatenated into the run data:
///
/// ```text
/// data := run* '!'
/// run  := digits? ('b' | 'o' | '$')
/// ```
///
/// `b`/`o` write `count` dead/alive cells and advance the cursor, `$` moves
/// down `count` rows and back to column 0, `!` ends the pattern. Whitespace
/// inside the data is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthEncoded;

impl RunLengthEncoded {
    fn dimensions(header: &str) -> Result<(usize, usize), DecodeError> {
        let mut numbers = NUMBER.find_iter(header).map(|m| m.as_str().parse::<usize>());
        match (numbers.next(), numbers.next()) {
            (Some(Ok(width)), Some(Ok(height))) => Ok((width, height)),
            _ => Err(DecodeError::MissingDimensions {
                line: header.to_owned(),
            }),
        }
    }

    fn run_length(count: &str) -> Result<usize, DecodeError> {
        if count.is_empty() {
            return Ok(1);
        }
        count.parse().map_err(|_| DecodeError::InvalidCount {
            count: count.to_owned(),
        })
    }

    /// Decodes the text into its declared bounding-box matrix
    pub fn decode_matrix(&self, text: &str) -> Result<PatternMatrix, DecodeError> {
        let mut lines = text.lines();
        let header = lines
            .by_ref()
            .find(|line| line.starts_with('x'))
            .ok_or(DecodeError::MissingHeader)?;
        let (width, height) = Self::dimensions(header)?;
        if width.checked_mul(height).is_none_or(|cells| cells > MAX_CELLS) {
            return Err(DecodeError::TooLarge {
                width,
                height,
                max: MAX_CELLS,
            });
        }

        let data: String = lines
            .flat_map(str::chars)
            .filter(|c| !c.is_whitespace())
            .collect();

        let mut matrix = PatternMatrix::new(width, height);
        let (mut cx, mut cy) = (0usize, 0usize);
        let mut consumed = 0;
        for (whole, [count, tag]) in RUN.captures_iter(&data).map(|c| c.extract()) {
            consumed += whole.len();
            let run = Self::run_length(count)?;
            match tag {
                "b" | "o" => {
                    let state = u8::from(tag == "o");
                    if !matrix.fill_run(cx, cy, run, state) {
                        return Err(DecodeError::OutOfBounds {
                            x: cx.saturating_add(run - 1),
                            y: cy,
                            width,
                            height,
                        });
                    }
                    cx = cx.saturating_add(run);
                }
                "$" => {
                    cy = cy.saturating_add(run);
                    cx = 0;
                }
                "!" => return Ok(matrix),
                _ => {
                    return Err(DecodeError::UnknownTag {
                        tag: tag.chars().next().unwrap_or_default(),
                    });
                }
            }
        }

        // runs are matched back to back, so anything left over is a count without a tag
        match &data[consumed..] {
            "" => Err(DecodeError::MissingTerminator),
            rest => Err(DecodeError::DanglingCount {
                count: rest.to_owned(),
            }),
        }
    }
}

impl PatternDecoder for RunLengthEncoded {
    type Error = DecodeError;

    fn decode(&self, text: &str) -> Result<Pattern, Self::Error> {
        self.decode_matrix(text).map(Pattern::Matrix)
    }
}
