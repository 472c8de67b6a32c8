use super::PatternDecoder;
use crate::error::PatternError;
use crate::pattern::Pattern;
use crate::pos::Pos2;

/// Plain `x,y` rows, one signed offset per row and no header
///
/// Blank lines are skipped. Any other row that is not exactly two integers
/// fails the whole load, reporting its 1-based line number.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateList;

impl CoordinateList {
    fn parse_row(row: &str) -> Option<Pos2> {
        let mut fields = row.split(',').map(str::trim);
        let x = fields.next()?.parse().ok()?;
        let y = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Pos2 { x, y })
    }
}

impl PatternDecoder for CoordinateList {
    type Error = PatternError;

    fn decode(&self, text: &str) -> Result<Pattern, Self::Error> {
        let mut offsets = Vec::new();
        for (i, row) in text.lines().enumerate() {
            if row.trim().is_empty() {
                continue;
            }
            let offset = Self::parse_row(row).ok_or_else(|| PatternError::MalformedRow {
                line: i + 1,
                content: row.to_owned(),
            })?;
            offsets.push(offset);
        }

        // the rows describe a set of cells
        offsets.sort();
        offsets.dedup();
        Ok(Pattern::Offsets(offsets))
    }
}
