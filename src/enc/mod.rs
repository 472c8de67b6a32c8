//! Text pattern decoders.

mod csv;
mod rle;

pub use self::csv::CoordinateList;
pub use self::rle::RunLengthEncoded;

use crate::pattern::Pattern;

pub trait PatternDecoder {
    type Error;

    fn decode(&self, text: &str) -> Result<Pattern, Self::Error>;
}
