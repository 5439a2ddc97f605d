use std::fmt::{self, Display};
use std::str::FromStr;

use crate::consts::ID_SEPARATOR;
use crate::errors::LocusParseError;

///
/// A candidate CpG site. Windows are centred on `pos`: a window of length `L`
/// spans the half-open genome range `[pos - L/2, pos + L/2)`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
pub struct Locus {
    pub chrom: String,
    pub pos: u64,
}

impl Locus {
    pub fn new(chrom: impl Into<String>, pos: u64) -> Self {
        Locus {
            chrom: chrom.into(),
            pos,
        }
    }

    ///
    /// Genome coordinates `(start, end)` of the window of length `seq_len`
    /// centred on this locus. `start` may be negative near contig starts.
    ///
    pub fn window_bounds(&self, seq_len: usize) -> (i64, i64) {
        let half = (seq_len / 2) as i64;
        let pos = self.pos as i64;
        (pos - half, pos + half)
    }
}

impl Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.chrom, ID_SEPARATOR, self.pos)
    }
}

impl FromStr for Locus {
    type Err = LocusParseError;

    /// Parse `chrom_pos`, splitting on the last separator so contig names
    /// containing underscores survive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chrom, pos) = s
            .trim()
            .rsplit_once(ID_SEPARATOR)
            .ok_or_else(|| LocusParseError::MissingSeparator(s.to_string()))?;

        if chrom.is_empty() {
            return Err(LocusParseError::MissingSeparator(s.to_string()));
        }

        let pos = pos
            .parse::<u64>()
            .map_err(|_| LocusParseError::InvalidPosition(s.to_string()))?;

        Ok(Locus::new(chrom, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parse_and_display() {
        let locus: Locus = "chr1_10500".parse().unwrap();
        assert_eq!(locus, Locus::new("chr1", 10500));
        assert_eq!(locus.to_string(), "chr1_10500");
    }

    #[rstest]
    fn test_parse_contig_with_underscore() {
        let locus: Locus = "chrUn_gl000220_1200".parse().unwrap();
        assert_eq!(locus.chrom, "chrUn_gl000220");
        assert_eq!(locus.pos, 1200);
    }

    #[rstest]
    #[case("chr1")]
    #[case("_100")]
    fn test_missing_separator(#[case] input: &str) {
        assert_eq!(
            input.parse::<Locus>(),
            Err(LocusParseError::MissingSeparator(input.to_string()))
        );
    }

    #[rstest]
    fn test_invalid_position() {
        assert!(matches!(
            "chr1_ten".parse::<Locus>(),
            Err(LocusParseError::InvalidPosition(_))
        ));
    }

    #[rstest]
    fn test_window_bounds() {
        let locus = Locus::new("chr1", 500);
        assert_eq!(locus.window_bounds(2048), (-524, 1524));
        assert_eq!(locus.window_bounds(20), (490, 510));
    }
}
