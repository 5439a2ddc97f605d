use std::fmt::{self, Display};
use std::str::FromStr;

use crate::consts::ID_SEPARATOR;
use crate::errors::VariantParseError;

///
/// A variant near a locus: 1-based position plus reference and alternate
/// alleles. Alleles are kept as written; comparisons upper-case them.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
pub struct Variant {
    pub chrom: String,
    pub pos: u64,
    pub id: Option<String>,
    pub ref_allele: String,
    pub alt_allele: String,
}

impl Variant {
    pub fn ref_upper(&self) -> String {
        self.ref_allele.to_ascii_uppercase()
    }

    pub fn alt_upper(&self) -> String {
        self.alt_allele.to_ascii_uppercase()
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = ID_SEPARATOR;
        match &self.id {
            Some(id) => write!(
                f,
                "{}{sep}{}{sep}{}{sep}{}{sep}{}",
                self.chrom, self.pos, id, self.ref_allele, self.alt_allele
            ),
            None => write!(
                f,
                "{}{sep}{}{sep}{}{sep}{}",
                self.chrom, self.pos, self.ref_allele, self.alt_allele
            ),
        }
    }
}

impl FromStr for Variant {
    type Err = VariantParseError;

    ///
    /// Parse `chrom_pos_id_ref_alt` or `chrom_pos_ref_alt`. Any other number
    /// of fields is rejected outright.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(ID_SEPARATOR).collect();

        let (chrom, pos, id, ref_allele, alt_allele) = match fields.as_slice() {
            [c, p, vid, r, a] => (*c, *p, Some(*vid), *r, *a),
            [c, p, r, a] => (*c, *p, None, *r, *a),
            _ => return Err(VariantParseError::TokenCount(s.to_string(), fields.len())),
        };

        let pos = pos
            .parse::<u64>()
            .map_err(|_| VariantParseError::InvalidPosition(s.to_string()))?;

        if ref_allele.is_empty() || alt_allele.is_empty() {
            return Err(VariantParseError::EmptyAllele(s.to_string()));
        }

        Ok(Variant {
            chrom: chrom.to_string(),
            pos,
            id: id.map(str::to_string),
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
        })
    }
}
