use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum VariantParseError {
    #[error("Variant string '{0}' has {1} fields, expected 4 or 5")]
    TokenCount(String, usize),

    #[error("Invalid variant position in '{0}'")]
    InvalidPosition(String),

    #[error("Empty allele in variant '{0}'")]
    EmptyAllele(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum LocusParseError {
    #[error("Locus '{0}' is not of the form chrom_pos")]
    MissingSeparator(String),

    #[error("Invalid locus position in '{0}'")]
    InvalidPosition(String),
}
