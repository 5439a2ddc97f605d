/// Default window length fed to the model.
pub const DEFAULT_SEQ_LEN: usize = 2048;

/// Base expected at the centre of a CpG-centric window.
pub const DEFAULT_ANCHOR_BASE: u8 = b'C';

/// Separator used in locus and variant identifiers.
pub const ID_SEPARATOR: char = '_';
