use super::locus::Locus;

///
/// Genome sequence of a fixed length centred on a locus. Never mutated once
/// fetched; substitutions produce new strings.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    locus: Locus,
    sequence: String,
}

impl Window {
    pub fn new(locus: Locus, sequence: String) -> Self {
        Window { locus, sequence }
    }

    pub fn locus(&self) -> &Locus {
        &self.locus
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// 0-based genome coordinate of offset 0.
    pub fn start(&self) -> i64 {
        self.locus.pos as i64 - (self.len() / 2) as i64
    }

    /// Upper-cased base at offset `len/2 - 1`, the CpG anchor.
    pub fn anchor_base(&self) -> Option<u8> {
        let mid = (self.len() / 2).checked_sub(1)?;
        self.sequence
            .as_bytes()
            .get(mid)
            .map(|b| b.to_ascii_uppercase())
    }

    pub fn contains_unknown(&self) -> bool {
        self.sequence.bytes().any(|b| b == b'N' || b == b'n')
    }
}
