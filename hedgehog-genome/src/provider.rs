/// Read-only random access into a reference genome.
///
/// Coordinates are 0-based and half-open. Anything that cannot be served
/// exactly (unknown contig, negative start, end past the contig) yields
/// `None`; callers treat that as a length mismatch and skip the window.
pub trait SequenceProvider {
    /// Sequence of `chrom` over `[start, end)`, case preserved.
    fn sequence_from_coords(&self, chrom: &str, start: i64, end: i64) -> Option<String>;

    /// Length of `chrom`, if the genome has it.
    fn chrom_len(&self, chrom: &str) -> Option<u64>;

    /// Whether `[start, end)` lies fully inside `chrom`.
    fn coords_in_bounds(&self, chrom: &str, start: i64, end: i64) -> bool {
        match self.chrom_len(chrom) {
            Some(len) => start >= 0 && start <= end && end as u64 <= len,
            None => false,
        }
    }
}
