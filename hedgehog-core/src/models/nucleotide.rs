//! Watson-Crick pairing for the four unambiguous DNA bases.

const fn build_complement_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    table[b'A' as usize] = b'T';
    table[b'T' as usize] = b'A';
    table[b'C' as usize] = b'G';
    table[b'G' as usize] = b'C';
    table[b'a' as usize] = b'T';
    table[b't' as usize] = b'A';
    table[b'c' as usize] = b'G';
    table[b'g' as usize] = b'C';
    table
}

static COMPLEMENT: [u8; 256] = build_complement_table();

/// Complement of a base (A<->T, C<->G), case-insensitive, always upper-case.
///
/// Returns `None` for anything outside {A, C, G, T}, including `N`.
#[inline]
pub fn complementary_base(base: u8) -> Option<u8> {
    match COMPLEMENT[base as usize] {
        0 => None,
        b => Some(b),
    }
}

/// Complement of a single-base allele string. Multi-base or non-ACGT alleles
/// have no complement.
pub fn complementary_allele(allele: &str) -> Option<u8> {
    match allele.as_bytes() {
        [base] => complementary_base(*base),
        _ => None,
    }
}
