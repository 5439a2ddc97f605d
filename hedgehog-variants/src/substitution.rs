//! Resolving a variant against a genome window.
//!
//! Works on the window string directly: the observed base at the variant's
//! offset decides which of the four orientations applies, and the missing
//! member of the (reference, alternate) pair is produced by a single-base
//! substitution.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

use hedgehog_core::models::nucleotide::complementary_allele;
use hedgehog_core::{Variant, Window};

/// How the observed window base relates to the variant's stated alleles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseLabel {
    Match,
    Swap,
    Complement,
    ComplementSwap,
    NoMatch,
}

impl CaseLabel {
    pub const ALL: [CaseLabel; 5] = [
        CaseLabel::Match,
        CaseLabel::Swap,
        CaseLabel::Complement,
        CaseLabel::ComplementSwap,
        CaseLabel::NoMatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseLabel::Match => "match",
            CaseLabel::Swap => "swap",
            CaseLabel::Complement => "complement",
            CaseLabel::ComplementSwap => "complement_swap",
            CaseLabel::NoMatch => "nomatch",
        }
    }
}

impl Display for CaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("Unknown substitution case: {}", s))
    }
}

/// Which member of the output pair a post-condition refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairMember {
    Reference,
    Alternate,
}

impl Display for PairMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairMember::Reference => write!(f, "ref"),
            PairMember::Alternate => write!(f, "alt"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SubstitutionError {
    #[error("Variant {variant} falls outside the window (offset {sub_pos}, window length {len})")]
    OutOfWindow {
        variant: String,
        sub_pos: i64,
        len: usize,
    },

    #[error("Variant {variant} needs a single-base {member} allele to substitute, got '{allele}'")]
    UnsupportedAllele {
        variant: String,
        member: PairMember,
        allele: String,
    },

    #[error("Variant {variant} has identical reference and alternate alleles")]
    IdenticalAlleles { variant: String },

    #[error(
        "{member} sequence check failed for '{case}' at offset {offset}: expected '{expected}', found '{observed}'"
    )]
    PostCondition {
        case: CaseLabel,
        member: PairMember,
        offset: usize,
        expected: char,
        observed: char,
    },
}

/// Output of the resolver. Both sequences are present for every case except
/// [`CaseLabel::NoMatch`], where both are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub reference: Option<String>,
    pub alternate: Option<String>,
    pub case: CaseLabel,
    pub offset: usize,
}

impl Substitution {
    pub fn is_match(&self) -> bool {
        self.case != CaseLabel::NoMatch
    }
}

/// Zero-based offset of `vpos` (1-based) in a window of length `len`
/// centred on `spos`.
pub fn substitution_offset(len: usize, spos: u64, vpos: u64) -> i64 {
    vpos as i64 - (spos as i64 - (len / 2) as i64) - 1
}

fn is_nucleotide(base: u8) -> bool {
    matches!(base.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'N')
}

fn single_base(
    allele: &str,
    member: PairMember,
    variant: &Variant,
) -> Result<u8, SubstitutionError> {
    match allele.as_bytes() {
        [b] if is_nucleotide(*b) => Ok(b.to_ascii_uppercase()),
        _ => Err(SubstitutionError::UnsupportedAllele {
            variant: variant.to_string(),
            member,
            allele: allele.to_string(),
        }),
    }
}

fn replace_base(seq: &str, offset: usize, base: u8) -> String {
    let mut bytes = seq.as_bytes().to_vec();
    bytes[offset] = base;
    String::from_utf8_lossy(&bytes).into_owned()
}

fn check_base(
    seq: &str,
    offset: usize,
    expected: u8,
    case: CaseLabel,
    member: PairMember,
) -> Result<(), SubstitutionError> {
    let observed = seq.as_bytes()[offset].to_ascii_uppercase();
    if observed != expected {
        return Err(SubstitutionError::PostCondition {
            case,
            member,
            offset,
            expected: expected as char,
            observed: observed as char,
        });
    }
    Ok(())
}

///
/// Derive the oriented (reference, alternate) pair for `variant` from a
/// window `seq` centred on `spos`.
///
/// The observed base is compared, case-insensitively and in this order,
/// against the reference allele, the alternate allele, the complement of
/// the reference and the complement of the alternate. The first hit decides
/// the case. After substituting, both produced sequences are checked to
/// carry the expected alleles at the offset; a failed check means the
/// coordinates or strand handling upstream are wrong.
///
/// # Arguments
/// - seq: window sequence, case preserved
/// - spos: position the window is centred on
/// - variant: the variant to resolve (1-based position)
///
pub fn substitute(
    seq: &str,
    spos: u64,
    variant: &Variant,
) -> Result<Substitution, SubstitutionError> {
    let len = seq.len();
    let sub_pos = substitution_offset(len, spos, variant.pos);
    if sub_pos < 0 || sub_pos as usize >= len {
        return Err(SubstitutionError::OutOfWindow {
            variant: variant.to_string(),
            sub_pos,
            len,
        });
    }
    let offset = sub_pos as usize;

    let observed = seq.as_bytes()[offset].to_ascii_uppercase();
    let vref = variant.ref_upper();
    let valt = variant.alt_upper();
    if vref == valt {
        return Err(SubstitutionError::IdenticalAlleles {
            variant: variant.to_string(),
        });
    }
    let is = |allele: &str| allele.as_bytes() == [observed];

    let case = if is(&vref) {
        CaseLabel::Match
    } else if is(&valt) {
        CaseLabel::Swap
    } else if complementary_allele(&vref) == Some(observed) {
        CaseLabel::Complement
    } else if complementary_allele(&valt) == Some(observed) {
        CaseLabel::ComplementSwap
    } else {
        return Ok(Substitution {
            reference: None,
            alternate: None,
            case: CaseLabel::NoMatch,
            offset,
        });
    };

    // expected bases at the offset for each member of the pair
    let (ref_base, alt_base) = match case {
        CaseLabel::Match | CaseLabel::Swap => (
            single_base(&vref, PairMember::Reference, variant)?,
            single_base(&valt, PairMember::Alternate, variant)?,
        ),
        _ => (
            complementary_allele(&vref).ok_or_else(|| SubstitutionError::UnsupportedAllele {
                variant: variant.to_string(),
                member: PairMember::Reference,
                allele: vref.clone(),
            })?,
            complementary_allele(&valt).ok_or_else(|| SubstitutionError::UnsupportedAllele {
                variant: variant.to_string(),
                member: PairMember::Alternate,
                allele: valt.clone(),
            })?,
        ),
    };

    let (reference, alternate) = match case {
        CaseLabel::Match | CaseLabel::Complement => {
            (seq.to_string(), replace_base(seq, offset, alt_base))
        }
        _ => (replace_base(seq, offset, ref_base), seq.to_string()),
    };

    check_base(&reference, offset, ref_base, case, PairMember::Reference)?;
    check_base(&alternate, offset, alt_base, case, PairMember::Alternate)?;

    Ok(Substitution {
        reference: Some(reference),
        alternate: Some(alternate),
        case,
        offset,
    })
}

/// Running tally of resolver outcomes across a batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MismatchCounter {
    counts: BTreeMap<CaseLabel, usize>,
    total: usize,
}

impl MismatchCounter {
    pub fn record(&mut self, case: CaseLabel) {
        *self.counts.entry(case).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, case: CaseLabel) -> usize {
        self.counts.get(&case).copied().unwrap_or(0)
    }

    /// Share of resolved variants that were `nomatch`; `0.0` for an empty batch.
    pub fn nomatch_proportion(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(CaseLabel::NoMatch) as f64 / self.total as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = (CaseLabel, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

impl Display for MismatchCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(label, n)| format!("{}={}", label, n))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// [`substitute`] over windows, keeping a [`MismatchCounter`] as it goes.
#[derive(Debug, Default)]
pub struct SubstitutionResolver {
    counter: MismatchCounter,
}

impl SubstitutionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        window: &Window,
        variant: &Variant,
    ) -> Result<Substitution, SubstitutionError> {
        let result = substitute(window.sequence(), window.locus().pos, variant)?;
        self.counter.record(result.case);
        Ok(result)
    }

    pub fn counter(&self) -> &MismatchCounter {
        &self.counter
    }

    pub fn into_counter(self) -> MismatchCounter {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hedgehog_core::{Locus, complementary_base};
    use pretty_assertions::assert_eq;
    use rstest::*;

    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

    // 20bp window centred on 100: offset 0 is genome position 91 (1-based),
    // so offset k holds the base at 1-based position 91 + k.
    const SPOS: u64 = 100;

    fn variant(pos: u64, r: &str, a: &str) -> Variant {
        Variant {
            chrom: "chr1".to_string(),
            pos,
            id: None,
            ref_allele: r.to_string(),
            alt_allele: a.to_string(),
        }
    }

    fn window_with(offset: usize, base: u8) -> String {
        let mut bytes = b"ttggaaccAACGTaaccggt".to_vec();
        bytes[offset] = base;
        String::from_utf8(bytes).unwrap()
    }

    fn differing_positions(a: &str, b: &str) -> Vec<usize> {
        a.bytes()
            .zip(b.bytes())
            .enumerate()
            .filter(|(_, (x, y))| x != y)
            .map(|(i, _)| i)
            .collect()
    }

    #[rstest]
    fn test_offset_formula() {
        assert_eq!(substitution_offset(20, SPOS, 91), 0);
        assert_eq!(substitution_offset(20, SPOS, 101), 10);
        assert_eq!(substitution_offset(2048, 5000, 5000 - 1024), -1);
    }

    #[rstest]
    fn test_match_example() {
        let seq = "ttggaaccAACGTaaccggt";
        let v = variant(101, "C", "T");
        let result = substitute(seq, SPOS, &v).unwrap();

        assert_eq!(result.case, CaseLabel::Match);
        assert_eq!(result.offset, 10);
        assert_eq!(result.reference.as_deref(), Some(seq));
        assert_eq!(result.alternate.as_deref(), Some("ttggaaccAATGTaaccggt"));
    }

    #[rstest]
    fn test_swap_example() {
        let seq = window_with(10, b'G');
        let v = variant(101, "C", "G");
        let result = substitute(&seq, SPOS, &v).unwrap();

        assert_eq!(result.case, CaseLabel::Swap);
        assert_eq!(result.alternate.as_deref(), Some(seq.as_str()));
        assert_eq!(result.reference.unwrap().as_bytes()[10], b'C');
    }

    #[rstest]
    fn test_complement_example() {
        let seq = window_with(10, b'T');
        let v = variant(101, "A", "G");
        let result = substitute(&seq, SPOS, &v).unwrap();

        assert_eq!(result.case, CaseLabel::Complement);
        assert_eq!(result.reference.as_deref(), Some(seq.as_str()));
        assert_eq!(result.alternate.unwrap().as_bytes()[10], b'C');
    }

    #[rstest]
    fn test_complement_swap_example() {
        // observed A, ref C, alt T: window holds comp(alt)
        let seq = window_with(10, b'A');
        let v = variant(101, "C", "T");
        let result = substitute(&seq, SPOS, &v).unwrap();

        assert_eq!(result.case, CaseLabel::ComplementSwap);
        assert_eq!(result.alternate.as_deref(), Some(seq.as_str()));
        assert_eq!(result.reference.unwrap().as_bytes()[10], b'G');
    }

    #[rstest]
    fn test_case_insensitive_observed_and_alleles() {
        let seq = window_with(3, b'g');
        let v = variant(94, "g", "a");
        let result = substitute(&seq, SPOS, &v).unwrap();

        assert_eq!(result.case, CaseLabel::Match);
        assert_eq!(result.alternate.unwrap().as_bytes()[3], b'A');
    }

    #[rstest]
    fn test_nomatch_has_no_sequences() {
        let seq = window_with(10, b'N');
        let v = variant(101, "C", "T");
        let result = substitute(&seq, SPOS, &v).unwrap();

        assert_eq!(result.case, CaseLabel::NoMatch);
        assert!(!result.is_match());
        assert_eq!(result.reference, None);
        assert_eq!(result.alternate, None);
    }

    #[rstest]
    #[case(90)]
    #[case(111)]
    fn test_out_of_window(#[case] pos: u64) {
        let seq = window_with(0, b'A');
        let result = substitute(&seq, SPOS, &variant(pos, "A", "C"));
        assert!(matches!(result, Err(SubstitutionError::OutOfWindow { .. })));
    }

    #[rstest]
    fn test_multi_base_alternate_is_rejected() {
        let seq = window_with(10, b'C');
        let result = substitute(&seq, SPOS, &variant(101, "C", "CT"));
        assert!(matches!(
            result,
            Err(SubstitutionError::UnsupportedAllele {
                member: PairMember::Alternate,
                ..
            })
        ));
    }

    #[rstest]
    #[case("C", "C")]
    #[case("c", "C")]
    fn test_identical_alleles_are_rejected(#[case] r: &str, #[case] a: &str) {
        let seq = window_with(10, b'C');
        let result = substitute(&seq, SPOS, &variant(101, r, a));
        assert!(matches!(
            result,
            Err(SubstitutionError::IdenticalAlleles { .. })
        ));
    }

    #[rstest]
    #[case("C", "X")]
    #[case("C", "R")]
    #[case("C", "-")]
    fn test_non_nucleotide_allele_is_rejected(#[case] r: &str, #[case] a: &str) {
        let seq = window_with(10, b'C');
        let result = substitute(&seq, SPOS, &variant(101, r, a));
        assert!(matches!(
            result,
            Err(SubstitutionError::UnsupportedAllele {
                member: PairMember::Alternate,
                ..
            })
        ));
    }

    #[rstest]
    fn test_n_allele_is_substituted() {
        let seq = window_with(10, b'C');
        let result = substitute(&seq, SPOS, &variant(101, "C", "n")).unwrap();
        assert_eq!(result.alternate.unwrap().as_bytes()[10], b'N');
    }

    #[rstest]
    fn test_multi_base_reference_never_matches_directly() {
        // "CT" can't equal a single observed base; alt G's complement is C
        let seq = window_with(10, b'C');
        let result = substitute(&seq, SPOS, &variant(101, "CT", "G"));
        assert!(matches!(
            result,
            Err(SubstitutionError::UnsupportedAllele {
                member: PairMember::Reference,
                ..
            })
        ));
    }

    #[rstest]
    fn test_pair_properties_for_every_base_combination() {
        for observed in [b'A', b'C', b'G', b'T', b'N'] {
            let seq = window_with(7, observed);
            for vref in BASES {
                for valt in BASES {
                    if vref == valt {
                        continue;
                    }
                    let v = variant(98, &(vref as char).to_string(), &(valt as char).to_string());
                    let result = substitute(&seq, SPOS, &v).unwrap();

                    let candidates = [
                        Some(vref),
                        Some(valt),
                        complementary_base(vref),
                        complementary_base(valt),
                    ];
                    let expect_nomatch = !candidates.contains(&Some(observed));
                    assert_eq!(result.case == CaseLabel::NoMatch, expect_nomatch);
                    if expect_nomatch {
                        continue;
                    }

                    let reference = result.reference.unwrap();
                    let alternate = result.alternate.unwrap();
                    assert_eq!(differing_positions(&reference, &alternate), vec![7]);

                    // exactly one side is the queried window verbatim
                    assert!((reference == seq) ^ (alternate == seq));

                    let expected = match result.case {
                        CaseLabel::Match | CaseLabel::Swap => (vref, valt),
                        _ => (
                            complementary_base(vref).unwrap(),
                            complementary_base(valt).unwrap(),
                        ),
                    };
                    assert_eq!(
                        (reference.as_bytes()[7], alternate.as_bytes()[7]),
                        expected
                    );

                    // undoing the substitution gives back the untouched member
                    let (modified, untouched) = if reference == seq {
                        (&alternate, &reference)
                    } else {
                        (&reference, &alternate)
                    };
                    let restored = replace_base(modified, 7, untouched.as_bytes()[7]);
                    assert_eq!(&restored, untouched);
                }
            }
        }
    }

    #[rstest]
    fn test_check_base_reports_violation() {
        let err = check_base("ACGT", 1, b'G', CaseLabel::Swap, PairMember::Reference).unwrap_err();
        assert_eq!(
            err,
            SubstitutionError::PostCondition {
                case: CaseLabel::Swap,
                member: PairMember::Reference,
                offset: 1,
                expected: 'G',
                observed: 'C',
            }
        );
    }

    #[rstest]
    #[case("match", CaseLabel::Match)]
    #[case("swap", CaseLabel::Swap)]
    #[case("complement", CaseLabel::Complement)]
    #[case("complement_swap", CaseLabel::ComplementSwap)]
    #[case("nomatch", CaseLabel::NoMatch)]
    fn test_case_label_names(#[case] name: &str, #[case] label: CaseLabel) {
        assert_eq!(label.to_string(), name);
        assert_eq!(name.parse::<CaseLabel>().unwrap(), label);
    }

    #[rstest]
    fn test_resolver_counts_outcomes() {
        let mut resolver = SubstitutionResolver::new();
        let window = Window::new(Locus::new("chr1", SPOS), window_with(10, b'C'));

        resolver.resolve(&window, &variant(101, "C", "T")).unwrap();
        resolver.resolve(&window, &variant(101, "G", "A")).unwrap();
        resolver.resolve(&window, &variant(101, "A", "T")).unwrap();
        assert!(resolver.resolve(&window, &variant(5, "A", "T")).is_err());

        let counter = resolver.counter();
        assert_eq!(counter.total(), 3);
        assert_eq!(counter.count(CaseLabel::Match), 1);
        assert_eq!(counter.count(CaseLabel::Complement), 1);
        assert_eq!(counter.count(CaseLabel::NoMatch), 1);
        assert!((counter.nomatch_proportion() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(counter.to_string(), "{match=1, complement=1, nomatch=1}");
    }

    #[rstest]
    fn test_empty_counter_proportion() {
        assert_eq!(MismatchCounter::default().nomatch_proportion(), 0.0);
    }
}
