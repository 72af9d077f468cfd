//! Near-duplicate title detection.
//!
//! Pure, deterministic, in-process. Titles are normalized (trimmed and
//! case-folded) and compared with a sequence-matching ratio: identical
//! strings score 1.0, fully disjoint strings score near 0.0, and the
//! ratio is symmetric.

/// Outcome of a duplicate scan.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateCheck {
    /// Some existing title met the threshold.
    pub is_duplicate: bool,

    /// Best similarity seen up to and including the deciding entry.
    pub best_similarity: f64,
}

/// Scan existing titles for a near-duplicate of `title`.
///
/// Entries are compared in corpus order against a running best score and
/// the scan stops at the first entry whose ratio meets `threshold` —
/// entries past that point are never pulled from the iterator. When no
/// entry reaches the threshold the result carries the best score seen
/// over the whole corpus.
///
/// When checking an edit, the caller excludes the listing's own title
/// from `existing_titles`.
pub fn check_duplicates<I, S>(title: &str, existing_titles: I, threshold: f64) -> DuplicateCheck
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidate = normalize(title);
    let mut best = 0.0_f64;

    for existing in existing_titles {
        let score = similarity_ratio(&candidate, &normalize(existing.as_ref()));
        best = best.max(score);
        if best >= threshold {
            return DuplicateCheck {
                is_duplicate: true,
                best_similarity: best,
            };
        }
    }

    DuplicateCheck {
        is_duplicate: false,
        best_similarity: best,
    }
}

/// Trim and case-fold a title for comparison.
fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Sequence-matching similarity ratio in [0, 1].
///
/// Computed as `2*M / (len(a) + len(b))` where M is the total size of the
/// longest-matching-block decomposition. Two empty strings score 1.0.
///
/// Operands are put in a canonical order before matching. Tie-breaking in
/// the block search otherwise depends on argument order, which would make
/// the ratio asymmetric for inputs like "aba" / "babba".
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let mut a: Vec<char> = a.chars().collect();
    let mut b: Vec<char> = b.chars().collect();
    if (a.len(), &a) > (b.len(), &b) {
        std::mem::swap(&mut a, &mut b);
    }

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matches = matching_total(&a, &b);
    2.0 * matches as f64 / total as f64
}

/// Total matched characters: the longest common block, then recursively
/// the regions to its left and right.
fn matching_total(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (a_start, b_start, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }

    len + matching_total(&a[..a_start], &b[..b_start])
        + matching_total(&a[a_start + len..], &b[b_start + len..])
}

/// Longest common contiguous block, earliest in `a` (then `b`) on ties.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0_usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        let mut current = vec![0_usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                current[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = current;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;

    #[test]
    fn test_identical_strings_score_one() {
        assert_eq!(similarity_ratio("sunset painting", "sunset painting"), 1.0);
    }

    #[test]
    fn test_disjoint_strings_score_zero() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_empty_strings_score_one() {
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn test_empty_against_nonempty_scores_zero() {
        assert_eq!(similarity_ratio("", "title"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // "abcd" vs "bcde": longest block "bcd" -> 2*3 / 8
        assert_eq!(similarity_ratio("abcd", "bcde"), 0.75);
    }

    #[test]
    fn test_symmetric_on_tie_heavy_inputs() {
        // Greedy block choice differs per argument order without
        // canonicalization; both orders must agree.
        assert_eq!(
            similarity_ratio("aba", "babba"),
            similarity_ratio("babba", "aba")
        );
    }

    #[test]
    fn test_exact_title_detected_as_duplicate() {
        let result = check_duplicates("Sunset Painting", ["Sunset Painting"], 0.9);
        assert!(result.is_duplicate);
        assert_eq!(result.best_similarity, 1.0);
    }

    #[test]
    fn test_normalization_ignores_case_and_whitespace() {
        let result = check_duplicates("  SUNSET painting ", ["sunset Painting"], 0.9);
        assert!(result.is_duplicate);
    }

    #[test]
    fn test_unrelated_corpus_not_duplicate() {
        let result = check_duplicates("Sunset Painting", ["Bronze Horse", "Clay Vase"], 0.9);
        assert!(!result.is_duplicate);
        assert!(result.best_similarity < 0.9);
    }

    #[test]
    fn test_short_circuit_skips_later_entries() {
        let pulled = Cell::new(0_usize);
        let corpus = ["Sunset Painting", "Totally Unrelated Name"]
            .into_iter()
            .inspect(|_| pulled.set(pulled.get() + 1));

        let result = check_duplicates("Sunset Painting", corpus, 0.9);

        assert!(result.is_duplicate);
        assert_eq!(pulled.get(), 1, "second entry must never be compared");
    }

    #[test]
    fn test_full_scan_reports_best_score() {
        let result = check_duplicates("Sunset Painting", ["Sunset Paintings", "Moon"], 1.1);
        assert!(!result.is_duplicate);
        assert!(result.best_similarity > 0.9);
    }

    #[test]
    fn test_empty_corpus() {
        let result = check_duplicates("Sunset Painting", Vec::<String>::new(), 0.9);
        assert!(!result.is_duplicate);
        assert_eq!(result.best_similarity, 0.0);
    }

    proptest! {
        #[test]
        fn prop_ratio_symmetric(a in ".{0,30}", b in ".{0,30}") {
            prop_assert_eq!(similarity_ratio(&a, &b), similarity_ratio(&b, &a));
        }

        #[test]
        fn prop_ratio_reflexive(a in ".{0,30}") {
            prop_assert_eq!(similarity_ratio(&a, &a), 1.0);
        }

        #[test]
        fn prop_ratio_in_unit_interval(a in ".{0,30}", b in ".{0,30}") {
            let r = similarity_ratio(&a, &b);
            prop_assert!((0.0..=1.0).contains(&r));
        }
    }
}
