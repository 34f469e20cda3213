//! Name normalization
//!
//! Maps a display name to the canonical key stored in the `normalized`
//! column of dancers, orchestras, songs and singers. Two names with the same
//! key refer to the same entity, whatever their accents, casing or
//! punctuation. Display names themselves are never rewritten.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compute the canonical comparison key for a name
///
/// Steps: NFD decomposition, combining marks dropped, lowercase, everything
/// outside `[a-z0-9]`, whitespace and `-` dropped, whitespace runs collapsed
/// to one space, edges trimmed.
///
/// The result only contains `[a-z0-9 -]` with single inner spaces, so the
/// function is idempotent.
///
/// # Examples
/// ```
/// use tvs_common::normalize_name;
///
/// assert_eq!(normalize_name("José"), "jose");
/// assert_eq!(normalize_name("  D'Arienzo  "), "darienzo");
/// assert_eq!(normalize_name("Carlos   Di\tSarli"), "carlos di sarli");
/// ```
pub fn normalize_name(name: &str) -> String {
    let folded = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let kept: String = folded
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when both names share a canonical key
pub fn same_name(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_and_case_fold_together() {
        assert_eq!(normalize_name("José"), "jose");
        assert_eq!(normalize_name("jose"), "jose");
        assert_eq!(normalize_name("JOSÉ"), "jose");
        assert_eq!(normalize_name("María Inés"), "maria ines");
        assert_eq!(normalize_name("Nuñez"), "nunez");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(normalize_name("D'Arienzo"), "darienzo");
        assert_eq!(normalize_name("Pugliese, Osvaldo!"), "pugliese osvaldo");
        assert_eq!(normalize_name("Di Sarli (1940s)"), "di sarli 1940s");
    }

    #[test]
    fn test_hyphen_is_kept() {
        assert_eq!(normalize_name("Jean-Pierre"), "jean-pierre");
    }

    #[test]
    fn test_whitespace_collapses_and_trims() {
        assert_eq!(normalize_name("  Carlos \t  Di\nSarli  "), "carlos di sarli");
        assert_eq!(normalize_name("DI SARLI "), "di sarli");
    }

    #[test]
    fn test_punctuation_next_to_edges_leaves_no_space() {
        assert_eq!(normalize_name("Juan !"), "juan");
        assert_eq!(normalize_name("¡ Juan"), "juan");
    }

    #[test]
    fn test_non_decomposable_letters_are_removed() {
        // Ø has no NFD decomposition into ASCII plus a mark
        assert_eq!(normalize_name("Øyvind"), "yvind");
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name("?!'"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "José",
            "  Juan !",
            "María   Inés",
            "D'Arienzo",
            "Ångström-Ørsted",
            "İstanbul",
            "Carlos\u{00A0}Gavito",
            "",
        ];

        for sample in samples {
            let once = normalize_name(sample);
            assert_eq!(normalize_name(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_same_name() {
        assert!(same_name("Di Sarli", "DI SARLI "));
        assert!(same_name("María", "maria"));
        assert!(!same_name("Juan", "Juana"));
    }
}
