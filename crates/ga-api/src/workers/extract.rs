//! Lexical claim extraction from scraped page text
//!
//! Scans page text for sentences carrying a blacklisted or
//! carbon-neutrality term, using the engine's own corpora. Extraction
//! is deterministic and offline; sentences already covered by the
//! audit's known claims are dropped.

use aho_corasick::AhoCorasick;
use ga_core::lexicon::{BLACKLIST_TERMS, CARBON_NEUTRAL_TERMS};
use once_cell::sync::Lazy;

/// Candidate sentences shorter than this are noise (menu items, tags)
const MIN_SENTENCE_CHARS: usize = 15;
/// Longer fragments are page boilerplate rather than a claim
const MAX_SENTENCE_CHARS: usize = 300;

// One automaton over both corpora; matched against lower-cased text
static CLAIM_TERMS: Lazy<AhoCorasick> = Lazy::new(|| {
    let patterns: Vec<&str> = BLACKLIST_TERMS
        .iter()
        .chain(CARBON_NEUTRAL_TERMS.iter())
        .copied()
        .collect();
    AhoCorasick::new(&patterns).unwrap()
});

/// Extract candidate claim sentences absent from the known claims.
pub fn extract_candidate_claims(text: &str, known_claims: &[String]) -> Vec<String> {
    let known: Vec<String> = known_claims.iter().map(|c| normalize(c)).collect();

    let mut candidates = Vec::new();
    let mut seen = Vec::new();

    for line in text.lines() {
        let sentence = line.trim();
        let char_count = sentence.chars().count();
        if char_count < MIN_SENTENCE_CHARS || char_count > MAX_SENTENCE_CHARS {
            continue;
        }

        let normalized = normalize(sentence);
        if !CLAIM_TERMS.is_match(&normalized) {
            continue;
        }
        if known.contains(&normalized) || seen.contains(&normalized) {
            continue;
        }

        seen.push(normalized);
        candidates.push(sentence.to_string());
    }

    candidates
}

fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_sentences_with_claim_terms() {
        let text = "Bienvenue sur notre site\n\
                    Nos produits sont écologiques et recyclables\n\
                    Livraison neutre en carbone partout en France\n\
                    Contactez-nous au 01 23 45 67 89\n";
        let candidates = extract_candidate_claims(text, &[]);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].contains("écologiques"));
        assert!(candidates[1].contains("neutre en carbone"));
    }

    #[test]
    fn test_known_claims_are_dropped() {
        let text = "Nos produits sont écologiques et recyclables\n";
        let known = vec!["Nos produits sont écologiques et recyclables".to_string()];
        let candidates = extract_candidate_claims(text, &known);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let text = "Un produit durable pour la maison\n\
                    Un produit durable pour la maison\n";
        let candidates = extract_candidate_claims(text, &[]);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_short_fragments_are_dropped() {
        let text = "Durable\nBio et vert\n";
        let candidates = extract_candidate_claims(text, &[]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_no_claim_terms_no_candidates() {
        let text = "Nos magasins sont accessibles de 9h à 18h\n";
        let candidates = extract_candidate_claims(text, &[]);
        assert!(candidates.is_empty());
    }
}
