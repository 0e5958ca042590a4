//! Lexical corpora backing the compliance rules
//!
//! Four fixed corpora matched against the lower-cased, trimmed claim
//! text: the generic-term blacklist, carbon-neutrality phrases,
//! measurable-qualification patterns and partial-scope patterns.
//! Term scans are ordered: the first matching term in corpus order is
//! the one surfaced in explanations.

use once_cell::sync::Lazy;
use regex::Regex;

/// Generic sustainability terms banned without qualification (EmpCo Art. 2(o))
pub const BLACKLIST_TERMS: &[&str] = &[
    "écologique",
    "éco-responsable",
    "éco responsable",
    "eco-friendly",
    "vert",
    "green",
    "respectueux de l'environnement",
    "respectueux de la planète",
    "ami de la nature",
    "nature friendly",
    "durable",
    "sustainable",
    "biodégradable",
    "naturel",
    "natural",
    "climate friendly",
    "bon pour la planète",
    "zéro déchet",
    "zero waste",
    "propre",
    "clean",
];

/// Carbon-neutrality-by-offset phrases (absolute prohibition, Annexe I point 4)
pub const CARBON_NEUTRAL_TERMS: &[&str] = &[
    "neutre en carbone",
    "carbon neutral",
    "neutralité carbone",
    "climate neutral",
    "zéro émission",
    "zero emission",
    "impact neutre",
    "compensé carbone",
    "compensation carbone",
    "net zero",
    "net zéro",
];

// Measurable qualification markers that mitigate a blacklist hit
static QUALIFICATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\d+\s*%",
        r"(?i)\d+\s*g\b",
        r"(?i)\d+\s*kg\b",
        r"(?i)\d+\s*t\b",
        r"(?i)\d+\s*kwh\b",
        r"(?i)certifi[ée]",
        r"(?i)label[lisé]*",
        r"(?i)norme\s+\w+",
        r"(?i)iso\s*\d+",
        r"(?i)selon\s+(le|la|les|une|un)",
        r"(?i)mesur[ée]",
        r"(?i)vérifi[ée]",
        r"(?i)audit[ée]",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// Markers of a narrower operational aspect, for the proportionality rule
static PARTIAL_SCOPE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bemballage[s]?\b",
        r"(?i)\bpackaging\b",
        r"(?i)\btransport\b",
        r"(?i)\blogistique\b",
        r"(?i)\bproduit\b",
        r"(?i)\bfabrication\b",
        r"(?i)\bproduction\b",
        r"(?i)\bmatière[s]? première[s]?\b",
        r"(?i)\bénergie\b",
        r"(?i)\bdéchet[s]?\b",
        r"(?i)\beau\b",
        r"(?i)\bcarbone\b",
        r"(?i)\bco2\b",
        r"(?i)\bémission[s]?\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Lower-case and trim a claim text for lexical matching.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// First blacklisted term found in the normalized text, in corpus order.
pub fn find_blacklist_term(text: &str) -> Option<&'static str> {
    BLACKLIST_TERMS.iter().find(|term| text.contains(*term)).copied()
}

/// First carbon-neutrality phrase found, in corpus order.
pub fn find_carbon_neutral_term(text: &str) -> Option<&'static str> {
    CARBON_NEUTRAL_TERMS
        .iter()
        .find(|term| text.contains(*term))
        .copied()
}

/// Whether the text carries a measurable, falsifiable qualifier.
pub fn has_qualification(text: &str) -> bool {
    QUALIFICATION_PATTERNS.iter().any(|p| p.is_match(text))
}

/// Whether the text mentions a partial operational aspect.
pub fn has_partial_scope_mention(text: &str) -> bool {
    PARTIAL_SCOPE_PATTERNS.iter().any(|p| p.is_match(text))
}

/// Qualification patterns, for inspection tooling.
pub fn qualification_patterns() -> &'static [Regex] {
    &QUALIFICATION_PATTERNS
}

/// Partial-scope patterns, for inspection tooling.
pub fn partial_scope_patterns() -> &'static [Regex] {
    &PARTIAL_SCOPE_PATTERNS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_blacklist_match_wins() {
        // "vert" precedes "durable" in corpus order
        let text = normalize("Un produit vert et durable");
        assert_eq!(find_blacklist_term(&text), Some("vert"));
    }

    #[test]
    fn test_blacklist_substring_match() {
        // Substring policy: "vert" matches inside "couvert"
        let text = normalize("Le sol est couvert de feuilles");
        assert_eq!(find_blacklist_term(&text), Some("vert"));
    }

    #[test]
    fn test_no_blacklist_match() {
        let text = normalize("Nos emballages contiennent 30% de carton recyclé");
        assert_eq!(find_blacklist_term(&text), None);
    }

    #[test]
    fn test_carbon_neutral_match() {
        let text = normalize("Livraison neutre en carbone");
        assert_eq!(find_carbon_neutral_term(&text), Some("neutre en carbone"));
        let text = normalize("Objectif net zero atteint");
        assert_eq!(find_carbon_neutral_term(&text), Some("net zero"));
    }

    #[test]
    fn test_qualification_percentage() {
        assert!(has_qualification("réduction de 40% de nos émissions"));
    }

    #[test]
    fn test_qualification_iso_and_certification() {
        assert!(has_qualification("certifié iso 14001"));
        assert!(has_qualification("selon le rapport annuel"));
    }

    #[test]
    fn test_no_qualification() {
        assert!(!has_qualification("notre produit est écologique"));
    }

    #[test]
    fn test_partial_scope_mentions() {
        assert!(has_partial_scope_mention("nos emballages sont recyclés"));
        assert!(has_partial_scope_mention("réduction du transport"));
        assert!(has_partial_scope_mention("moins d'émissions de co2"));
        assert!(!has_partial_scope_mention(
            "nous sommes engagés dans une démarche globale"
        ));
    }
}
