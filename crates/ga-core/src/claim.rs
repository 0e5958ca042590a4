//! Claim data model

use crate::{Criterion, Verdict};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Communication support the claim appears on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportType {
    Web,
    Packaging,
    Publicite,
    ReseauxSociaux,
    Autre,
}

impl SupportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportType::Web => "web",
            SupportType::Packaging => "packaging",
            SupportType::Publicite => "publicite",
            SupportType::ReseauxSociaux => "reseaux_sociaux",
            SupportType::Autre => "autre",
        }
    }

    /// French label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            SupportType::Web => "Site web",
            SupportType::Packaging => "Packaging",
            SupportType::Publicite => "Publicité",
            SupportType::ReseauxSociaux => "Réseaux sociaux",
            SupportType::Autre => "Autre",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "web" => Some(SupportType::Web),
            "packaging" => Some(SupportType::Packaging),
            "publicite" => Some(SupportType::Publicite),
            "reseaux_sociaux" => Some(SupportType::ReseauxSociaux),
            "autre" => Some(SupportType::Autre),
            _ => None,
        }
    }
}

impl std::fmt::Display for SupportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared scope of the claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimScope {
    Produit,
    Entreprise,
}

impl ClaimScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimScope::Produit => "produit",
            ClaimScope::Entreprise => "entreprise",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimScope::Produit => "Produit",
            ClaimScope::Entreprise => "Entreprise",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "produit" => Some(ClaimScope::Produit),
            "entreprise" => Some(ClaimScope::Entreprise),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClaimScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of proof backing a claim.
///
/// `Autre` keeps the raw unrecognized string so the justification rule
/// can apply its defined fallback instead of rejecting the claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProofType {
    CertificationTierce,
    RapportInterne,
    DonneesFournisseur,
    Aucune,
    Autre(String),
}

impl ProofType {
    pub fn as_str(&self) -> &str {
        match self {
            ProofType::CertificationTierce => "certification_tierce",
            ProofType::RapportInterne => "rapport_interne",
            ProofType::DonneesFournisseur => "donnees_fournisseur",
            ProofType::Aucune => "aucune",
            ProofType::Autre(s) => s,
        }
    }
}

impl From<String> for ProofType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "certification_tierce" => ProofType::CertificationTierce,
            "rapport_interne" => ProofType::RapportInterne,
            "donnees_fournisseur" => ProofType::DonneesFournisseur,
            "aucune" => ProofType::Aucune,
            _ => ProofType::Autre(s),
        }
    }
}

impl From<ProofType> for String {
    fn from(p: ProofType) -> Self {
        p.as_str().to_string()
    }
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environmental claim under audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub claim_text: String,
    pub support_type: SupportType,
    pub scope: ClaimScope,
    pub product_name: Option<String>,

    // Declared proof
    pub has_proof: bool,
    pub proof_description: Option<String>,
    pub proof_type: Option<ProofType>,

    // Labels
    pub has_label: bool,
    pub label_name: Option<String>,
    pub label_is_certified: Option<bool>,

    // Future commitment
    pub is_future_commitment: bool,
    pub target_date: Option<NaiveDate>,
    pub has_independent_verification: bool,
}

impl Default for Claim {
    fn default() -> Self {
        Self {
            claim_text: String::new(),
            support_type: SupportType::Web,
            scope: ClaimScope::Produit,
            product_name: None,
            has_proof: false,
            proof_description: None,
            proof_type: None,
            has_label: false,
            label_name: None,
            label_is_certified: None,
            is_future_commitment: false,
            target_date: None,
            has_independent_verification: false,
        }
    }
}

/// Outcome of one criterion evaluation for one claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: Criterion,
    pub verdict: Verdict,
    pub explanation: String,
    pub recommendation: Option<String>,
    pub regulation_reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proof_type_from_string() {
        assert_eq!(
            ProofType::from("certification_tierce".to_string()),
            ProofType::CertificationTierce
        );
        assert_eq!(ProofType::from("aucune".to_string()), ProofType::Aucune);
        assert_eq!(
            ProofType::from("autre_chose".to_string()),
            ProofType::Autre("autre_chose".to_string())
        );
    }

    #[test]
    fn test_proof_type_serde_roundtrip() {
        let p: ProofType = serde_json::from_str("\"rapport_interne\"").unwrap();
        assert_eq!(p, ProofType::RapportInterne);
        let raw: ProofType = serde_json::from_str("\"attestation_maison\"").unwrap();
        assert_eq!(raw.as_str(), "attestation_maison");
        assert_eq!(
            serde_json::to_string(&raw).unwrap(),
            "\"attestation_maison\""
        );
    }

    #[test]
    fn test_support_type_parse() {
        assert_eq!(SupportType::parse("web"), Some(SupportType::Web));
        assert_eq!(
            SupportType::parse("reseaux_sociaux"),
            Some(SupportType::ReseauxSociaux)
        );
        assert_eq!(SupportType::parse("fax"), None);
    }
}
