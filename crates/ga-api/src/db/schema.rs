//! Database row types

use chrono::{DateTime, NaiveDate, Utc};
use ga_core::{ClaimScope, ProofType, SupportType};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct Partner {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct Audit {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub company_name: String,
    pub sector: String,
    pub website_url: Option<String>,
    pub contact_email: Option<String>,
    pub status: String,
    pub total_claims: i32,
    pub conforming_claims: i32,
    pub non_conforming_claims: i32,
    pub at_risk_claims: i32,
    pub global_score: Option<f64>,
    pub risk_level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub audit_id: Uuid,
    pub claim_text: String,
    pub support_type: String,
    pub scope: String,
    pub product_name: Option<String>,
    pub has_proof: bool,
    pub proof_description: Option<String>,
    pub proof_type: Option<String>,
    pub has_label: bool,
    pub label_name: Option<String>,
    pub label_is_certified: Option<bool>,
    pub is_future_commitment: bool,
    pub target_date: Option<NaiveDate>,
    pub has_independent_verification: bool,
    pub overall_verdict: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Claim {
    /// Convert the stored row into the engine's claim input.
    ///
    /// Unrecognized support/scope strings fall back to the most
    /// conservative variant rather than failing the analysis.
    pub fn to_engine(&self) -> ga_core::Claim {
        ga_core::Claim {
            claim_text: self.claim_text.clone(),
            support_type: SupportType::parse(&self.support_type).unwrap_or(SupportType::Autre),
            scope: ClaimScope::parse(&self.scope).unwrap_or(ClaimScope::Produit),
            product_name: self.product_name.clone(),
            has_proof: self.has_proof,
            proof_description: self.proof_description.clone(),
            proof_type: self.proof_type.clone().map(ProofType::from),
            has_label: self.has_label,
            label_name: self.label_name.clone(),
            label_is_certified: self.label_is_certified,
            is_future_commitment: self.is_future_commitment,
            target_date: self.target_date,
            has_independent_verification: self.has_independent_verification,
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct ClaimResult {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub criterion: String,
    pub verdict: String,
    pub explanation: String,
    pub recommendation: Option<String>,
    pub regulation_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub id: Uuid,
    pub audit_id: Uuid,
    pub is_active: bool,
    pub frequency_days: i32,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub next_check_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct MonitoringAlert {
    pub id: Uuid,
    pub monitoring_config_id: Uuid,
    pub claim_text: String,
    pub source_url: Option<String>,
    pub is_read: bool,
    pub detected_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_row_to_engine() {
        let row = Claim {
            id: Uuid::new_v4(),
            audit_id: Uuid::new_v4(),
            claim_text: "Produit durable".to_string(),
            support_type: "packaging".to_string(),
            scope: "entreprise".to_string(),
            product_name: None,
            has_proof: true,
            proof_description: None,
            proof_type: Some("rapport_interne".to_string()),
            has_label: false,
            label_name: None,
            label_is_certified: None,
            is_future_commitment: false,
            target_date: None,
            has_independent_verification: false,
            overall_verdict: None,
            created_at: Utc::now(),
        };
        let claim = row.to_engine();
        assert_eq!(claim.support_type, SupportType::Packaging);
        assert_eq!(claim.scope, ClaimScope::Entreprise);
        assert_eq!(claim.proof_type, Some(ProofType::RapportInterne));
    }

    #[test]
    fn test_unknown_scope_defaults_to_produit() {
        let row = Claim {
            id: Uuid::new_v4(),
            audit_id: Uuid::new_v4(),
            claim_text: String::new(),
            support_type: "telepathie".to_string(),
            scope: "galaxie".to_string(),
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
            overall_verdict: None,
            created_at: Utc::now(),
        };
        let claim = row.to_engine();
        assert_eq!(claim.support_type, SupportType::Autre);
        assert_eq!(claim.scope, ClaimScope::Produit);
    }
}
