// ==========================================
// Medication Shortage CDS Service - CDS hook payload builder
// ==========================================
// Assembles the standardized order-sign hook request relayed to the
// external CDS service. Pure data assembly; dispatch lives in client.rs.
// ==========================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Interaction type tag carried by every relayed hook.
pub const HOOK_ORDER_SIGN: &str = "order-sign";

/// Coding system identifier for ATC codes on the wire.
pub const ATC_CODING_SYSTEM: &str = "http://fhir.hl7.org/CodeSystem/v3-atc";

/// Placeholder subject reference; the service carries no real patient context.
pub const SUBJECT_REFERENCE: &str = "Patient/example-patient-1";

/// Placeholder author reference.
pub const AUTHOR_REFERENCE: &str = "Practitioner/example-practitioner-1";

// ==========================================
// Wire types (camelCase per the CDS hooks shape)
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdsHookRequest {
    pub hook_instance: String,
    pub hook: String,
    pub context: HookContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookContext {
    pub user_id: String,
    pub patient_id: String,
    pub draft_orders: Bundle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub entry: Vec<BundleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleEntry {
    pub resource: MedicationRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: String,
    pub status: String,
    pub intent: String,
    pub medication_codeable_concept: CodeableConcept,
    pub subject: Reference,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<Vec<Coding>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

// ==========================================
// Builder
// ==========================================

/// Build an order-sign hook request for one medication.
///
/// The draft order references the medication by display text; when an ATC
/// code is known it additionally carries a coded reference under the fixed
/// ATC coding system. Both generated identifiers are fresh v4 UUIDs, so no
/// two calls produce the same request.
pub fn build_order_sign_request(
    medication_name: &str,
    atc_code: Option<&str>,
) -> CdsHookRequest {
    let coding = atc_code.map(|code| {
        vec![Coding {
            system: ATC_CODING_SYSTEM.to_string(),
            code: code.to_string(),
        }]
    });

    let medication_request = MedicationRequest {
        resource_type: "MedicationRequest".to_string(),
        id: format!("medreq-{}", Uuid::new_v4()),
        status: "draft".to_string(),
        intent: "order".to_string(),
        medication_codeable_concept: CodeableConcept {
            text: medication_name.to_string(),
            coding,
        },
        subject: Reference {
            reference: SUBJECT_REFERENCE.to_string(),
        },
    };

    CdsHookRequest {
        hook_instance: Uuid::new_v4().to_string(),
        hook: HOOK_ORDER_SIGN.to_string(),
        context: HookContext {
            user_id: AUTHOR_REFERENCE.to_string(),
            patient_id: SUBJECT_REFERENCE.to_string(),
            draft_orders: Bundle {
                resource_type: "Bundle".to_string(),
                entry: vec![BundleEntry {
                    resource: medication_request,
                }],
            },
        },
    }
}
