//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{RegistrationReceipt, StatusReport};
use crate::domain::entity::{elder::Elder, elder::ElderSubmission};
use crate::domain::entity::{volunteer::Volunteer, volunteer::VolunteerSubmission};
use crate::domain::value_object::approval_status::ApprovalStatus;

// ============================================================================
// Registration
// ============================================================================

/// Elder registration form. Missing fields fail validation with a message
/// rather than at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterElderRequest {
    pub full_name: String,
    pub age: i64,
    pub address: String,
    pub phone_number: Option<String>,
    /// Name of the uploaded photo file
    pub photo_filename: String,
    /// Name of the uploaded ID proof file
    pub id_proof_filename: String,
    pub guardian_name: String,
    pub guardian_contact: String,
    pub guardian_relationship: Option<String>,
    pub health_conditions: Option<String>,
    pub special_requirements: Option<String>,
}

impl From<RegisterElderRequest> for ElderSubmission {
    fn from(req: RegisterElderRequest) -> Self {
        Self {
            full_name: req.full_name,
            age: req.age,
            address: req.address,
            phone_number: req.phone_number,
            photo_filename: req.photo_filename,
            id_proof_filename: req.id_proof_filename,
            guardian_name: req.guardian_name,
            guardian_contact: req.guardian_contact,
            guardian_relationship: req.guardian_relationship,
            health_conditions: req.health_conditions,
            special_requirements: req.special_requirements,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterVolunteerRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub age: i64,
    pub profile_photo_filename: Option<String>,
    pub skills: String,
    pub availability: String,
    pub experience: Option<String>,
}

impl From<RegisterVolunteerRequest> for VolunteerSubmission {
    fn from(req: RegisterVolunteerRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            phone_number: req.phone_number,
            address: req.address,
            age: req.age,
            profile_photo_filename: req.profile_photo_filename,
            skills: req.skills,
            availability: req.availability,
            experience: req.experience,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub number: String,
    pub message: String,
}

impl From<RegistrationReceipt> for RegistrationResponse {
    fn from(receipt: RegistrationReceipt) -> Self {
        Self {
            number: receipt.number.to_string(),
            message: receipt.message,
        }
    }
}

// ============================================================================
// Status lookup
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub number: String,
    pub full_name: String,
    pub status: ApprovalStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<StatusReport> for StatusResponse {
    fn from(report: StatusReport) -> Self {
        Self {
            number: report.number.to_string(),
            full_name: report.full_name,
            status: report.status,
            status_label: report.status.label(),
            rejection_reason: report.rejection_reason,
            submitted_at: report.submitted_at,
            approved_at: report.approved_at,
        }
    }
}

// ============================================================================
// Staff views
// ============================================================================

/// `?page=&status=&q=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQueryParams {
    pub page: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElderSummary {
    pub id: Uuid,
    pub registration_number: String,
    pub full_name: String,
    pub age: i32,
    pub guardian_name: String,
    pub guardian_contact: String,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Elder> for ElderSummary {
    fn from(elder: Elder) -> Self {
        Self {
            id: elder.id.into_uuid(),
            registration_number: elder.registration_number.to_string(),
            full_name: elder.full_name,
            age: elder.age,
            guardian_name: elder.guardian_name,
            guardian_contact: elder.guardian_contact.to_string(),
            status: elder.approval.status,
            created_at: elder.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElderDetail {
    pub id: Uuid,
    pub registration_number: String,
    pub full_name: String,
    pub age: i32,
    pub address: String,
    pub phone_number: Option<String>,
    pub photo: String,
    pub id_proof: String,
    pub guardian_name: String,
    pub guardian_contact: String,
    pub guardian_relationship: String,
    pub health_conditions: String,
    pub special_requirements: String,
    pub status: ApprovalStatus,
    pub rejection_reason: String,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Elder> for ElderDetail {
    fn from(elder: Elder) -> Self {
        Self {
            id: elder.id.into_uuid(),
            registration_number: elder.registration_number.to_string(),
            full_name: elder.full_name,
            age: elder.age,
            address: elder.address,
            phone_number: elder.phone.map(|p| p.to_string()),
            photo: elder.photo.to_string(),
            id_proof: elder.id_proof.to_string(),
            guardian_name: elder.guardian_name,
            guardian_contact: elder.guardian_contact.to_string(),
            guardian_relationship: elder.guardian_relationship,
            health_conditions: elder.health_conditions,
            special_requirements: elder.special_requirements,
            status: elder.approval.status,
            rejection_reason: elder.approval.rejection_reason,
            approved_at: elder.approval.approved_at,
            approved_by: elder.approval.approved_by,
            created_at: elder.created_at,
            updated_at: elder.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerSummary {
    pub id: Uuid,
    pub volunteer_number: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Volunteer> for VolunteerSummary {
    fn from(volunteer: Volunteer) -> Self {
        Self {
            id: volunteer.id.into_uuid(),
            volunteer_number: volunteer.volunteer_number.to_string(),
            full_name: volunteer.full_name,
            email: volunteer.email.to_string(),
            phone_number: volunteer.phone.to_string(),
            status: volunteer.approval.status,
            created_at: volunteer.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerDetail {
    pub id: Uuid,
    pub volunteer_number: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub age: i32,
    pub profile_photo: Option<String>,
    pub skills: String,
    pub availability: String,
    pub experience: String,
    pub status: ApprovalStatus,
    pub rejection_reason: String,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Volunteer> for VolunteerDetail {
    fn from(volunteer: Volunteer) -> Self {
        Self {
            id: volunteer.id.into_uuid(),
            volunteer_number: volunteer.volunteer_number.to_string(),
            full_name: volunteer.full_name,
            email: volunteer.email.to_string(),
            phone_number: volunteer.phone.to_string(),
            address: volunteer.address,
            age: volunteer.age,
            profile_photo: volunteer.profile_photo.map(|p| p.to_string()),
            skills: volunteer.skills,
            availability: volunteer.availability,
            experience: volunteer.experience,
            status: volunteer.approval.status,
            rejection_reason: volunteer.approval.rejection_reason,
            approved_at: volunteer.approval.approved_at,
            approved_by: volunteer.approval.approved_by,
            created_at: volunteer.created_at,
            updated_at: volunteer.updated_at,
        }
    }
}

// ============================================================================
// Review
// ============================================================================

/// Review form posted to a detail page: `action` is `approve` or `reject`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub action: String,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReviewRequest {
    pub ids: Vec<Uuid>,
    pub action: String,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse<T> {
    pub message: String,
    pub registration: T,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResponse {
    pub updated: u64,
    pub message: String,
}
