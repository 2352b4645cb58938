//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::donation::{Donation, DonationSubmission};
use crate::domain::entity::inquiry::{Inquiry, InquirySubmission};
use crate::domain::entity::testimonial::{Testimonial, TestimonialSubmission};
use crate::domain::value_object::donation::{DonationStatus, DonationType};

// ============================================================================
// Public forms
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationRequest {
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
    pub donation_type: String,
    pub description: String,
    pub message: Option<String>,
}

impl From<DonationRequest> for DonationSubmission {
    fn from(req: DonationRequest) -> Self {
        Self {
            donor_name: req.donor_name,
            donor_email: req.donor_email,
            donor_phone: req.donor_phone,
            donation_type: req.donation_type,
            description: req.description,
            message: req.message,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl From<InquiryRequest> for InquirySubmission {
    fn from(req: InquiryRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            subject: req.subject,
            message: req.message,
        }
    }
}

/// Acknowledgement for a public form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedResponse {
    pub id: Uuid,
    pub message: String,
}

// ============================================================================
// Testimonials
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialRequest {
    pub name: String,
    pub relationship: String,
    pub rating: Option<i64>,
    pub comment: String,
    pub is_active: Option<bool>,
}

impl From<TestimonialRequest> for TestimonialSubmission {
    fn from(req: TestimonialRequest) -> Self {
        Self {
            name: req.name,
            relationship: req.relationship,
            rating: req.rating,
            comment: req.comment,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialView {
    pub id: Uuid,
    pub name: String,
    pub relationship: String,
    pub rating: u8,
    pub comment: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Testimonial> for TestimonialView {
    fn from(testimonial: Testimonial) -> Self {
        Self {
            id: testimonial.id.into_uuid(),
            name: testimonial.name,
            relationship: testimonial.relationship,
            rating: testimonial.rating.value(),
            comment: testimonial.comment,
            is_active: testimonial.is_active,
            created_at: testimonial.created_at,
        }
    }
}

/// `?page=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQueryParams {
    pub page: Option<String>,
}

// ============================================================================
// Staff views
// ============================================================================

/// `?page=&status=&type=&q=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQueryParams {
    pub page: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub donation_type: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSummary {
    pub id: Uuid,
    pub donor_name: String,
    pub donor_email: String,
    pub donation_type: DonationType,
    pub donation_type_label: &'static str,
    pub status: DonationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Donation> for DonationSummary {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id.into_uuid(),
            donor_name: donation.donor_name,
            donor_email: donation.donor_email.to_string(),
            donation_type: donation.donation_type,
            donation_type_label: donation.donation_type.label(),
            status: donation.status,
            created_at: donation.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationDetail {
    pub id: Uuid,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
    pub donation_type: DonationType,
    pub donation_type_label: &'static str,
    pub description: String,
    pub message: String,
    pub status: DonationStatus,
    pub status_label: &'static str,
    pub fulfilled_at: Option<DateTime<Utc>>,
    pub fulfilled_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Donation> for DonationDetail {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id.into_uuid(),
            donor_name: donation.donor_name,
            donor_email: donation.donor_email.to_string(),
            donor_phone: donation.donor_phone,
            donation_type: donation.donation_type,
            donation_type_label: donation.donation_type.label(),
            description: donation.description,
            message: donation.message,
            status: donation.status,
            status_label: donation.status.label(),
            fulfilled_at: donation.fulfilled_at,
            fulfilled_by: donation.fulfilled_by,
            created_at: donation.created_at,
            updated_at: donation.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Inquiry> for InquiryView {
    fn from(inquiry: Inquiry) -> Self {
        Self {
            id: inquiry.id.into_uuid(),
            name: inquiry.name,
            email: inquiry.email.to_string(),
            phone: inquiry.phone,
            subject: inquiry.subject,
            message: inquiry.message,
            is_resolved: inquiry.is_resolved,
            created_at: inquiry.created_at,
        }
    }
}

// ============================================================================
// Staff actions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    pub action: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkActionRequest {
    pub ids: Vec<Uuid>,
    pub action: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkIdsRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse<T> {
    pub message: String,
    pub record: T,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResponse {
    pub updated: u64,
    pub message: String,
}
