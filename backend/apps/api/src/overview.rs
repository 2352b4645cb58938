//! Overview and Dashboard
//!
//! The only endpoints that read from both contexts: public figures for the
//! home page and the staff dashboard.

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{Json, Router, extract::State, routing::get};
use outreach::application::OutreachStatsUseCase;
use outreach::domain::repository::{DonationCounts, InquiryCounts};
use outreach::domain::{DonationRepository, InquiryRepository, TestimonialRepository};
use outreach::presentation::dto::{DonationSummary, TestimonialView};
use outreach::OutreachConfig;
use registry::application::RegistryStatsUseCase;
use registry::domain::repository::{ElderRepository, StatusCounts, VolunteerRepository};
use registry::models::{ElderSummary, VolunteerSummary};
use registry::RegistryConfig;
use serde::Serialize;

#[derive(Clone)]
pub struct OverviewState<RR, OR> {
    pub registry: Arc<RR>,
    pub outreach: Arc<OR>,
    pub registry_config: Arc<RegistryConfig>,
    pub outreach_config: Arc<OutreachConfig>,
}

impl<RR, OR> OverviewState<RR, OR>
where
    RR: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
    OR: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    pub fn new(
        registry: RR,
        outreach: OR,
        registry_config: RegistryConfig,
        outreach_config: OutreachConfig,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            outreach: Arc::new(outreach),
            registry_config: Arc::new(registry_config),
            outreach_config: Arc::new(outreach_config),
        }
    }

    fn registry_stats(&self) -> RegistryStatsUseCase<RR, RR> {
        RegistryStatsUseCase::new(
            self.registry.clone(),
            self.registry.clone(),
            self.registry_config.clone(),
        )
    }

    fn outreach_stats(&self) -> OutreachStatsUseCase<OR, OR, OR> {
        OutreachStatsUseCase::new(
            self.outreach.clone(),
            self.outreach.clone(),
            self.outreach.clone(),
            self.outreach_config.clone(),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub total_elders: u64,
    pub approved_elders: u64,
    pub active_volunteers: u64,
    pub total_donations: u64,
    pub testimonials: Vec<TestimonialView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountsView {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl From<StatusCounts> for StatusCountsView {
    fn from(c: StatusCounts) -> Self {
        Self {
            total: c.total,
            pending: c.pending,
            approved: c.approved,
            rejected: c.rejected,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationCountsView {
    pub total: u64,
    pub pending: u64,
    pub fulfilled: u64,
    pub cancelled: u64,
}

impl From<DonationCounts> for DonationCountsView {
    fn from(c: DonationCounts) -> Self {
        Self {
            total: c.total,
            pending: c.pending,
            fulfilled: c.fulfilled,
            cancelled: c.cancelled,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryCountsView {
    pub total: u64,
    pub unresolved: u64,
}

impl From<InquiryCounts> for InquiryCountsView {
    fn from(c: InquiryCounts) -> Self {
        Self {
            total: c.total,
            unresolved: c.unresolved,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub elders: StatusCountsView,
    pub volunteers: StatusCountsView,
    pub donations: DonationCountsView,
    pub inquiries: InquiryCountsView,
    pub recent_pending_elders: Vec<ElderSummary>,
    pub recent_pending_volunteers: Vec<VolunteerSummary>,
    pub recent_pending_donations: Vec<DonationSummary>,
}

/// GET /api/overview
pub async fn overview<RR, OR>(
    State(state): State<OverviewState<RR, OR>>,
) -> Result<Json<OverviewResponse>, Response>
where
    RR: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
    OR: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let registry = state
        .registry_stats()
        .overview()
        .await
        .map_err(IntoResponse::into_response)?;
    let outreach = state
        .outreach_stats()
        .overview()
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(OverviewResponse {
        total_elders: registry.total_elders,
        approved_elders: registry.approved_elders,
        active_volunteers: registry.active_volunteers,
        total_donations: outreach.total_donations,
        testimonials: outreach
            .testimonials
            .into_iter()
            .map(TestimonialView::from)
            .collect(),
    }))
}

/// GET /api/staff/dashboard
pub async fn dashboard<RR, OR>(
    State(state): State<OverviewState<RR, OR>>,
) -> Result<Json<DashboardResponse>, Response>
where
    RR: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
    OR: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let registry = state
        .registry_stats()
        .dashboard()
        .await
        .map_err(IntoResponse::into_response)?;
    let outreach = state
        .outreach_stats()
        .dashboard()
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(DashboardResponse {
        elders: registry.elders.into(),
        volunteers: registry.volunteers.into(),
        donations: outreach.donations.into(),
        inquiries: outreach.inquiries.into(),
        recent_pending_elders: registry
            .recent_pending_elders
            .into_iter()
            .map(ElderSummary::from)
            .collect(),
        recent_pending_volunteers: registry
            .recent_pending_volunteers
            .into_iter()
            .map(VolunteerSummary::from)
            .collect(),
        recent_pending_donations: outreach
            .recent_pending_donations
            .into_iter()
            .map(DonationSummary::from)
            .collect(),
    }))
}

/// Public and staff overview routes, in that order
pub fn overview_routes<RR, OR>(state: OverviewState<RR, OR>) -> (Router, Router)
where
    RR: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
    OR: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/overview", get(overview::<RR, OR>))
        .with_state(state.clone());
    let staff = Router::new()
        .route("/dashboard", get(dashboard::<RR, OR>))
        .with_state(state);
    (public, staff)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use outreach::application::{SubmitDonationUseCase, TestimonialsUseCase};
    use outreach::domain::entity::donation::DonationSubmission;
    use outreach::domain::entity::testimonial::TestimonialSubmission;
    use outreach::store::InMemoryOutreachRepository;
    use registry::application::RegisterElderUseCase;
    use registry::domain::entity::elder::ElderSubmission;
    use registry::store::InMemoryRegistryRepository;
    use serde_json::Value;
    use tokio_test::assert_ok;
    use tower::ServiceExt;

    use super::*;

    fn elder(name: &str) -> ElderSubmission {
        ElderSubmission {
            full_name: name.to_string(),
            age: 74,
            address: "14 Ghat Road, Varanasi".to_string(),
            phone_number: None,
            photo_filename: "photo.jpg".to_string(),
            id_proof_filename: "proof.pdf".to_string(),
            guardian_name: "Suresh Kumar".to_string(),
            guardian_contact: "+919876543210".to_string(),
            guardian_relationship: None,
            health_conditions: None,
            special_requirements: None,
        }
    }

    async fn seeded() -> (Router, Router) {
        let registry = InMemoryRegistryRepository::new();
        let outreach = InMemoryOutreachRepository::new();
        let state = OverviewState::new(
            registry,
            outreach,
            RegistryConfig::default(),
            OutreachConfig::default(),
        );

        let register =
            RegisterElderUseCase::new(state.registry.clone(), state.registry_config.clone());
        assert_ok!(register.execute(elder("Kamla Devi")).await);
        assert_ok!(register.execute(elder("Gopal Das")).await);

        let donate = SubmitDonationUseCase::new(state.outreach.clone());
        assert_ok!(
            donate
                .execute(DonationSubmission {
                    donor_name: "Ramesh Gupta".to_string(),
                    donor_email: "ramesh@example.org".to_string(),
                    donor_phone: "9876543210".to_string(),
                    donation_type: "food".to_string(),
                    description: "Rice and dal".to_string(),
                    message: None,
                })
                .await
        );

        let testimonials =
            TestimonialsUseCase::new(state.outreach.clone(), state.outreach_config.clone());
        assert_ok!(
            testimonials
                .create(TestimonialSubmission {
                    name: "Neha Verma".to_string(),
                    relationship: "Daughter".to_string(),
                    rating: None,
                    comment: "Like family.".to_string(),
                    is_active: None,
                })
                .await
        );

        overview_routes(state)
    }

    async fn get_json(router: Router, uri: &str) -> Value {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_overview_combines_both_contexts() {
        let (public, _) = seeded().await;
        let body = get_json(public, "/overview").await;
        assert_eq!(body["totalElders"], 2);
        assert_eq!(body["approvedElders"], 0);
        assert_eq!(body["activeVolunteers"], 0);
        assert_eq!(body["totalDonations"], 1);
        assert_eq!(body["testimonials"][0]["name"], "Neha Verma");
    }

    #[tokio::test]
    async fn test_dashboard_lists_pending_work() {
        let (_, staff) = seeded().await;
        let body = get_json(staff, "/dashboard").await;
        assert_eq!(body["elders"]["pending"], 2);
        assert_eq!(body["donations"]["pending"], 1);
        assert_eq!(body["inquiries"]["unresolved"], 0);
        assert_eq!(body["recentPendingElders"].as_array().unwrap().len(), 2);
        assert_eq!(body["recentPendingDonations"][0]["donorName"], "Ramesh Gupta");
    }
}
