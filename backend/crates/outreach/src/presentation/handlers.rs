//! HTTP Handlers

use axum::Extension;
use axum::Json;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use kernel::id::{DonationId, InquiryId, TestimonialId};
use kernel::page::Page;
use platform::client::client_ip_for_log;
use platform::staff::StaffMember;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::OutreachConfig;
use crate::application::{
    DONATION_THANKS, DonationAction, DonationListParams, INQUIRY_THANKS, InquiryAction,
    InquiryListParams, ManageDonationsUseCase, ManageInquiriesUseCase, SubmitDonationUseCase,
    SubmitInquiryUseCase, TestimonialsUseCase,
};
use crate::domain::repository::{DonationRepository, InquiryRepository, TestimonialRepository};
use crate::error::OutreachResult;
use crate::presentation::dto::{
    ActionRequest, ActionResponse, BulkActionRequest, BulkIdsRequest, BulkResponse,
    DonationDetail, DonationRequest, DonationSummary, InquiryRequest, InquiryView,
    ListQueryParams, PageQueryParams, SubmittedResponse, TestimonialRequest, TestimonialView,
};
use crate::presentation::extract::JsonBody;

/// Shared state for outreach handlers
#[derive(Clone)]
pub struct OutreachAppState<R>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<OutreachConfig>,
}

impl<R> OutreachAppState<R>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: OutreachConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    fn donations(&self) -> ManageDonationsUseCase<R> {
        ManageDonationsUseCase::new(self.repo.clone(), self.config.clone())
    }

    fn inquiries(&self) -> ManageInquiriesUseCase<R> {
        ManageInquiriesUseCase::new(self.repo.clone(), self.config.clone())
    }

    fn testimonials(&self) -> TestimonialsUseCase<R> {
        TestimonialsUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Public forms
// ============================================================================

/// POST /api/donations
pub async fn submit_donation<R>(
    State(state): State<OutreachAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    JsonBody(req): JsonBody<DonationRequest>,
) -> OutreachResult<impl IntoResponse>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let use_case = SubmitDonationUseCase::new(state.repo.clone());
    let donation = use_case.execute(req.into()).await?;

    tracing::debug!(
        donation_id = %donation.id,
        client_ip = %client_ip_for_log(&headers, Some(addr.ip())),
        "Donation form accepted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse {
            id: donation.id.into_uuid(),
            message: DONATION_THANKS.to_string(),
        }),
    ))
}

/// POST /api/inquiries
pub async fn submit_inquiry<R>(
    State(state): State<OutreachAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    JsonBody(req): JsonBody<InquiryRequest>,
) -> OutreachResult<impl IntoResponse>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let use_case = SubmitInquiryUseCase::new(state.repo.clone());
    let inquiry = use_case.execute(req.into()).await?;

    tracing::debug!(
        inquiry_id = %inquiry.id,
        client_ip = %client_ip_for_log(&headers, Some(addr.ip())),
        "Contact form accepted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse {
            id: inquiry.id.into_uuid(),
            message: INQUIRY_THANKS.to_string(),
        }),
    ))
}

/// GET /api/testimonials
pub async fn public_testimonials<R>(
    State(state): State<OutreachAppState<R>>,
    Query(query): Query<PageQueryParams>,
) -> OutreachResult<Json<Page<TestimonialView>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let page = state.testimonials().public_page(query.page.as_deref()).await?;
    Ok(Json(page.map(TestimonialView::from)))
}

// ============================================================================
// Staff: donations
// ============================================================================

/// GET /api/staff/donations
pub async fn list_donations<R>(
    State(state): State<OutreachAppState<R>>,
    Query(query): Query<ListQueryParams>,
) -> OutreachResult<Json<Page<DonationSummary>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let params = DonationListParams {
        page: query.page,
        status: query.status,
        donation_type: query.donation_type,
        search: query.q,
    };
    let page = state.donations().list(&params).await?;
    Ok(Json(page.map(DonationSummary::from)))
}

/// GET /api/staff/donations/{id}
pub async fn donation_detail<R>(
    State(state): State<OutreachAppState<R>>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<DonationDetail>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let donation = state.donations().get(DonationId::from_uuid(id)).await?;
    Ok(Json(donation.into()))
}

async fn update_donation_with<R>(
    state: &OutreachAppState<R>,
    id: Uuid,
    action: DonationAction,
    staff: &StaffMember,
) -> OutreachResult<Json<ActionResponse<DonationDetail>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let donation = state
        .donations()
        .apply(DonationId::from_uuid(id), action, &staff.name)
        .await?;

    Ok(Json(ActionResponse {
        message: format!("Donation has been {}.", action.verb()),
        record: donation.into(),
    }))
}

/// POST /api/staff/donations/{id}
pub async fn update_donation<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<ActionRequest>,
) -> OutreachResult<Json<ActionResponse<DonationDetail>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let action = DonationAction::parse(&req.action)?;
    update_donation_with(&state, id, action, &staff).await
}

/// POST /api/staff/donations/{id}/fulfill
pub async fn fulfill_donation<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<ActionResponse<DonationDetail>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    update_donation_with(&state, id, DonationAction::Fulfill, &staff).await
}

/// POST /api/staff/donations/{id}/cancel
pub async fn cancel_donation<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<ActionResponse<DonationDetail>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    update_donation_with(&state, id, DonationAction::Cancel, &staff).await
}

/// POST /api/staff/donations/{id}/reopen
pub async fn reopen_donation<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<ActionResponse<DonationDetail>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    update_donation_with(&state, id, DonationAction::Reopen, &staff).await
}

/// POST /api/staff/donations/bulk
pub async fn bulk_update_donations<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    JsonBody(req): JsonBody<BulkActionRequest>,
) -> OutreachResult<Json<BulkResponse>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let action = DonationAction::parse(&req.action)?;
    let ids: Vec<DonationId> = req.ids.into_iter().map(DonationId::from_uuid).collect();
    let updated = state.donations().bulk(&ids, action, &staff.name).await?;

    Ok(Json(BulkResponse {
        updated,
        message: format!("{} donation(s) {}.", updated, action.verb()),
    }))
}

// ============================================================================
// Staff: inquiries
// ============================================================================

/// GET /api/staff/inquiries
pub async fn list_inquiries<R>(
    State(state): State<OutreachAppState<R>>,
    Query(query): Query<ListQueryParams>,
) -> OutreachResult<Json<Page<InquiryView>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let params = InquiryListParams {
        page: query.page,
        status: query.status,
        search: query.q,
    };
    let page = state.inquiries().list(&params).await?;
    Ok(Json(page.map(InquiryView::from)))
}

/// GET /api/staff/inquiries/{id}
pub async fn inquiry_detail<R>(
    State(state): State<OutreachAppState<R>>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<InquiryView>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let inquiry = state.inquiries().get(InquiryId::from_uuid(id)).await?;
    Ok(Json(inquiry.into()))
}

async fn update_inquiry_with<R>(
    state: &OutreachAppState<R>,
    id: Uuid,
    action: InquiryAction,
    staff: &StaffMember,
) -> OutreachResult<Json<ActionResponse<InquiryView>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let inquiry = state
        .inquiries()
        .apply(InquiryId::from_uuid(id), action, &staff.name)
        .await?;

    Ok(Json(ActionResponse {
        message: format!("Inquiry has been {}.", action.verb()),
        record: inquiry.into(),
    }))
}

/// POST /api/staff/inquiries/{id}
pub async fn update_inquiry<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<ActionRequest>,
) -> OutreachResult<Json<ActionResponse<InquiryView>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let action = InquiryAction::parse(&req.action)?;
    update_inquiry_with(&state, id, action, &staff).await
}

/// POST /api/staff/inquiries/{id}/resolve
pub async fn resolve_inquiry<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<ActionResponse<InquiryView>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    update_inquiry_with(&state, id, InquiryAction::Resolve, &staff).await
}

/// POST /api/staff/inquiries/{id}/unresolve
pub async fn unresolve_inquiry<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<ActionResponse<InquiryView>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    update_inquiry_with(&state, id, InquiryAction::Unresolve, &staff).await
}

/// POST /api/staff/inquiries/bulk
pub async fn bulk_update_inquiries<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    JsonBody(req): JsonBody<BulkActionRequest>,
) -> OutreachResult<Json<BulkResponse>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let action = InquiryAction::parse(&req.action)?;
    let ids: Vec<InquiryId> = req.ids.into_iter().map(InquiryId::from_uuid).collect();
    let updated = state.inquiries().bulk(&ids, action, &staff.name).await?;

    Ok(Json(BulkResponse {
        updated,
        message: format!("{} inquiry(ies) {}.", updated, action.verb()),
    }))
}

// ============================================================================
// Staff: testimonials
// ============================================================================

/// GET /api/staff/testimonials
pub async fn list_testimonials<R>(
    State(state): State<OutreachAppState<R>>,
    Query(query): Query<PageQueryParams>,
) -> OutreachResult<Json<Page<TestimonialView>>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let page = state.testimonials().staff_page(query.page.as_deref()).await?;
    Ok(Json(page.map(TestimonialView::from)))
}

/// POST /api/staff/testimonials
pub async fn create_testimonial<R>(
    State(state): State<OutreachAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    JsonBody(req): JsonBody<TestimonialRequest>,
) -> OutreachResult<impl IntoResponse>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let testimonial = state.testimonials().create(req.into()).await?;
    tracing::info!(staff = %staff.name, testimonial_id = %testimonial.id, "Testimonial added");
    Ok((StatusCode::CREATED, Json(TestimonialView::from(testimonial))))
}

/// POST /api/staff/testimonials/{id}/activate
pub async fn activate_testimonial<R>(
    State(state): State<OutreachAppState<R>>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<TestimonialView>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let testimonial = state
        .testimonials()
        .set_active(TestimonialId::from_uuid(id), true)
        .await?;
    Ok(Json(testimonial.into()))
}

/// POST /api/staff/testimonials/{id}/deactivate
pub async fn deactivate_testimonial<R>(
    State(state): State<OutreachAppState<R>>,
    Path(id): Path<Uuid>,
) -> OutreachResult<Json<TestimonialView>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let testimonial = state
        .testimonials()
        .set_active(TestimonialId::from_uuid(id), false)
        .await?;
    Ok(Json(testimonial.into()))
}

/// POST /api/staff/testimonials/bulk/activate
pub async fn bulk_activate_testimonials<R>(
    State(state): State<OutreachAppState<R>>,
    JsonBody(req): JsonBody<BulkIdsRequest>,
) -> OutreachResult<Json<BulkResponse>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    bulk_set_active(&state, req.ids, true).await
}

/// POST /api/staff/testimonials/bulk/deactivate
pub async fn bulk_deactivate_testimonials<R>(
    State(state): State<OutreachAppState<R>>,
    JsonBody(req): JsonBody<BulkIdsRequest>,
) -> OutreachResult<Json<BulkResponse>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    bulk_set_active(&state, req.ids, false).await
}

async fn bulk_set_active<R>(
    state: &OutreachAppState<R>,
    ids: Vec<Uuid>,
    active: bool,
) -> OutreachResult<Json<BulkResponse>>
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let ids: Vec<TestimonialId> = ids.into_iter().map(TestimonialId::from_uuid).collect();
    let updated = state.testimonials().bulk_set_active(&ids, active).await?;
    let verb = if active { "activated" } else { "deactivated" };

    Ok(Json(BulkResponse {
        updated,
        message: format!("{} testimonial(s) {}.", updated, verb),
    }))
}
