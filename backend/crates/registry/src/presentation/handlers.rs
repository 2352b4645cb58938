//! HTTP Handlers

use axum::Json;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::Extension;
use kernel::id::{ElderId, VolunteerId};
use platform::client::client_ip_for_log;
use platform::staff::StaffMember;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::RegistryConfig;
use crate::application::{
    CheckStatusUseCase, IdCardUseCase, ListParams, ListRegistrationsUseCase,
    RegisterElderUseCase, RegisterVolunteerUseCase, RenderedCard, ReviewDecision, ReviewUseCase,
};
use crate::domain::id_card::IdCardRenderer;
use crate::domain::repository::{ElderRepository, VolunteerRepository};
use crate::error::RegistryResult;
use crate::infra::pdf::PdfIdCardRenderer;
use crate::presentation::dto::{
    BulkResponse, BulkReviewRequest, ElderDetail, ElderSummary, ListQueryParams,
    RegisterElderRequest, RegisterVolunteerRequest, RegistrationResponse, RejectRequest,
    ReviewRequest, ReviewResponse, StatusResponse, VolunteerDetail, VolunteerSummary,
};
use crate::presentation::extract::JsonBody;
use kernel::page::Page;

/// Shared state for registry handlers
#[derive(Clone)]
pub struct RegistryAppState<R>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<RegistryConfig>,
    pub renderer: Arc<dyn IdCardRenderer>,
}

impl<R> RegistryAppState<R>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    /// State rendering ID cards as PDF
    pub fn new(repo: R, config: RegistryConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            renderer: Arc::new(PdfIdCardRenderer::new()),
        }
    }
}

fn list_params(query: ListQueryParams) -> ListParams {
    ListParams {
        page: query.page,
        status: query.status,
        search: query.q,
    }
}

fn attachment_response(card: RenderedCard) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, card.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", card.file_name),
            ),
        ],
        card.bytes,
    )
}

// ============================================================================
// Public registration
// ============================================================================

/// POST /api/elders
pub async fn register_elder<R>(
    State(state): State<RegistryAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    JsonBody(req): JsonBody<RegisterElderRequest>,
) -> RegistryResult<impl IntoResponse>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterElderUseCase::new(state.repo.clone(), state.config.clone());
    let receipt = use_case.execute(req.into()).await?;

    tracing::info!(
        number = %receipt.number,
        client_ip = %client_ip_for_log(&headers, Some(addr.ip())),
        "Elder registration received"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(receipt)),
    ))
}

/// POST /api/volunteers
pub async fn register_volunteer<R>(
    State(state): State<RegistryAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    JsonBody(req): JsonBody<RegisterVolunteerRequest>,
) -> RegistryResult<impl IntoResponse>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterVolunteerUseCase::new(state.repo.clone(), state.config.clone());
    let receipt = use_case.execute(req.into()).await?;

    tracing::info!(
        number = %receipt.number,
        client_ip = %client_ip_for_log(&headers, Some(addr.ip())),
        "Volunteer registration received"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(receipt)),
    ))
}

// ============================================================================
// Public lookups
// ============================================================================

/// GET /api/elders/status/{number}
pub async fn elder_status<R>(
    State(state): State<RegistryAppState<R>>,
    Path(number): Path<String>,
) -> RegistryResult<Json<StatusResponse>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case = CheckStatusUseCase::new(state.repo.clone(), state.repo.clone());
    let report = use_case.elder(&number).await?;
    Ok(Json(report.into()))
}

/// GET /api/volunteers/status/{number}
pub async fn volunteer_status<R>(
    State(state): State<RegistryAppState<R>>,
    Path(number): Path<String>,
) -> RegistryResult<Json<StatusResponse>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case = CheckStatusUseCase::new(state.repo.clone(), state.repo.clone());
    let report = use_case.volunteer(&number).await?;
    Ok(Json(report.into()))
}

/// GET /api/elders/{number}/id-card
pub async fn elder_id_card<R>(
    State(state): State<RegistryAppState<R>>,
    Path(number): Path<String>,
) -> RegistryResult<impl IntoResponse>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case = IdCardUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.renderer.clone(),
        state.config.clone(),
    );
    let card = use_case.elder(&number).await?;
    Ok(attachment_response(card))
}

/// GET /api/volunteers/{number}/id-card
pub async fn volunteer_id_card<R>(
    State(state): State<RegistryAppState<R>>,
    Path(number): Path<String>,
) -> RegistryResult<impl IntoResponse>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case = IdCardUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.renderer.clone(),
        state.config.clone(),
    );
    let card = use_case.volunteer(&number).await?;
    Ok(attachment_response(card))
}

// ============================================================================
// Staff: elders
// ============================================================================

/// GET /api/staff/elders
pub async fn list_elders<R>(
    State(state): State<RegistryAppState<R>>,
    Query(query): Query<ListQueryParams>,
) -> RegistryResult<Json<Page<ElderSummary>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        ListRegistrationsUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let page = use_case.elders(&list_params(query)).await?;
    Ok(Json(page.map(ElderSummary::from)))
}

/// GET /api/staff/elders/{id}
pub async fn elder_detail<R>(
    State(state): State<RegistryAppState<R>>,
    Path(id): Path<Uuid>,
) -> RegistryResult<Json<ElderDetail>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        ListRegistrationsUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let elder = use_case.elder(ElderId::from_uuid(id)).await?;
    Ok(Json(elder.into()))
}

async fn review_elder_with<R>(
    state: &RegistryAppState<R>,
    id: Uuid,
    decision: ReviewDecision,
    staff: &StaffMember,
) -> RegistryResult<Json<ReviewResponse<ElderDetail>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case = ReviewUseCase::new(state.repo.clone(), state.repo.clone());
    let elder = use_case
        .review_elder(ElderId::from_uuid(id), &decision, &staff.name)
        .await?;

    Ok(Json(ReviewResponse {
        message: format!(
            "Registration {} has been {}.",
            elder.registration_number,
            decision.verb()
        ),
        registration: elder.into(),
    }))
}

/// POST /api/staff/elders/{id}
pub async fn review_elder<R>(
    State(state): State<RegistryAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> RegistryResult<Json<ReviewResponse<ElderDetail>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let decision = ReviewDecision::parse(&req.action, req.rejection_reason.as_deref())?;
    review_elder_with(&state, id, decision, &staff).await
}

/// POST /api/staff/elders/{id}/approve
pub async fn approve_elder<R>(
    State(state): State<RegistryAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
) -> RegistryResult<Json<ReviewResponse<ElderDetail>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    review_elder_with(&state, id, ReviewDecision::Approve, &staff).await
}

/// POST /api/staff/elders/{id}/reject
pub async fn reject_elder<R>(
    State(state): State<RegistryAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<RejectRequest>,
) -> RegistryResult<Json<ReviewResponse<ElderDetail>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let decision = ReviewDecision::reject(&req.reason)?;
    review_elder_with(&state, id, decision, &staff).await
}

/// POST /api/staff/elders/bulk
pub async fn bulk_review_elders<R>(
    State(state): State<RegistryAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    JsonBody(req): JsonBody<BulkReviewRequest>,
) -> RegistryResult<Json<BulkResponse>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let decision = ReviewDecision::parse(&req.action, req.rejection_reason.as_deref())?;
    let ids: Vec<ElderId> = req.ids.into_iter().map(ElderId::from_uuid).collect();

    let use_case = ReviewUseCase::new(state.repo.clone(), state.repo.clone());
    let updated = use_case
        .bulk_review_elders(&ids, &decision, &staff.name)
        .await?;

    Ok(Json(BulkResponse {
        updated,
        message: format!("{} elder(s) {}.", updated, decision.verb()),
    }))
}

// ============================================================================
// Staff: volunteers
// ============================================================================

/// GET /api/staff/volunteers
pub async fn list_volunteers<R>(
    State(state): State<RegistryAppState<R>>,
    Query(query): Query<ListQueryParams>,
) -> RegistryResult<Json<Page<VolunteerSummary>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        ListRegistrationsUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let page = use_case.volunteers(&list_params(query)).await?;
    Ok(Json(page.map(VolunteerSummary::from)))
}

/// GET /api/staff/volunteers/{id}
pub async fn volunteer_detail<R>(
    State(state): State<RegistryAppState<R>>,
    Path(id): Path<Uuid>,
) -> RegistryResult<Json<VolunteerDetail>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        ListRegistrationsUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let volunteer = use_case.volunteer(VolunteerId::from_uuid(id)).await?;
    Ok(Json(volunteer.into()))
}

async fn review_volunteer_with<R>(
    state: &RegistryAppState<R>,
    id: Uuid,
    decision: ReviewDecision,
    staff: &StaffMember,
) -> RegistryResult<Json<ReviewResponse<VolunteerDetail>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let use_case = ReviewUseCase::new(state.repo.clone(), state.repo.clone());
    let volunteer = use_case
        .review_volunteer(VolunteerId::from_uuid(id), &decision, &staff.name)
        .await?;

    Ok(Json(ReviewResponse {
        message: format!(
            "Volunteer {} has been {}.",
            volunteer.volunteer_number,
            decision.verb()
        ),
        registration: volunteer.into(),
    }))
}

/// POST /api/staff/volunteers/{id}
pub async fn review_volunteer<R>(
    State(state): State<RegistryAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> RegistryResult<Json<ReviewResponse<VolunteerDetail>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let decision = ReviewDecision::parse(&req.action, req.rejection_reason.as_deref())?;
    review_volunteer_with(&state, id, decision, &staff).await
}

/// POST /api/staff/volunteers/{id}/approve
pub async fn approve_volunteer<R>(
    State(state): State<RegistryAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
) -> RegistryResult<Json<ReviewResponse<VolunteerDetail>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    review_volunteer_with(&state, id, ReviewDecision::Approve, &staff).await
}

/// POST /api/staff/volunteers/{id}/reject
pub async fn reject_volunteer<R>(
    State(state): State<RegistryAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<RejectRequest>,
) -> RegistryResult<Json<ReviewResponse<VolunteerDetail>>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let decision = ReviewDecision::reject(&req.reason)?;
    review_volunteer_with(&state, id, decision, &staff).await
}

/// POST /api/staff/volunteers/bulk
pub async fn bulk_review_volunteers<R>(
    State(state): State<RegistryAppState<R>>,
    Extension(staff): Extension<StaffMember>,
    JsonBody(req): JsonBody<BulkReviewRequest>,
) -> RegistryResult<Json<BulkResponse>>
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let decision = ReviewDecision::parse(&req.action, req.rejection_reason.as_deref())?;
    let ids: Vec<VolunteerId> = req.ids.into_iter().map(VolunteerId::from_uuid).collect();

    let use_case = ReviewUseCase::new(state.repo.clone(), state.repo.clone());
    let updated = use_case
        .bulk_review_volunteers(&ids, &decision, &staff.name)
        .await?;

    Ok(Json(BulkResponse {
        updated,
        message: format!("{} volunteer(s) {}.", updated, decision.verb()),
    }))
}
