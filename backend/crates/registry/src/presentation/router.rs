//! Registry Router
//!
//! Public routes are meant to be nested under `/api`, staff routes under
//! `/api/staff` behind the staff bearer-token guard.

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::RegistryConfig;
use crate::domain::repository::{ElderRepository, VolunteerRepository};
use crate::infra::postgres::PgRegistryRepository;
use crate::presentation::handlers::{self, RegistryAppState};

/// Public and staff halves of the registry API
pub struct RegistryRouters {
    pub public: Router,
    pub staff: Router,
}

/// Create the registry routers with PostgreSQL repository
pub fn registry_router(repo: PgRegistryRepository, config: RegistryConfig) -> RegistryRouters {
    registry_router_generic(repo, config)
}

/// Create the registry routers for any repository implementation
pub fn registry_router_generic<R>(repo: R, config: RegistryConfig) -> RegistryRouters
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    let state = RegistryAppState::new(repo, config);
    RegistryRouters {
        public: public_routes(state.clone()),
        staff: staff_routes(state),
    }
}

pub fn public_routes<R>(state: RegistryAppState<R>) -> Router
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/elders", post(handlers::register_elder::<R>))
        .route("/volunteers", post(handlers::register_volunteer::<R>))
        .route("/elders/status/{number}", get(handlers::elder_status::<R>))
        .route(
            "/volunteers/status/{number}",
            get(handlers::volunteer_status::<R>),
        )
        .route("/elders/{number}/id-card", get(handlers::elder_id_card::<R>))
        .route(
            "/volunteers/{number}/id-card",
            get(handlers::volunteer_id_card::<R>),
        )
        .with_state(state)
}

pub fn staff_routes<R>(state: RegistryAppState<R>) -> Router
where
    R: ElderRepository + VolunteerRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/elders", get(handlers::list_elders::<R>))
        .route("/elders/bulk", post(handlers::bulk_review_elders::<R>))
        .route(
            "/elders/{id}",
            get(handlers::elder_detail::<R>).post(handlers::review_elder::<R>),
        )
        .route("/elders/{id}/approve", post(handlers::approve_elder::<R>))
        .route("/elders/{id}/reject", post(handlers::reject_elder::<R>))
        .route("/volunteers", get(handlers::list_volunteers::<R>))
        .route(
            "/volunteers/bulk",
            post(handlers::bulk_review_volunteers::<R>),
        )
        .route(
            "/volunteers/{id}",
            get(handlers::volunteer_detail::<R>).post(handlers::review_volunteer::<R>),
        )
        .route(
            "/volunteers/{id}/approve",
            post(handlers::approve_volunteer::<R>),
        )
        .route(
            "/volunteers/{id}/reject",
            post(handlers::reject_volunteer::<R>),
        )
        .with_state(state)
}
