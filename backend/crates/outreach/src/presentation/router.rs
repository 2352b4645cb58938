//! Outreach Router
//!
//! Same split as the registry: public routes under `/api`, staff routes
//! under `/api/staff`.

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::OutreachConfig;
use crate::domain::repository::{DonationRepository, InquiryRepository, TestimonialRepository};
use crate::infra::postgres::PgOutreachRepository;
use crate::presentation::handlers::{self, OutreachAppState};

pub struct OutreachRouters {
    pub public: Router,
    pub staff: Router,
}

/// Create the outreach routers with PostgreSQL repository
pub fn outreach_router(repo: PgOutreachRepository, config: OutreachConfig) -> OutreachRouters {
    outreach_router_generic(repo, config)
}

/// Create the outreach routers for any repository implementation
pub fn outreach_router_generic<R>(repo: R, config: OutreachConfig) -> OutreachRouters
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    let state = OutreachAppState::new(repo, config);
    OutreachRouters {
        public: public_routes(state.clone()),
        staff: staff_routes(state),
    }
}

pub fn public_routes<R>(state: OutreachAppState<R>) -> Router
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/donations", post(handlers::submit_donation::<R>))
        .route("/inquiries", post(handlers::submit_inquiry::<R>))
        .route("/testimonials", get(handlers::public_testimonials::<R>))
        .with_state(state)
}

pub fn staff_routes<R>(state: OutreachAppState<R>) -> Router
where
    R: DonationRepository + InquiryRepository + TestimonialRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        // Donations
        .route("/donations", get(handlers::list_donations::<R>))
        .route(
            "/donations/bulk",
            post(handlers::bulk_update_donations::<R>),
        )
        .route(
            "/donations/{id}",
            get(handlers::donation_detail::<R>).post(handlers::update_donation::<R>),
        )
        .route(
            "/donations/{id}/fulfill",
            post(handlers::fulfill_donation::<R>),
        )
        .route("/donations/{id}/cancel", post(handlers::cancel_donation::<R>))
        .route("/donations/{id}/reopen", post(handlers::reopen_donation::<R>))
        // Inquiries
        .route("/inquiries", get(handlers::list_inquiries::<R>))
        .route(
            "/inquiries/bulk",
            post(handlers::bulk_update_inquiries::<R>),
        )
        .route(
            "/inquiries/{id}",
            get(handlers::inquiry_detail::<R>).post(handlers::update_inquiry::<R>),
        )
        .route(
            "/inquiries/{id}/resolve",
            post(handlers::resolve_inquiry::<R>),
        )
        .route(
            "/inquiries/{id}/unresolve",
            post(handlers::unresolve_inquiry::<R>),
        )
        // Testimonials
        .route(
            "/testimonials",
            get(handlers::list_testimonials::<R>).post(handlers::create_testimonial::<R>),
        )
        .route(
            "/testimonials/bulk/activate",
            post(handlers::bulk_activate_testimonials::<R>),
        )
        .route(
            "/testimonials/bulk/deactivate",
            post(handlers::bulk_deactivate_testimonials::<R>),
        )
        .route(
            "/testimonials/{id}/activate",
            post(handlers::activate_testimonial::<R>),
        )
        .route(
            "/testimonials/{id}/deactivate",
            post(handlers::deactivate_testimonial::<R>),
        )
        .with_state(state)
}
