//! Unit tests for the outreach crate

#[cfg(test)]
mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::domain::entity::donation::DonationSubmission;
    use crate::domain::entity::inquiry::InquirySubmission;
    use crate::domain::entity::testimonial::TestimonialSubmission;

    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
    }

    pub fn minutes_later(minutes: i64) -> DateTime<Utc> {
        base_time() + Duration::minutes(minutes)
    }

    pub fn donation(donor: &str, donation_type: &str) -> DonationSubmission {
        DonationSubmission {
            donor_name: donor.to_string(),
            donor_email: format!("{}@example.org", donor.to_lowercase().replace(' ', ".")),
            donor_phone: "9876543210".to_string(),
            donation_type: donation_type.to_string(),
            description: format!("{} offered by {}", donation_type, donor),
            message: None,
        }
    }

    pub fn inquiry(name: &str, subject: &str) -> InquirySubmission {
        InquirySubmission {
            name: name.to_string(),
            email: format!("{}@example.org", name.to_lowercase()),
            phone: "+91 98765 43210".to_string(),
            subject: subject.to_string(),
            message: "Please call me back.".to_string(),
        }
    }

    pub fn testimonial(name: &str, is_active: bool) -> TestimonialSubmission {
        TestimonialSubmission {
            name: name.to_string(),
            relationship: "Volunteer".to_string(),
            rating: Some(4),
            comment: "A wonderful place to spend a Sunday.".to_string(),
            is_active: Some(is_active),
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use kernel::error::{app_error::AppError, kind::ErrorKind};

    use crate::error::OutreachError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            OutreachError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            OutreachError::DonationNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            OutreachError::TestimonialNotFound.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            OutreachError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_app_error() {
        let err: OutreachError = AppError::bad_request("Email is invalid").into();
        assert!(matches!(err, OutreachError::Validation(ref m) if m == "Email is invalid"));
    }
}

#[cfg(test)]
mod donation_tests {
    use std::sync::Arc;

    use tokio_test::{assert_err, assert_ok};

    use super::fixtures::{donation, minutes_later};
    use crate::application::config::OutreachConfig;
    use crate::application::{
        DonationAction, DonationListParams, ManageDonationsUseCase, SubmitDonationUseCase,
    };
    use crate::domain::value_object::donation::DonationStatus;
    use crate::error::OutreachError;
    use crate::infra::memory::InMemoryOutreachRepository;

    #[test]
    fn test_action_parsing() {
        assert_eq!(assert_ok!(DonationAction::parse("fulfill")), DonationAction::Fulfill);
        assert_eq!(assert_ok!(DonationAction::parse("pending")), DonationAction::Reopen);
        assert_err!(DonationAction::parse("approve"));
    }

    #[tokio::test]
    async fn test_fulfill_then_cancel() {
        let repo = Arc::new(InMemoryOutreachRepository::new());
        let submit = SubmitDonationUseCase::new(repo.clone());
        let manage = ManageDonationsUseCase::new(repo, Arc::new(OutreachConfig::default()));

        let offered = assert_ok!(submit.execute(donation("Ramesh Gupta", "food")).await);
        assert_eq!(offered.status, DonationStatus::Pending);

        let fulfilled = assert_ok!(
            manage
                .apply(offered.id, DonationAction::Fulfill, "meena")
                .await
        );
        assert_eq!(fulfilled.status, DonationStatus::Fulfilled);
        assert_eq!(fulfilled.fulfilled_by.as_deref(), Some("meena"));

        let cancelled = assert_ok!(
            manage
                .apply(offered.id, DonationAction::Cancel, "meena")
                .await
        );
        assert_eq!(cancelled.status, DonationStatus::Cancelled);
        assert!(cancelled.fulfilled_at.is_none());

        let stored = assert_ok!(manage.get(offered.id).await);
        assert_eq!(stored.status, DonationStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_invalid_type_is_not_stored() {
        let repo = Arc::new(InMemoryOutreachRepository::new());
        let submit = SubmitDonationUseCase::new(repo.clone());
        let manage = ManageDonationsUseCase::new(repo, Arc::new(OutreachConfig::default()));

        let result = submit.execute(donation("Ramesh", "furniture")).await;
        assert!(matches!(result, Err(OutreachError::Validation(_))));

        let page = assert_ok!(manage.list(&DonationListParams::default()).await);
        assert_eq!(page.total_items, 0);
    }

    #[tokio::test]
    async fn test_list_filters_and_search() {
        let repo = Arc::new(InMemoryOutreachRepository::new());
        let submit = SubmitDonationUseCase::new(repo.clone());
        let manage = ManageDonationsUseCase::new(repo, Arc::new(OutreachConfig::default()));

        let food = assert_ok!(
            submit
                .execute_at(donation("Ramesh Gupta", "food"), minutes_later(0))
                .await
        );
        assert_ok!(
            submit
                .execute_at(donation("Lata Iyer", "clothes"), minutes_later(1))
                .await
        );
        assert_ok!(
            submit
                .execute_at(donation("Anil Rao", "food"), minutes_later(2))
                .await
        );
        assert_ok!(manage.apply(food.id, DonationAction::Fulfill, "meena").await);

        let all = assert_ok!(manage.list(&DonationListParams::default()).await);
        let names: Vec<_> = all.items.iter().map(|d| d.donor_name.as_str()).collect();
        assert_eq!(names, ["Anil Rao", "Lata Iyer", "Ramesh Gupta"]);

        let pending_food = assert_ok!(
            manage
                .list(&DonationListParams {
                    status: Some("pending".into()),
                    donation_type: Some("food".into()),
                    ..DonationListParams::default()
                })
                .await
        );
        assert_eq!(pending_food.total_items, 1);
        assert_eq!(pending_food.items[0].donor_name, "Anil Rao");

        let by_email = assert_ok!(
            manage
                .list(&DonationListParams {
                    search: Some("LATA.IYER@".into()),
                    ..DonationListParams::default()
                })
                .await
        );
        assert_eq!(by_email.total_items, 1);

        // Unknown filter values are ignored
        let unknown = assert_ok!(
            manage
                .list(&DonationListParams {
                    status: Some("lost".into()),
                    ..DonationListParams::default()
                })
                .await
        );
        assert_eq!(unknown.total_items, 3);
    }

    #[tokio::test]
    async fn test_bulk_skips_unknown_and_duplicates() {
        let repo = Arc::new(InMemoryOutreachRepository::new());
        let submit = SubmitDonationUseCase::new(repo.clone());
        let manage = ManageDonationsUseCase::new(repo, Arc::new(OutreachConfig::default()));

        let first = assert_ok!(submit.execute(donation("Ramesh", "money")).await);
        let second = assert_ok!(submit.execute(donation("Lata", "other")).await);

        let ids = [
            first.id,
            second.id,
            first.id,
            kernel::id::DonationId::new(),
        ];
        let updated = assert_ok!(manage.bulk(&ids, DonationAction::Cancel, "meena").await);
        assert_eq!(updated, 2);

        let missing = manage
            .apply(kernel::id::DonationId::new(), DonationAction::Fulfill, "meena")
            .await;
        assert!(matches!(missing, Err(OutreachError::DonationNotFound)));
    }
}

#[cfg(test)]
mod inquiry_tests {
    use std::sync::Arc;

    use tokio_test::assert_ok;

    use super::fixtures::{inquiry, minutes_later};
    use crate::application::config::OutreachConfig;
    use crate::application::{
        InquiryAction, InquiryListParams, ManageInquiriesUseCase, SubmitInquiryUseCase,
    };
    use crate::infra::memory::InMemoryOutreachRepository;

    #[tokio::test]
    async fn test_resolution_filter() {
        let repo = Arc::new(InMemoryOutreachRepository::new());
        let submit = SubmitInquiryUseCase::new(repo.clone());
        let manage = ManageInquiriesUseCase::new(repo, Arc::new(OutreachConfig::default()));

        let visiting = assert_ok!(
            submit
                .execute_at(inquiry("Asha", "Visiting hours"), minutes_later(0))
                .await
        );
        assert_ok!(
            submit
                .execute_at(inquiry("Vikram", "Volunteering"), minutes_later(5))
                .await
        );

        let resolved = assert_ok!(
            manage
                .apply(visiting.id, InquiryAction::Resolve, "meena")
                .await
        );
        assert!(resolved.is_resolved);

        let open = assert_ok!(
            manage
                .list(&InquiryListParams {
                    status: Some("unresolved".into()),
                    ..InquiryListParams::default()
                })
                .await
        );
        assert_eq!(open.total_items, 1);
        assert_eq!(open.items[0].name, "Vikram");

        let by_subject = assert_ok!(
            manage
                .list(&InquiryListParams {
                    search: Some("visiting".into()),
                    ..InquiryListParams::default()
                })
                .await
        );
        assert_eq!(by_subject.items[0].id, visiting.id);

        let updated = assert_ok!(
            manage
                .bulk(&[visiting.id], InquiryAction::Unresolve, "meena")
                .await
        );
        assert_eq!(updated, 1);
        let all = assert_ok!(manage.list(&InquiryListParams::default()).await);
        assert!(all.items.iter().all(|i| !i.is_resolved));
    }
}

#[cfg(test)]
mod testimonial_tests {
    use std::sync::Arc;

    use tokio_test::assert_ok;

    use super::fixtures::{minutes_later, testimonial};
    use crate::application::TestimonialsUseCase;
    use crate::application::config::OutreachConfig;
    use crate::infra::memory::InMemoryOutreachRepository;

    #[tokio::test]
    async fn test_public_page_hides_inactive() {
        let repo = Arc::new(InMemoryOutreachRepository::new());
        let config = OutreachConfig {
            testimonial_page_size: 2,
            ..OutreachConfig::default()
        };
        let use_case = TestimonialsUseCase::new(repo, Arc::new(config));

        for (i, active) in [true, false, true, true].into_iter().enumerate() {
            assert_ok!(
                use_case
                    .create_at(testimonial(&format!("Guest {i}"), active), minutes_later(i as i64))
                    .await
            );
        }

        let first = assert_ok!(use_case.public_page(None).await);
        assert_eq!(first.total_items, 3);
        assert_eq!(first.total_pages, 2);
        let names: Vec<_> = first.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Guest 3", "Guest 2"]);

        // Out of range falls back to the last page
        let last = assert_ok!(use_case.public_page(Some("9")).await);
        assert_eq!(last.number, 2);
        assert_eq!(last.items[0].name, "Guest 0");

        let staff = assert_ok!(use_case.staff_page(None).await);
        assert_eq!(staff.total_items, 4);
    }

    #[tokio::test]
    async fn test_toggle_visibility() {
        let repo = Arc::new(InMemoryOutreachRepository::new());
        let use_case = TestimonialsUseCase::new(repo, Arc::new(OutreachConfig::default()));

        let shown = assert_ok!(use_case.create(testimonial("Neha", true)).await);
        let hidden = assert_ok!(use_case.set_active(shown.id, false).await);
        assert!(!hidden.is_active);
        assert_eq!(assert_ok!(use_case.public_page(None).await).total_items, 0);

        let updated = assert_ok!(use_case.bulk_set_active(&[shown.id, shown.id], true).await);
        assert_eq!(updated, 1);
        assert_eq!(assert_ok!(use_case.public_page(None).await).total_items, 1);
    }
}

#[cfg(test)]
mod stats_tests {
    use std::sync::Arc;

    use tokio_test::assert_ok;

    use super::fixtures::{donation, inquiry, minutes_later, testimonial};
    use crate::application::config::OutreachConfig;
    use crate::application::{
        DonationAction, ManageDonationsUseCase, OutreachStatsUseCase, SubmitDonationUseCase,
        SubmitInquiryUseCase, TestimonialsUseCase,
    };
    use crate::infra::memory::InMemoryOutreachRepository;

    #[tokio::test]
    async fn test_overview_and_dashboard() {
        let repo = Arc::new(InMemoryOutreachRepository::new());
        let config = Arc::new(OutreachConfig {
            testimonial_highlights: 2,
            dashboard_recent_limit: 1,
            ..OutreachConfig::default()
        });

        let donations = SubmitDonationUseCase::new(repo.clone());
        let first = assert_ok!(
            donations
                .execute_at(donation("Ramesh", "food"), minutes_later(0))
                .await
        );
        assert_ok!(
            donations
                .execute_at(donation("Lata", "medicines"), minutes_later(1))
                .await
        );
        assert_ok!(
            donations
                .execute_at(donation("Anil", "money"), minutes_later(2))
                .await
        );
        let manage = ManageDonationsUseCase::new(repo.clone(), config.clone());
        assert_ok!(manage.apply(first.id, DonationAction::Fulfill, "meena").await);

        assert_ok!(
            SubmitInquiryUseCase::new(repo.clone())
                .execute(inquiry("Asha", "Visiting hours"))
                .await
        );

        let testimonials = TestimonialsUseCase::new(repo.clone(), config.clone());
        for i in 0..3 {
            assert_ok!(
                testimonials
                    .create_at(testimonial(&format!("Guest {i}"), true), minutes_later(i))
                    .await
            );
        }

        let stats = OutreachStatsUseCase::new(repo.clone(), repo.clone(), repo, config);

        let overview = assert_ok!(stats.overview().await);
        assert_eq!(overview.total_donations, 3);
        assert_eq!(overview.testimonials.len(), 2);
        assert_eq!(overview.testimonials[0].name, "Guest 2");

        let dashboard = assert_ok!(stats.dashboard().await);
        assert_eq!(dashboard.donations.pending, 2);
        assert_eq!(dashboard.donations.fulfilled, 1);
        assert_eq!(dashboard.inquiries.unresolved, 1);
        assert_eq!(dashboard.recent_pending_donations.len(), 1);
        assert_eq!(dashboard.recent_pending_donations[0].donor_name, "Anil");
    }
}

#[cfg(test)]
mod router_tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use platform::staff::{StaffDirectory, require_staff};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::OutreachConfig;
    use crate::infra::memory::InMemoryOutreachRepository;
    use crate::presentation::router::outreach_router_generic;

    const TOKEN: &str = "meena-staff-token-0001";

    fn app(repo: &InMemoryOutreachRepository) -> Router {
        let routers = outreach_router_generic(repo.clone(), OutreachConfig::default());
        let directory = StaffDirectory::parse(&format!("meena:{TOKEN}")).unwrap();
        let staff = routers
            .staff
            .layer(from_fn_with_state(Arc::new(directory), require_staff));

        Router::new()
            .nest("/api", routers.public)
            .nest("/api/staff", staff)
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn staff_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_donation_form_then_fulfill() {
        let repo = InMemoryOutreachRepository::new();
        let app = app(&repo);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/donations",
                json!({
                    "donorName": "Ramesh Gupta",
                    "donorEmail": "ramesh@example.org",
                    "donorPhone": "9876543210",
                    "donationType": "clothes",
                    "description": "Winter blankets"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(
            body["message"],
            "Thank you for your donation! We will contact you soon."
        );
        let id = body["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(staff_request(
                "POST",
                &format!("/api/staff/donations/{id}/fulfill"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["record"]["status"], "fulfilled");
        assert_eq!(body["record"]["fulfilledBy"], "meena");

        let response = app
            .oneshot(staff_request(
                "GET",
                "/api/staff/donations?status=fulfilled&type=clothes",
                None,
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["totalItems"], 1);
        assert_eq!(body["items"][0]["donationTypeLabel"], "Clothes");
    }

    #[tokio::test]
    async fn test_invalid_inquiry_is_bad_request() {
        let repo = InMemoryOutreachRepository::new();
        let response = app(&repo)
            .oneshot(post_json(
                "/api/inquiries",
                json!({ "name": "Asha", "email": "not-an-email" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_staff_routes_need_token() {
        let repo = InMemoryOutreachRepository::new();
        let response = app(&repo)
            .oneshot(
                Request::get("/api/staff/inquiries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_donation_is_not_found() {
        let repo = InMemoryOutreachRepository::new();
        let response = app(&repo)
            .oneshot(staff_request(
                "GET",
                &format!("/api/staff/donations/{}", uuid::Uuid::new_v4()),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_testimonials_published_by_staff() {
        let repo = InMemoryOutreachRepository::new();
        let app = app(&repo);

        let response = app
            .clone()
            .oneshot(staff_request(
                "POST",
                "/api/staff/testimonials",
                Some(json!({
                    "name": "Neha Verma",
                    "relationship": "Daughter of Mrs. Verma",
                    "comment": "The staff treat my mother like family.",
                    "isActive": false
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["rating"], 5);
        let id = created["id"].as_str().unwrap().to_string();

        let public = json_body(
            app.clone()
                .oneshot(Request::get("/api/testimonials").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(public["totalItems"], 0);

        let response = app
            .clone()
            .oneshot(staff_request(
                "POST",
                "/api/staff/testimonials/bulk/activate",
                Some(json!({ "ids": [id] })),
            ))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["updated"], 1);

        let public = json_body(
            app.oneshot(Request::get("/api/testimonials").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(public["items"][0]["name"], "Neha Verma");
    }

    #[tokio::test]
    async fn test_malformed_body_is_problem_json() {
        let repo = InMemoryOutreachRepository::new();
        let response = app(&repo)
            .oneshot(
                Request::post("/api/inquiries")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
        assert_eq!(json_body(response).await["status"], 400);

        // Wrong shape on a staff route
        let response = app(&repo)
            .oneshot(staff_request(
                "POST",
                "/api/staff/donations/bulk",
                Some(json!({ "ids": "everything" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
    }
}
