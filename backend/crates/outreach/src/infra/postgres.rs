//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::contact::Email;
use kernel::id::{DonationId, InquiryId, TestimonialId};
use kernel::page::Page;
use kernel::search::contains_pattern;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{donation::Donation, inquiry::Inquiry, testimonial::Testimonial};
use crate::domain::repository::{
    DonationCounts, DonationQuery, DonationRepository, InquiryCounts, InquiryQuery,
    InquiryRepository, TestimonialQuery, TestimonialRepository,
};
use crate::domain::value_object::donation::{DonationStatus, DonationType};
use crate::domain::value_object::rating::Rating;
use crate::error::{OutreachError, OutreachResult};

const DONATION_COLUMNS: &str = r#"
    id,
    donor_name,
    donor_email,
    donor_phone,
    donation_type,
    description,
    message,
    status,
    fulfilled_at,
    fulfilled_by,
    created_at,
    updated_at
"#;

const INQUIRY_COLUMNS: &str = r#"
    id,
    name,
    email,
    phone,
    subject,
    message,
    is_resolved,
    created_at
"#;

const TESTIMONIAL_COLUMNS: &str = r#"
    id,
    name,
    relationship,
    rating,
    comment,
    is_active,
    created_at
"#;

/// PostgreSQL-backed outreach repository
#[derive(Clone)]
pub struct PgOutreachRepository {
    pool: PgPool,
}

impl PgOutreachRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

// ============================================================================
// Donation Repository Implementation
// ============================================================================

#[derive(sqlx::FromRow)]
struct DonationRow {
    id: Uuid,
    donor_name: String,
    donor_email: String,
    donor_phone: String,
    donation_type: String,
    description: String,
    message: String,
    status: String,
    fulfilled_at: Option<DateTime<Utc>>,
    fulfilled_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DonationRow {
    fn into_donation(self) -> OutreachResult<Donation> {
        let donation_type = DonationType::from_code(&self.donation_type).ok_or_else(|| {
            OutreachError::Internal(format!("Unknown donation type: {}", self.donation_type))
        })?;
        let status = DonationStatus::from_code(&self.status).ok_or_else(|| {
            OutreachError::Internal(format!("Unknown donation status: {}", self.status))
        })?;

        Ok(Donation {
            id: DonationId::from_uuid(self.id),
            donor_name: self.donor_name,
            donor_email: Email::from_db(self.donor_email),
            donor_phone: self.donor_phone,
            donation_type,
            description: self.description,
            message: self.message,
            status,
            fulfilled_at: self.fulfilled_at,
            fulfilled_by: self.fulfilled_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DonationCountsRow {
    total: i64,
    pending: i64,
    fulfilled: i64,
    cancelled: i64,
}

impl DonationRepository for PgOutreachRepository {
    async fn insert(&self, donation: &Donation) -> OutreachResult<()> {
        sqlx::query(
            r#"
            INSERT INTO donations (
                id,
                donor_name,
                donor_email,
                donor_phone,
                donation_type,
                description,
                message,
                status,
                fulfilled_at,
                fulfilled_by,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(donation.id.as_uuid())
        .bind(&donation.donor_name)
        .bind(donation.donor_email.as_str())
        .bind(&donation.donor_phone)
        .bind(donation.donation_type.code())
        .bind(&donation.description)
        .bind(&donation.message)
        .bind(donation.status.code())
        .bind(donation.fulfilled_at)
        .bind(donation.fulfilled_by.as_deref())
        .bind(donation.created_at)
        .bind(donation.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: DonationId) -> OutreachResult<Option<Donation>> {
        let row = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {} FROM donations WHERE id = $1",
            DONATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_donation()).transpose()
    }

    async fn save_status(&self, donation: &Donation) -> OutreachResult<()> {
        sqlx::query(
            r#"
            UPDATE donations SET
                status = $2,
                fulfilled_at = $3,
                fulfilled_by = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(donation.id.as_uuid())
        .bind(donation.status.code())
        .bind(donation.fulfilled_at)
        .bind(donation.fulfilled_by.as_deref())
        .bind(donation.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, query: &DonationQuery) -> OutreachResult<Page<Donation>> {
        const FILTER: &str = r#"
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR donation_type = $2)
              AND ($3::text IS NULL
                   OR donor_name ILIKE $3
                   OR donor_email ILIKE $3
                   OR description ILIKE $3)
        "#;

        let status = query.status.map(|s| s.code());
        let donation_type = query.donation_type.map(|t| t.code());
        let pattern = query.search.as_deref().map(contains_pattern);

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM donations {}", FILTER))
                .bind(status)
                .bind(donation_type)
                .bind(pattern.as_deref())
                .fetch_one(&self.pool)
                .await?;

        let window = query.page.resolve(count(total));

        let rows = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {} FROM donations {} ORDER BY created_at DESC LIMIT $4 OFFSET $5",
            DONATION_COLUMNS, FILTER
        ))
        .bind(status)
        .bind(donation_type)
        .bind(pattern.as_deref())
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await?;

        let donations = rows
            .into_iter()
            .map(DonationRow::into_donation)
            .collect::<OutreachResult<Vec<_>>>()?;

        Ok(window.into_page(donations))
    }

    async fn counts(&self) -> OutreachResult<DonationCounts> {
        let row = sqlx::query_as::<_, DonationCountsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'fulfilled') AS fulfilled,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled
            FROM donations
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(DonationCounts {
            total: count(row.total),
            pending: count(row.pending),
            fulfilled: count(row.fulfilled),
            cancelled: count(row.cancelled),
        })
    }

    async fn recent_pending(&self, limit: u32) -> OutreachResult<Vec<Donation>> {
        let rows = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {} FROM donations WHERE status = 'pending' ORDER BY created_at DESC LIMIT $1",
            DONATION_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DonationRow::into_donation).collect()
    }
}

// ============================================================================
// Inquiry Repository Implementation
// ============================================================================

#[derive(sqlx::FromRow)]
struct InquiryRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
    is_resolved: bool,
    created_at: DateTime<Utc>,
}

impl InquiryRow {
    fn into_inquiry(self) -> Inquiry {
        Inquiry {
            id: InquiryId::from_uuid(self.id),
            name: self.name,
            email: Email::from_db(self.email),
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            is_resolved: self.is_resolved,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct InquiryCountsRow {
    total: i64,
    unresolved: i64,
}

impl InquiryRepository for PgOutreachRepository {
    async fn insert(&self, inquiry: &Inquiry) -> OutreachResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_inquiries (
                id, name, email, phone, subject, message, is_resolved, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(inquiry.id.as_uuid())
        .bind(&inquiry.name)
        .bind(inquiry.email.as_str())
        .bind(&inquiry.phone)
        .bind(&inquiry.subject)
        .bind(&inquiry.message)
        .bind(inquiry.is_resolved)
        .bind(inquiry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: InquiryId) -> OutreachResult<Option<Inquiry>> {
        let row = sqlx::query_as::<_, InquiryRow>(&format!(
            "SELECT {} FROM contact_inquiries WHERE id = $1",
            INQUIRY_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InquiryRow::into_inquiry))
    }

    async fn save_resolution(&self, inquiry: &Inquiry) -> OutreachResult<()> {
        sqlx::query("UPDATE contact_inquiries SET is_resolved = $2 WHERE id = $1")
            .bind(inquiry.id.as_uuid())
            .bind(inquiry.is_resolved)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list(&self, query: &InquiryQuery) -> OutreachResult<Page<Inquiry>> {
        const FILTER: &str = r#"
            WHERE ($1::boolean IS NULL OR is_resolved = $1)
              AND ($2::text IS NULL
                   OR name ILIKE $2
                   OR email ILIKE $2
                   OR subject ILIKE $2)
        "#;

        let resolved = query.resolution.wanted();
        let pattern = query.search.as_deref().map(contains_pattern);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM contact_inquiries {}",
            FILTER
        ))
        .bind(resolved)
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let window = query.page.resolve(count(total));

        let rows = sqlx::query_as::<_, InquiryRow>(&format!(
            "SELECT {} FROM contact_inquiries {} ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            INQUIRY_COLUMNS, FILTER
        ))
        .bind(resolved)
        .bind(pattern.as_deref())
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(window.into_page(rows.into_iter().map(InquiryRow::into_inquiry).collect()))
    }

    async fn counts(&self) -> OutreachResult<InquiryCounts> {
        let row = sqlx::query_as::<_, InquiryCountsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE NOT is_resolved) AS unresolved
            FROM contact_inquiries
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(InquiryCounts {
            total: count(row.total),
            unresolved: count(row.unresolved),
        })
    }
}

// ============================================================================
// Testimonial Repository Implementation
// ============================================================================

#[derive(sqlx::FromRow)]
struct TestimonialRow {
    id: Uuid,
    name: String,
    relationship: String,
    rating: i16,
    comment: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TestimonialRow {
    fn into_testimonial(self) -> OutreachResult<Testimonial> {
        Ok(Testimonial {
            id: TestimonialId::from_uuid(self.id),
            name: self.name,
            relationship: self.relationship,
            rating: Rating::new(i64::from(self.rating))
                .map_err(|e| OutreachError::Internal(e.to_string()))?,
            comment: self.comment,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

impl TestimonialRepository for PgOutreachRepository {
    async fn insert(&self, testimonial: &Testimonial) -> OutreachResult<()> {
        sqlx::query(
            r#"
            INSERT INTO testimonials (
                id, name, relationship, rating, comment, is_active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(testimonial.id.as_uuid())
        .bind(&testimonial.name)
        .bind(&testimonial.relationship)
        .bind(i16::from(testimonial.rating.value()))
        .bind(&testimonial.comment)
        .bind(testimonial.is_active)
        .bind(testimonial.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: TestimonialId) -> OutreachResult<Option<Testimonial>> {
        let row = sqlx::query_as::<_, TestimonialRow>(&format!(
            "SELECT {} FROM testimonials WHERE id = $1",
            TESTIMONIAL_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_testimonial()).transpose()
    }

    async fn save_visibility(&self, testimonial: &Testimonial) -> OutreachResult<()> {
        sqlx::query("UPDATE testimonials SET is_active = $2 WHERE id = $1")
            .bind(testimonial.id.as_uuid())
            .bind(testimonial.is_active)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list(&self, query: &TestimonialQuery) -> OutreachResult<Page<Testimonial>> {
        const FILTER: &str = "WHERE (NOT $1 OR is_active)";

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM testimonials {}", FILTER))
                .bind(query.active_only)
                .fetch_one(&self.pool)
                .await?;

        let window = query.page.resolve(count(total));

        let rows = sqlx::query_as::<_, TestimonialRow>(&format!(
            "SELECT {} FROM testimonials {} ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            TESTIMONIAL_COLUMNS, FILTER
        ))
        .bind(query.active_only)
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await?;

        let testimonials = rows
            .into_iter()
            .map(TestimonialRow::into_testimonial)
            .collect::<OutreachResult<Vec<_>>>()?;

        Ok(window.into_page(testimonials))
    }
}
