//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::contact::{Email, PhoneNumber};
use kernel::error::app_error::ResultExt;
use kernel::error::conversions::unique_violation_constraint;
use kernel::error::kind::ErrorKind;
use kernel::id::{ElderId, VolunteerId};
use kernel::page::Page;
use kernel::search::contains_pattern;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::approval::Approval;
use crate::domain::entity::{elder::Elder, volunteer::Volunteer};
use crate::domain::repository::{ElderRepository, ListQuery, StatusCounts, VolunteerRepository};
use crate::domain::value_object::approval_status::ApprovalStatus;
use crate::domain::value_object::attachment::AttachmentRef;
use crate::domain::value_object::registration_number::RegistrationNumber;
use crate::error::{RegistryError, RegistryResult};

/// Unique constraint on `elders.registration_number`
pub const ELDER_NUMBER_CONSTRAINT: &str = "elders_registration_number_key";
/// Unique constraint on `volunteers.volunteer_number`
pub const VOLUNTEER_NUMBER_CONSTRAINT: &str = "volunteers_volunteer_number_key";

const ELDER_COLUMNS: &str = r#"
    id,
    registration_number,
    full_name,
    age,
    address,
    phone_number,
    photo,
    id_proof,
    guardian_name,
    guardian_contact,
    guardian_relationship,
    health_conditions,
    special_requirements,
    status,
    rejection_reason,
    approved_at,
    approved_by,
    created_at,
    updated_at
"#;

const VOLUNTEER_COLUMNS: &str = r#"
    id,
    volunteer_number,
    full_name,
    email,
    phone_number,
    address,
    age,
    profile_photo,
    skills,
    availability,
    experience,
    status,
    rejection_reason,
    approved_at,
    approved_by,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed registry repository
#[derive(Clone)]
pub struct PgRegistryRepository {
    pool: PgPool,
}

impl PgRegistryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// Map an insert failure, recognising a clash on the number column.
fn insert_error(err: sqlx::Error, constraint: &str, number: &RegistrationNumber) -> RegistryError {
    if unique_violation_constraint(&err) == Some(constraint) {
        RegistryError::DuplicateRegistrationNumber(number.to_string())
    } else {
        RegistryError::Database(err)
    }
}

#[derive(sqlx::FromRow)]
struct StatusCountsRow {
    total: i64,
    pending: i64,
    approved: i64,
    rejected: i64,
}

impl From<StatusCountsRow> for StatusCounts {
    fn from(row: StatusCountsRow) -> Self {
        Self {
            total: count(row.total),
            pending: count(row.pending),
            approved: count(row.approved),
            rejected: count(row.rejected),
        }
    }
}

const STATUS_COUNTS_SELECT: &str = r#"
    SELECT
        COUNT(*) AS total,
        COUNT(*) FILTER (WHERE status = 'pending') AS pending,
        COUNT(*) FILTER (WHERE status = 'approved') AS approved,
        COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
"#;

fn parse_approval(
    status: &str,
    rejection_reason: String,
    approved_at: Option<DateTime<Utc>>,
    approved_by: Option<String>,
) -> RegistryResult<Approval> {
    let status = ApprovalStatus::from_code(status)
        .ok_or_else(|| RegistryError::Internal(format!("Unknown approval status: {}", status)))?;
    Ok(Approval {
        status,
        approved_at,
        approved_by,
        rejection_reason,
    })
}

fn parse_number(raw: &str) -> RegistryResult<RegistrationNumber> {
    Ok(raw
        .parse::<RegistrationNumber>()
        .map_app_err(ErrorKind::InternalServerError, "Stored registration number is corrupt")?)
}

// ============================================================================
// Elder Repository Implementation
// ============================================================================

#[derive(sqlx::FromRow)]
struct ElderRow {
    id: Uuid,
    registration_number: String,
    full_name: String,
    age: i32,
    address: String,
    phone_number: Option<String>,
    photo: String,
    id_proof: String,
    guardian_name: String,
    guardian_contact: String,
    guardian_relationship: String,
    health_conditions: String,
    special_requirements: String,
    status: String,
    rejection_reason: String,
    approved_at: Option<DateTime<Utc>>,
    approved_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ElderRow {
    fn into_elder(self) -> RegistryResult<Elder> {
        Ok(Elder {
            id: ElderId::from_uuid(self.id),
            registration_number: parse_number(&self.registration_number)?,
            full_name: self.full_name,
            age: self.age,
            address: self.address,
            phone: self.phone_number.map(PhoneNumber::from_db),
            photo: AttachmentRef::from_db(self.photo),
            id_proof: AttachmentRef::from_db(self.id_proof),
            guardian_name: self.guardian_name,
            guardian_contact: PhoneNumber::from_db(self.guardian_contact),
            guardian_relationship: self.guardian_relationship,
            health_conditions: self.health_conditions,
            special_requirements: self.special_requirements,
            approval: parse_approval(
                &self.status,
                self.rejection_reason,
                self.approved_at,
                self.approved_by,
            )?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ElderRepository for PgRegistryRepository {
    async fn count_issued(&self, bucket_prefix: &str) -> RegistryResult<u64> {
        let issued = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM elders WHERE registration_number LIKE $1",
        )
        .bind(format!("{}%", bucket_prefix))
        .fetch_one(&self.pool)
        .await?;

        Ok(count(issued))
    }

    async fn insert(&self, elder: &Elder) -> RegistryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO elders (
                id,
                registration_number,
                full_name,
                age,
                address,
                phone_number,
                photo,
                id_proof,
                guardian_name,
                guardian_contact,
                guardian_relationship,
                health_conditions,
                special_requirements,
                status,
                rejection_reason,
                approved_at,
                approved_by,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(elder.id.as_uuid())
        .bind(elder.registration_number.to_string())
        .bind(&elder.full_name)
        .bind(elder.age)
        .bind(&elder.address)
        .bind(elder.phone.as_ref().map(PhoneNumber::as_str))
        .bind(elder.photo.as_str())
        .bind(elder.id_proof.as_str())
        .bind(&elder.guardian_name)
        .bind(elder.guardian_contact.as_str())
        .bind(&elder.guardian_relationship)
        .bind(&elder.health_conditions)
        .bind(&elder.special_requirements)
        .bind(elder.approval.status.code())
        .bind(&elder.approval.rejection_reason)
        .bind(elder.approval.approved_at)
        .bind(elder.approval.approved_by.as_deref())
        .bind(elder.created_at)
        .bind(elder.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, ELDER_NUMBER_CONSTRAINT, &elder.registration_number))?;

        Ok(())
    }

    async fn find_by_id(&self, id: ElderId) -> RegistryResult<Option<Elder>> {
        let row = sqlx::query_as::<_, ElderRow>(&format!(
            "SELECT {} FROM elders WHERE id = $1",
            ELDER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_elder()).transpose()
    }

    async fn find_by_number(&self, number: &str) -> RegistryResult<Option<Elder>> {
        let row = sqlx::query_as::<_, ElderRow>(&format!(
            "SELECT {} FROM elders WHERE registration_number = $1",
            ELDER_COLUMNS
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_elder()).transpose()
    }

    async fn save_approval(&self, elder: &Elder) -> RegistryResult<()> {
        sqlx::query(
            r#"
            UPDATE elders SET
                status = $2,
                rejection_reason = $3,
                approved_at = $4,
                approved_by = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(elder.id.as_uuid())
        .bind(elder.approval.status.code())
        .bind(&elder.approval.rejection_reason)
        .bind(elder.approval.approved_at)
        .bind(elder.approval.approved_by.as_deref())
        .bind(elder.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> RegistryResult<Page<Elder>> {
        const FILTER: &str = r#"
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR registration_number ILIKE $2
                   OR full_name ILIKE $2
                   OR guardian_name ILIKE $2)
        "#;

        let status = query.status.status().map(|s| s.code());
        let pattern = query.search.as_deref().map(contains_pattern);

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM elders {}", FILTER))
            .bind(status)
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await?;

        let window = query.page.resolve(count(total));

        let rows = sqlx::query_as::<_, ElderRow>(&format!(
            "SELECT {} FROM elders {} ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            ELDER_COLUMNS, FILTER
        ))
        .bind(status)
        .bind(pattern.as_deref())
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await?;

        let elders = rows
            .into_iter()
            .map(ElderRow::into_elder)
            .collect::<RegistryResult<Vec<_>>>()?;

        Ok(window.into_page(elders))
    }

    async fn status_counts(&self) -> RegistryResult<StatusCounts> {
        let row = sqlx::query_as::<_, StatusCountsRow>(&format!(
            "{} FROM elders",
            STATUS_COUNTS_SELECT
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn recent_pending(&self, limit: u32) -> RegistryResult<Vec<Elder>> {
        let rows = sqlx::query_as::<_, ElderRow>(&format!(
            "SELECT {} FROM elders WHERE status = 'pending' ORDER BY created_at DESC LIMIT $1",
            ELDER_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ElderRow::into_elder).collect()
    }
}

// ============================================================================
// Volunteer Repository Implementation
// ============================================================================

#[derive(sqlx::FromRow)]
struct VolunteerRow {
    id: Uuid,
    volunteer_number: String,
    full_name: String,
    email: String,
    phone_number: String,
    address: String,
    age: i32,
    profile_photo: Option<String>,
    skills: String,
    availability: String,
    experience: String,
    status: String,
    rejection_reason: String,
    approved_at: Option<DateTime<Utc>>,
    approved_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VolunteerRow {
    fn into_volunteer(self) -> RegistryResult<Volunteer> {
        Ok(Volunteer {
            id: VolunteerId::from_uuid(self.id),
            volunteer_number: parse_number(&self.volunteer_number)?,
            full_name: self.full_name,
            email: Email::from_db(self.email),
            phone: PhoneNumber::from_db(self.phone_number),
            address: self.address,
            age: self.age,
            profile_photo: self.profile_photo.map(AttachmentRef::from_db),
            skills: self.skills,
            availability: self.availability,
            experience: self.experience,
            approval: parse_approval(
                &self.status,
                self.rejection_reason,
                self.approved_at,
                self.approved_by,
            )?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl VolunteerRepository for PgRegistryRepository {
    async fn count_issued(&self, bucket_prefix: &str) -> RegistryResult<u64> {
        let issued = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM volunteers WHERE volunteer_number LIKE $1",
        )
        .bind(format!("{}%", bucket_prefix))
        .fetch_one(&self.pool)
        .await?;

        Ok(count(issued))
    }

    async fn insert(&self, volunteer: &Volunteer) -> RegistryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO volunteers (
                id,
                volunteer_number,
                full_name,
                email,
                phone_number,
                address,
                age,
                profile_photo,
                skills,
                availability,
                experience,
                status,
                rejection_reason,
                approved_at,
                approved_by,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(volunteer.id.as_uuid())
        .bind(volunteer.volunteer_number.to_string())
        .bind(&volunteer.full_name)
        .bind(volunteer.email.as_str())
        .bind(volunteer.phone.as_str())
        .bind(&volunteer.address)
        .bind(volunteer.age)
        .bind(volunteer.profile_photo.as_ref().map(AttachmentRef::as_str))
        .bind(&volunteer.skills)
        .bind(&volunteer.availability)
        .bind(&volunteer.experience)
        .bind(volunteer.approval.status.code())
        .bind(&volunteer.approval.rejection_reason)
        .bind(volunteer.approval.approved_at)
        .bind(volunteer.approval.approved_by.as_deref())
        .bind(volunteer.created_at)
        .bind(volunteer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, VOLUNTEER_NUMBER_CONSTRAINT, &volunteer.volunteer_number))?;

        Ok(())
    }

    async fn find_by_id(&self, id: VolunteerId) -> RegistryResult<Option<Volunteer>> {
        let row = sqlx::query_as::<_, VolunteerRow>(&format!(
            "SELECT {} FROM volunteers WHERE id = $1",
            VOLUNTEER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_volunteer()).transpose()
    }

    async fn find_by_number(&self, number: &str) -> RegistryResult<Option<Volunteer>> {
        let row = sqlx::query_as::<_, VolunteerRow>(&format!(
            "SELECT {} FROM volunteers WHERE volunteer_number = $1",
            VOLUNTEER_COLUMNS
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_volunteer()).transpose()
    }

    async fn save_approval(&self, volunteer: &Volunteer) -> RegistryResult<()> {
        sqlx::query(
            r#"
            UPDATE volunteers SET
                status = $2,
                rejection_reason = $3,
                approved_at = $4,
                approved_by = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(volunteer.id.as_uuid())
        .bind(volunteer.approval.status.code())
        .bind(&volunteer.approval.rejection_reason)
        .bind(volunteer.approval.approved_at)
        .bind(volunteer.approval.approved_by.as_deref())
        .bind(volunteer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> RegistryResult<Page<Volunteer>> {
        const FILTER: &str = r#"
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR volunteer_number ILIKE $2
                   OR full_name ILIKE $2
                   OR email ILIKE $2)
        "#;

        let status = query.status.status().map(|s| s.code());
        let pattern = query.search.as_deref().map(contains_pattern);

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM volunteers {}", FILTER))
                .bind(status)
                .bind(pattern.as_deref())
                .fetch_one(&self.pool)
                .await?;

        let window = query.page.resolve(count(total));

        let rows = sqlx::query_as::<_, VolunteerRow>(&format!(
            "SELECT {} FROM volunteers {} ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            VOLUNTEER_COLUMNS, FILTER
        ))
        .bind(status)
        .bind(pattern.as_deref())
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await?;

        let volunteers = rows
            .into_iter()
            .map(VolunteerRow::into_volunteer)
            .collect::<RegistryResult<Vec<_>>>()?;

        Ok(window.into_page(volunteers))
    }

    async fn status_counts(&self) -> RegistryResult<StatusCounts> {
        let row = sqlx::query_as::<_, StatusCountsRow>(&format!(
            "{} FROM volunteers",
            STATUS_COUNTS_SELECT
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn recent_pending(&self, limit: u32) -> RegistryResult<Vec<Volunteer>> {
        let rows = sqlx::query_as::<_, VolunteerRow>(&format!(
            "SELECT {} FROM volunteers WHERE status = 'pending' ORDER BY created_at DESC LIMIT $1",
            VOLUNTEER_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(VolunteerRow::into_volunteer).collect()
    }
}
