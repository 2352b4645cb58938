//! ID Card Content
//!
//! What goes on a card, independent of how it is drawn. Renderers turn an
//! [`IdCard`] into document bytes.

use chrono::Datelike;

use crate::domain::entity::{elder::Elder, volunteer::Volunteer};
use crate::domain::value_object::registration_number::{RegistrationKind, RegistrationNumber};
use crate::error::RegistryResult;

pub const PHOTO_NOT_AVAILABLE: &str = "Photo Not Available";
pub const SIGNATURE_LINE: &str = "Authorized Signature";
pub const VALIDITY_LINE: &str = "Valid until further notice";

/// How a line is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Organisation name and card title
    Header,
    Photo,
    /// Holder's name
    Name,
    Detail,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub role: LineRole,
    pub text: String,
}

impl CardLine {
    fn new(role: LineRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// A card ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCard {
    pub number: RegistrationNumber,
    pub lines: Vec<CardLine>,
}

impl IdCard {
    pub fn for_volunteer(volunteer: &Volunteer, organization: &str) -> Self {
        Self::build(CardHolder {
            organization,
            number: volunteer.volunteer_number,
            photo: volunteer.profile_photo.as_ref().map(|p| p.as_str()),
            name: &volunteer.full_name,
            phone: volunteer.phone.as_str(),
            member_since: volunteer.approval.approved_at.map(|at| at.year()),
        })
    }

    pub fn for_elder(elder: &Elder, organization: &str) -> Self {
        Self::build(CardHolder {
            organization,
            number: elder.registration_number,
            photo: Some(elder.photo.as_str()),
            name: &elder.full_name,
            phone: elder.contact_phone().as_str(),
            member_since: elder.approval.approved_at.map(|at| at.year()),
        })
    }

    fn build(holder: CardHolder<'_>) -> Self {
        let title = match holder.number.kind() {
            RegistrationKind::Elder => "ELDER ID CARD",
            RegistrationKind::Volunteer => "VOLUNTEER ID CARD",
        };

        let mut lines = vec![
            CardLine::new(LineRole::Header, holder.organization),
            CardLine::new(LineRole::Header, title),
            CardLine::new(
                LineRole::Photo,
                holder.photo.unwrap_or(PHOTO_NOT_AVAILABLE),
            ),
            CardLine::new(LineRole::Name, holder.name),
            CardLine::new(LineRole::Detail, format!("ID: {}", holder.number)),
            CardLine::new(LineRole::Detail, format!("Phone: {}", holder.phone)),
        ];
        if let Some(year) = holder.member_since {
            lines.push(CardLine::new(
                LineRole::Detail,
                format!("Member Since: {year}"),
            ));
        }
        lines.push(CardLine::new(LineRole::Footer, SIGNATURE_LINE));
        lines.push(CardLine::new(LineRole::Footer, VALIDITY_LINE));

        Self {
            number: holder.number,
            lines,
        }
    }

    /// Download name, e.g. `volunteer_id_VL2025-0003.pdf`.
    pub fn file_name(&self) -> String {
        format!("{}_id_{}.pdf", self.number.kind().code(), self.number)
    }

    /// Append a line under the footer, e.g. a specimen marking.
    pub fn with_footer_note(mut self, note: &str) -> Self {
        self.lines.push(CardLine::new(LineRole::Footer, note));
        self
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }
}

struct CardHolder<'a> {
    organization: &'a str,
    number: RegistrationNumber,
    photo: Option<&'a str>,
    name: &'a str,
    phone: &'a str,
    member_since: Option<i32>,
}

/// Draws cards into a document format.
pub trait IdCardRenderer: Send + Sync {
    /// MIME type of the produced bytes
    fn content_type(&self) -> &'static str;

    fn render(&self, card: &IdCard) -> RegistryResult<Vec<u8>>;
}
