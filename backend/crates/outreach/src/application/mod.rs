//! Application Layer - Use Cases

pub mod config;
pub mod donations;
pub mod inquiries;
pub mod stats;
pub mod testimonials;

pub use donations::{
    DONATION_THANKS, DonationAction, DonationListParams, ManageDonationsUseCase,
    SubmitDonationUseCase,
};
pub use inquiries::{
    INQUIRY_THANKS, InquiryAction, InquiryListParams, ManageInquiriesUseCase, SubmitInquiryUseCase,
};
pub use stats::{OutreachDashboard, OutreachOverview, OutreachStatsUseCase};
pub use testimonials::TestimonialsUseCase;
