//! Application Configuration

/// Outreach application configuration
#[derive(Debug, Clone)]
pub struct OutreachConfig {
    /// Staff list page size
    pub staff_page_size: u32,
    /// Public testimonials page size
    pub testimonial_page_size: u32,
    /// Testimonials shown on the public overview
    pub testimonial_highlights: u32,
    /// Pending donations shown on the staff dashboard
    pub dashboard_recent_limit: u32,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            staff_page_size: 20,
            testimonial_page_size: 12,
            testimonial_highlights: 6,
            dashboard_recent_limit: 5,
        }
    }
}

impl OutreachConfig {
    /// Create config for development: small pages make paging easy to try
    pub fn development() -> Self {
        Self {
            staff_page_size: 5,
            testimonial_page_size: 4,
            ..Self::default()
        }
    }
}
