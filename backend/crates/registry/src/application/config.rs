//! Application Configuration
//!
//! Configuration for the registry application layer.

/// Organisation printed on ID cards when nothing else is configured.
pub const DEFAULT_ORGANIZATION_NAME: &str = "VRUDHASHRAM KAMALBASANT";

/// Registry application configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// How many times a registration recounts its bucket after losing a
    /// number to a concurrent registration
    pub allocation_attempts: u32,
    /// Youngest accepted elder
    pub elder_min_age: i32,
    /// Youngest accepted volunteer
    pub volunteer_min_age: i32,
    /// Staff list page size
    pub staff_page_size: u32,
    /// Pending registrations shown on the staff dashboard
    pub dashboard_recent_limit: u32,
    /// Organisation name on ID cards
    pub organization_name: String,
    /// Extra footer line on every ID card
    pub id_card_footer_note: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            allocation_attempts: 5,
            elder_min_age: 60,
            volunteer_min_age: 18,
            staff_page_size: 20,
            dashboard_recent_limit: 5,
            organization_name: DEFAULT_ORGANIZATION_NAME.to_string(),
            id_card_footer_note: None,
        }
    }
}

impl RegistryConfig {
    /// Create config for development: cards are marked as specimens
    pub fn development() -> Self {
        Self {
            id_card_footer_note: Some("SPECIMEN - NOT VALID".to_string()),
            ..Default::default()
        }
    }

    pub fn with_organization_name(mut self, name: impl Into<String>) -> Self {
        self.organization_name = name.into();
        self
    }

    /// Attempts actually made; at least one.
    pub fn effective_allocation_attempts(&self) -> u32 {
        self.allocation_attempts.max(1)
    }
}
