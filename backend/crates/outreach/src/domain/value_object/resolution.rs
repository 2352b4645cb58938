//! Inquiry Resolution Filter

/// `?status=` filter on the inquiry list. Anything unrecognised means all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionFilter {
    #[default]
    All,
    Resolved,
    Unresolved,
}

impl ResolutionFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("resolved") => Self::Resolved,
            Some("unresolved") => Self::Unresolved,
            _ => Self::All,
        }
    }

    pub fn matches(&self, is_resolved: bool) -> bool {
        match self {
            Self::All => true,
            Self::Resolved => is_resolved,
            Self::Unresolved => !is_resolved,
        }
    }

    /// Value to compare `is_resolved` against, `None` for all
    pub fn wanted(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Resolved => Some(true),
            Self::Unresolved => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ResolutionFilter::parse(None), ResolutionFilter::All);
        assert_eq!(ResolutionFilter::parse(Some("resolved")), ResolutionFilter::Resolved);
        assert_eq!(ResolutionFilter::parse(Some(" unresolved ")), ResolutionFilter::Unresolved);
        assert_eq!(ResolutionFilter::parse(Some("yes")), ResolutionFilter::All);
        assert!(ResolutionFilter::Unresolved.matches(false));
        assert!(!ResolutionFilter::Resolved.matches(false));
    }
}
