//! Staff Access Guard
//!
//! Staff endpoints sit behind a static bearer token per staff member,
//! configured as `STAFF_TOKENS="name:token,name:token"`. Only SHA-256 hashes
//! of the tokens are kept in memory.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::client::client_ip_for_log;
use crate::crypto::{constant_time_eq, random_token, sha256};

/// Shortest token accepted from configuration.
pub const MIN_TOKEN_LENGTH: usize = 16;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StaffConfigError {
    #[error("staff entry `{0}` must look like name:token")]
    MalformedEntry(String),

    #[error("staff token for `{name}` must be at least {min} characters")]
    TokenTooShort { name: String, min: usize },

    #[error("staff name `{0}` is listed twice")]
    DuplicateName(String),
}

/// Authenticated staff member, inserted into request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    pub name: String,
}

#[derive(Clone)]
struct StaffEntry {
    name: String,
    token_hash: [u8; 32],
}

/// Known staff tokens.
#[derive(Clone, Default)]
pub struct StaffDirectory {
    entries: Vec<StaffEntry>,
}

impl std::fmt::Debug for StaffDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        f.debug_struct("StaffDirectory")
            .field("staff", &names)
            .finish()
    }
}

impl StaffDirectory {
    /// Parse `name:token` pairs separated by commas. Blank entries are skipped.
    pub fn parse(raw: &str) -> Result<Self, StaffConfigError> {
        let mut entries: Vec<StaffEntry> = Vec::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, token) = entry
                .split_once(':')
                .map(|(n, t)| (n.trim(), t.trim()))
                .filter(|(n, t)| !n.is_empty() && !t.is_empty())
                .ok_or_else(|| StaffConfigError::MalformedEntry(entry.to_string()))?;

            if token.len() < MIN_TOKEN_LENGTH {
                return Err(StaffConfigError::TokenTooShort {
                    name: name.to_string(),
                    min: MIN_TOKEN_LENGTH,
                });
            }
            if entries.iter().any(|e| e.name == name) {
                return Err(StaffConfigError::DuplicateName(name.to_string()));
            }

            entries.push(StaffEntry {
                name: name.to_string(),
                token_hash: sha256(token.as_bytes()),
            });
        }

        Ok(Self { entries })
    }

    /// Single `dev` member with a fresh random token. Returns the token so
    /// it can be printed once at startup.
    pub fn development() -> (Self, String) {
        let token = random_token(32);
        let directory = Self {
            entries: vec![StaffEntry {
                name: "dev".to_string(),
                token_hash: sha256(token.as_bytes()),
            }],
        };
        (directory, token)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Match a presented token. Every entry is compared so the time taken
    /// does not depend on which member matched.
    pub fn authenticate(&self, token: &str) -> Option<StaffMember> {
        let presented = sha256(token.as_bytes());
        let mut matched = None;
        for entry in &self.entries {
            if constant_time_eq(&entry.token_hash, &presented) && matched.is_none() {
                matched = Some(StaffMember {
                    name: entry.name.clone(),
                });
            }
        }
        matched
    }
}

/// Token from `Authorization: Bearer <token>`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware that requires a known staff token.
///
/// On success the [`StaffMember`] is available to handlers as
/// `Extension<StaffMember>`.
pub async fn require_staff(
    State(directory): State<Arc<StaffDirectory>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let member = extract_bearer_token(req.headers()).and_then(|t| directory.authenticate(t));

    let Some(member) = member else {
        let direct_ip = req
            .extensions()
            .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
            .map(|info| info.0.ip());
        tracing::warn!(
            client_ip = %client_ip_for_log(req.headers(), direct_ip),
            path = %req.uri().path(),
            "Rejected staff request"
        );
        return Err((
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
        )
            .into_response());
    };

    tracing::debug!(staff = %member.name, path = %req.uri().path(), "Staff request");
    req.extensions_mut().insert(member);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    const MEENA_TOKEN: &str = "meena-token-0123456789";
    const RAVI_TOKEN: &str = "ravi-token-0123456789";

    fn directory() -> StaffDirectory {
        StaffDirectory::parse(&format!("meena:{MEENA_TOKEN}, ravi:{RAVI_TOKEN}")).unwrap()
    }

    #[test]
    fn test_parse_and_authenticate() {
        let dir = directory();
        assert_eq!(dir.len(), 2);
        assert_eq!(
            dir.authenticate(RAVI_TOKEN),
            Some(StaffMember {
                name: "ravi".to_string()
            })
        );
        assert_eq!(dir.authenticate("ravi-token-wrong"), None);
    }

    #[test]
    fn test_parse_rejects_bad_entries() {
        assert_eq!(
            StaffDirectory::parse("meena").unwrap_err(),
            StaffConfigError::MalformedEntry("meena".to_string())
        );
        assert!(matches!(
            StaffDirectory::parse("meena:short"),
            Err(StaffConfigError::TokenTooShort { .. })
        ));
        assert_eq!(
            StaffDirectory::parse(&format!("a:{MEENA_TOKEN},a:{RAVI_TOKEN}")).unwrap_err(),
            StaffConfigError::DuplicateName("a".to_string())
        );
        assert!(StaffDirectory::parse(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_development_directory() {
        let (dir, token) = StaffDirectory::development();
        assert_eq!(dir.authenticate(&token).unwrap().name, "dev");
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        assert_eq!(extract_bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    fn guarded_app() -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|Extension(member): Extension<StaffMember>| async move { member.name }),
            )
            .layer(axum::middleware::from_fn_with_state(
                Arc::new(directory()),
                require_staff,
            ))
    }

    #[tokio::test]
    async fn test_require_staff_rejects_missing_token() {
        let response = guarded_app()
            .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_require_staff_passes_member_through() {
        let response = guarded_app()
            .oneshot(
                Request::get("/whoami")
                    .header(header::AUTHORIZATION, format!("Bearer {MEENA_TOKEN}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"meena");
    }
}
