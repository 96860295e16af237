//! Restaurant JWT session tokens

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

const JWT_EXPIRY_HOURS: i64 = 24;

/// JWT claims for a restaurant session
///
/// Besides identity, the token carries the completeness flags that
/// page-level guards consume: whether the email is verified and whether
/// an active subscription exists at issue time.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Restaurant ID
    pub sub: String,
    /// Restaurant email
    pub email: String,
    /// Email verification completed
    pub email_verified: bool,
    /// Active subscription at issue time
    pub subscribed: bool,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated restaurant identity extracted from the session token
#[derive(Debug, Clone)]
pub struct RestaurantIdentity {
    pub restaurant_id: String,
    pub email: String,
    pub email_verified: bool,
    pub subscribed: bool,
}

impl From<SessionClaims> for RestaurantIdentity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            restaurant_id: claims.sub,
            email: claims.email,
            email_verified: claims.email_verified,
            subscribed: claims.subscribed,
        }
    }
}

impl RestaurantIdentity {
    /// Redirect hint for an account that cannot use the dashboard yet
    pub fn redirect_hint(&self) -> Option<&'static str> {
        if !self.email_verified {
            Some("/verify-email")
        } else if !self.subscribed {
            Some("/plans")
        } else {
            None
        }
    }
}

/// Create a session token for a restaurant
pub fn create_token(
    restaurant_id: &str,
    email: &str,
    email_verified: bool,
    subscribed: bool,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: restaurant_id.to_string(),
        email: email.to_string(),
        email_verified,
        subscribed,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a session token and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    let validation = Validation::default();
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::token_expired().with_redirect("/login")
            }
            _ => AppError::invalid_token("Invalid token").with_redirect("/login"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-at-least-32-characters!!";

    #[test]
    fn test_token_roundtrip() {
        let token = create_token("r-1", "owner@example.com", true, false, SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "r-1");
        assert_eq!(claims.email, "owner@example.com");
        assert!(claims.email_verified);
        assert!(!claims.subscribed);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("r-1", "owner@example.com", true, true, SECRET).unwrap();
        let err = verify_token(&token, "another-secret-with-32-characters!!").unwrap_err();
        assert_eq!(err.redirect_url.as_deref(), Some("/login"));
    }

    #[test]
    fn test_redirect_hints() {
        let unverified = RestaurantIdentity {
            restaurant_id: "r-1".into(),
            email: "a@b.c".into(),
            email_verified: false,
            subscribed: false,
        };
        assert_eq!(unverified.redirect_hint(), Some("/verify-email"));

        let unsubscribed = RestaurantIdentity {
            email_verified: true,
            ..unverified.clone()
        };
        assert_eq!(unsubscribed.redirect_hint(), Some("/plans"));

        let complete = RestaurantIdentity {
            email_verified: true,
            subscribed: true,
            ..unsubscribed.clone()
        };
        assert_eq!(complete.redirect_hint(), None);
    }
}
