//! Session tokens: HS256 JWTs minted by the backend with a shared secret

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stockroom_core::{Role, User};

/// Signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKeys(..)")
    }
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Mint a token for `user`, valid for `ttl`
    pub fn issue(&self, user: &User, ttl: Duration) -> Result<String, SessionError> {
        let claims = Claims::for_user(user, ttl);
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| SessionError::TokenCreation)
    }

    /// Verify and decode a token
    pub fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                _ => SessionError::InvalidToken,
            }
        })?;

        let claims = data.claims;
        if claims.is_expired() {
            return Err(SessionError::TokenExpired);
        }

        Ok(claims)
    }

    /// Verify a token and turn it into a user
    pub fn user_from_token(&self, token: &str) -> Result<User, SessionError> {
        self.verify(token)?.to_user()
    }
}

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Role identifier
    pub role: String,
    /// Granted permissions
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &User, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.clone(),
            name: user.display_name.clone(),
            role: user.role.as_str().to_string(),
            permissions: user.permissions.iter().cloned().collect(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Convert claims to a user; an unknown role is rejected
    pub fn to_user(&self) -> Result<User, SessionError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| SessionError::UnknownRole(self.role.clone()))?;

        Ok(User {
            id: self.sub.clone(),
            display_name: self.name.clone(),
            role,
            permissions: self.permissions.iter().cloned().collect(),
        })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Reasons a session token is not accepted
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Token creation failed")]
    TokenCreation,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new(b"test-secret")
    }

    #[test]
    fn issue_and_verify() {
        let user = User::new("u1", Role::Admin, ["inventory.view", "sku.view"])
            .with_display_name("Ada");
        let token = keys().issue(&user, Duration::hours(1)).unwrap();

        assert_eq!(keys().user_from_token(&token).unwrap(), user);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let user = User::new("u1", Role::Member, Vec::<String>::new());
        let token = SessionKeys::new(b"other").issue(&user, Duration::hours(1)).unwrap();
        assert_eq!(keys().verify(&token).unwrap_err(), SessionError::InvalidToken);
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = User::new("u1", Role::Member, Vec::<String>::new());
        let token = keys().issue(&user, Duration::hours(-2)).unwrap();
        assert_eq!(keys().verify(&token).unwrap_err(), SessionError::TokenExpired);
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(keys().verify("not.a.jwt").unwrap_err(), SessionError::InvalidToken);
        assert_eq!(keys().verify("").unwrap_err(), SessionError::InvalidToken);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let claims = Claims {
            sub: "u1".to_string(),
            name: None,
            role: "owner".to_string(),
            permissions: vec![],
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(
            keys().user_from_token(&token).unwrap_err(),
            SessionError::UnknownRole("owner".to_string())
        );
    }
}
