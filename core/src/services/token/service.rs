//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service producing and consuming signed, time-bounded session tokens.
///
/// The service is effectively stateless: it holds precomputed keys derived
/// from a static secret and performs no I/O.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance from its configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_expiry(&self) -> i64 {
        self.config.refresh_token_expiry
    }

    /// Issues a signed token of the given kind for a user.
    ///
    /// The expiry is derived from the kind: access tokens are short-lived,
    /// refresh tokens long-lived, both taken from configuration. Pure
    /// computation, no side effects.
    pub fn issue(&self, user_id: Uuid, email: &str, kind: TokenKind) -> Result<String, DomainError> {
        let lifetime = match kind {
            TokenKind::Access => self.config.access_token_expiry,
            TokenKind::Refresh => self.config.refresh_token_expiry,
        };
        let claims = Claims::new(user_id, email, kind, lifetime);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Issues one access and one refresh token for a user
    pub fn issue_pair(&self, user_id: Uuid, email: &str) -> Result<TokenPair, DomainError> {
        let access_token = self.issue(user_id, email, TokenKind::Access)?;
        let refresh_token = self.issue(user_id, email, TokenKind::Refresh)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry,
            self.config.refresh_token_expiry,
        ))
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// Expired tokens fail with `TokenError::TokenExpired`; any other
    /// defect (bad signature, malformed payload, wrong issuer or audience)
    /// fails with `TokenError::InvalidTokenFormat`. Callers react to
    /// failure versus success and need not distinguish further.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::TokenExpired)
                } else {
                    DomainError::Token(TokenError::InvalidTokenFormat)
                }
            })?;

        Ok(token_data.claims)
    }

    /// Parses a token's payload without checking signature or expiry.
    ///
    /// Returns `None` when the string is not structurally a token. Only for
    /// non-authoritative inspection; authorization decisions must go
    /// through `verify`.
    pub fn decode_unchecked(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .ok()
            .map(|data| data.claims)
    }
}
