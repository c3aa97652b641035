//! Bearer-token verification against the identity provider's signing keys.
//!
//! Tokens are issued elsewhere; this module only checks them. A token is
//! accepted when its `kid` resolves in the provider's key set, its algorithm
//! is allowed by configuration, the signature verifies, it has not expired,
//! and both `aud` and `iss` match. The `permissions` claim must be present.

use casting_core::error::{AuthError, AuthErrorKind};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::jwks::KeyStore;
use super::VerifyError;
use crate::config::AuthConfig;

/// Claims read from a verified access token.
///
/// `aud` and `iss` are checked by [`Validation`] and not kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// The caller behind a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Provider-assigned subject, if the token carried one.
    pub subject: Option<String>,
    /// Permission strings granted to the caller, e.g. `get:movies`.
    pub permissions: Vec<String>,
}

/// Verifies bearer tokens for one audience and issuer.
pub struct TokenVerifier {
    audience: String,
    issuer: String,
    algorithms: Vec<Algorithm>,
    keys: KeyStore,
}

impl TokenVerifier {
    /// Verifier that fetches keys from the configured JWKS URL.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::with_key_store(config, KeyStore::remote(config.jwks_url.clone()))
    }

    pub fn with_key_store(config: &AuthConfig, keys: KeyStore) -> Self {
        Self {
            audience: config.audience.clone(),
            issuer: config.issuer(),
            algorithms: config.algorithms.clone(),
            keys,
        }
    }

    /// Verify `token` and return the caller's identity and permissions.
    pub async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        let header = decode_header(token).map_err(|_| {
            AuthError::new(
                AuthErrorKind::MalformedPayload,
                "Unable to parse authentication token.",
            )
        })?;

        let kid = header.kid.ok_or_else(|| {
            AuthError::new(AuthErrorKind::MalformedPayload, "Authorization malformed.")
        })?;

        if !self.algorithms.contains(&header.alg) {
            return Err(AuthError::new(
                AuthErrorKind::InvalidSignature,
                format!("Signing algorithm {:?} is not accepted.", header.alg),
            )
            .into());
        }

        let jwk = self.keys.find(&kid).await?.ok_or_else(|| {
            AuthError::new(
                AuthErrorKind::InvalidSignature,
                "Unable to find the appropriate key.",
            )
        })?;

        let key = DecodingKey::from_jwk(&jwk).map_err(|e| {
            tracing::warn!(kid = %kid, error = %e, "Unusable key in JSON Web Key Set");
            AuthError::new(
                AuthErrorKind::InvalidSignature,
                "Unable to find the appropriate key.",
            )
        })?;

        let mut validation = Validation::new(header.alg);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);

        let claims = decode::<TokenClaims>(token, &key, &validation)
            .map_err(|e| classify(e.kind()))?
            .claims;

        let permissions = claims.permissions.ok_or_else(|| {
            AuthError::new(
                AuthErrorKind::MalformedPayload,
                "Permissions not included in JWT.",
            )
        })?;

        Ok(Principal {
            subject: claims.sub,
            permissions,
        })
    }
}

/// Map a `jsonwebtoken` failure onto the verification step that rejected it.
fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::new(AuthErrorKind::Expired, "Token expired."),
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::new(
            AuthErrorKind::InvalidClaims,
            "Incorrect claims. Please, check the audience and issuer.",
        ),
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm
        | ErrorKind::InvalidKeyFormat
        | ErrorKind::InvalidRsaKey(_)
        | ErrorKind::InvalidEcdsaKey => AuthError::new(
            AuthErrorKind::InvalidSignature,
            "Token signature could not be verified.",
        ),
        _ => AuthError::new(
            AuthErrorKind::MalformedPayload,
            "Unable to parse authentication token.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use jsonwebtoken::jwk::JwkSet;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    use super::*;

    const SECRET: &[u8] = b"casting-agency-test-signing-key!!";
    const KID: &str = "test-key";

    fn verifier() -> TokenVerifier {
        let keys: JwkSet = serde_json::from_value(json!({
            "keys": [{
                "kty": "oct",
                "kid": KID,
                "alg": "HS256",
                "k": "Y2FzdGluZy1hZ2VuY3ktdGVzdC1zaWduaW5nLWtleSEh",
            }]
        }))
        .unwrap();
        let mut config = AuthConfig::new("casting.test", "casting-agency");
        config.algorithms = vec![Algorithm::HS256];
        TokenVerifier::with_key_store(&config, KeyStore::with_keys(keys))
    }

    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    fn claims() -> Value {
        json!({
            "sub": "auth0|director",
            "aud": "casting-agency",
            "iss": "https://casting.test/",
            "iat": now(),
            "exp": now() + 3600,
            "permissions": ["get:movies", "patch:movies"],
        })
    }

    fn sign(claims: &Value, kid: Option<&str>) -> String {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = kid.map(str::to_string);
        encode(&header, claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    async fn rejection(token: &str) -> AuthError {
        match verifier().verify(token).await {
            Err(VerifyError::Rejected(err)) => err,
            other => panic!("expected an auth rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_token_yields_permissions() {
        let principal = verifier().verify(&sign(&claims(), Some(KID))).await.unwrap();
        assert_eq!(principal.subject.as_deref(), Some("auth0|director"));
        assert_eq!(principal.permissions, vec!["get:movies", "patch:movies"]);
    }

    #[tokio::test]
    async fn garbage_is_malformed() {
        let err = rejection("not-a-jwt").await;
        assert_eq!(err.kind, AuthErrorKind::MalformedPayload);
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn missing_kid_is_malformed() {
        let err = rejection(&sign(&claims(), None)).await;
        assert_eq!(err.kind, AuthErrorKind::MalformedPayload);
    }

    #[tokio::test]
    async fn unknown_kid_is_rejected() {
        let err = rejection(&sign(&claims(), Some("rotated-away"))).await;
        assert_eq!(err.kind, AuthErrorKind::InvalidSignature);
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn wrong_secret_fails_signature() {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(KID.to_string());
        let token = encode(
            &header,
            &claims(),
            &EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();
        let err = rejection(&token).await;
        assert_eq!(err.kind, AuthErrorKind::InvalidSignature);
    }

    #[tokio::test]
    async fn disallowed_algorithm_is_rejected() {
        let mut header = Header::new(Algorithm::HS512);
        header.kid = Some(KID.to_string());
        let token = encode(&header, &claims(), &EncodingKey::from_secret(SECRET)).unwrap();
        let err = rejection(&token).await;
        assert_eq!(err.kind, AuthErrorKind::InvalidSignature);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let mut claims = claims();
        // Well beyond the default 60-second leeway.
        claims["exp"] = json!(now() - 600);
        let err = rejection(&sign(&claims, Some(KID))).await;
        assert_eq!(err.kind, AuthErrorKind::Expired);
        assert_eq!(err.description, "Token expired.");
    }

    #[tokio::test]
    async fn wrong_audience_or_issuer_is_rejected() {
        let mut wrong_aud = claims();
        wrong_aud["aud"] = json!("someone-else");
        assert_eq!(
            rejection(&sign(&wrong_aud, Some(KID))).await.kind,
            AuthErrorKind::InvalidClaims
        );

        let mut wrong_iss = claims();
        wrong_iss["iss"] = json!("https://evil.test/");
        assert_eq!(
            rejection(&sign(&wrong_iss, Some(KID))).await.kind,
            AuthErrorKind::InvalidClaims
        );
    }

    #[tokio::test]
    async fn audience_may_be_a_list() {
        let mut claims = claims();
        claims["aud"] = json!(["casting-agency", "https://casting.test/userinfo"]);
        assert!(verifier().verify(&sign(&claims, Some(KID))).await.is_ok());
    }

    #[tokio::test]
    async fn missing_permissions_claim_is_malformed() {
        let mut claims = claims();
        claims.as_object_mut().unwrap().remove("permissions");
        let err = rejection(&sign(&claims, Some(KID))).await;
        assert_eq!(err.kind, AuthErrorKind::MalformedPayload);
        assert_eq!(err.description, "Permissions not included in JWT.");
    }

    #[tokio::test]
    async fn empty_permissions_are_accepted() {
        let mut claims = claims();
        claims["permissions"] = json!([]);
        let principal = verifier().verify(&sign(&claims, Some(KID))).await.unwrap();
        assert!(principal.permissions.is_empty());
        assert_matches!(principal.subject, Some(_));
    }
}
