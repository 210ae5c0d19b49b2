//! Verification of the administrative service credential.
//!
//! Account deletion goes through an elevated credential configured on the
//! server. Before any delete is attempted, the credential's embedded
//! `role` claim must equal the expected elevated role; a credential
//! carrying the public/anonymous role (or no role claim at all) is a
//! configuration error and is rejected with a descriptive message.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use capture_core::config::AuthConfig;
use capture_core::error::AppError;

/// The payload fields we care about inside the service credential.
#[derive(Debug, Deserialize)]
struct ServicePayload {
    /// Embedded role claim.
    role: Option<String>,
}

/// Verifies that the configured service credential carries the elevated
/// role claim.
#[derive(Debug, Clone)]
pub struct ServiceRoleVerifier {
    /// The configured credential (a JWT).
    service_role_key: String,
    /// Expected elevated role claim value.
    expected_role: String,
    /// Public/anonymous role claim value, always rejected.
    anon_role: String,
}

impl ServiceRoleVerifier {
    /// Creates a verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            service_role_key: config.service_role_key.clone(),
            expected_role: config.service_role_name.clone(),
            anon_role: config.anon_role_name.clone(),
        }
    }

    /// Checks the configured credential and returns it for use.
    ///
    /// The credential is issued by the platform, so only its payload is
    /// inspected here; signature verification is the platform's job when
    /// the credential is presented to it.
    pub fn verified_key(&self) -> Result<&str, AppError> {
        if self.service_role_key.is_empty() {
            return Err(AppError::configuration(
                "Service role key is not configured",
            ));
        }

        let role = decode_role_claim(&self.service_role_key)?;

        match role {
            Some(role) if role == self.expected_role => Ok(&self.service_role_key),
            Some(role) if role == self.anon_role => Err(AppError::configuration(format!(
                "Configured service key carries the '{}' role; the '{}' key is required",
                self.anon_role, self.expected_role
            ))),
            Some(role) => Err(AppError::configuration(format!(
                "Configured service key carries unexpected role '{role}'"
            ))),
            None => Err(AppError::configuration(
                "Configured service key has no role claim",
            )),
        }
    }
}

/// Decodes the `role` claim from a JWT payload without verifying the
/// signature.
fn decode_role_claim(token: &str) -> Result<Option<String>, AppError> {
    let payload_b64 = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AppError::configuration("Service key is not a valid JWT"))?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|e| AppError::configuration(format!("Service key payload is not base64: {e}")))?;

    let parsed: ServicePayload = serde_json::from_slice(&payload)
        .map_err(|e| AppError::configuration(format!("Service key payload is not JSON: {e}")))?;

    Ok(parsed.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_jwt(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    fn verifier(key: String) -> ServiceRoleVerifier {
        ServiceRoleVerifier {
            service_role_key: key,
            expected_role: "service_role".into(),
            anon_role: "anon".into(),
        }
    }

    #[test]
    fn accepts_the_elevated_role() {
        let key = fake_jwt(serde_json::json!({ "role": "service_role" }));
        assert!(verifier(key).verified_key().is_ok());
    }

    #[test]
    fn rejects_the_anon_role() {
        let key = fake_jwt(serde_json::json!({ "role": "anon" }));
        let err = verifier(key).verified_key().unwrap_err();
        assert!(err.message.contains("anon"));
    }

    #[test]
    fn rejects_a_missing_role_claim() {
        let key = fake_jwt(serde_json::json!({ "iss": "platform" }));
        assert!(verifier(key).verified_key().is_err());
    }

    #[test]
    fn rejects_an_empty_configuration() {
        assert!(verifier(String::new()).verified_key().is_err());
    }
}
