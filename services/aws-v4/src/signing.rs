//! String to sign, signing key derivation and signature calculation.

use std::fmt::{Debug, Formatter};

use awsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256, SHA256_LEN};
use awsign_core::time::{format_date, format_iso8601, DateTime};

use crate::constants::{AWS4_HMAC_SHA256, AWS4_KEY_PREFIX, AWS4_REQUEST};

/// Build the credential scope: `20150830/us-east-1/iam/aws4_request`.
pub fn credential_scope(time: DateTime, region: &str, service: &str) -> String {
    format!("{}/{region}/{service}/{AWS4_REQUEST}", format_date(time))
}

/// Build the string to sign.
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20150830T123600Z
/// 20150830/us-east-1/iam/aws4_request
/// <hex_sha256(canonical_request)>
/// ```
///
/// `time` must be the same instant advertised in the `x-amz-date` header.
pub fn string_to_sign(time: DateTime, scope: &str, canonical_request: &str) -> String {
    format!(
        "{AWS4_HMAC_SHA256}\n{}\n{scope}\n{}",
        format_iso8601(time),
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Key used to calculate the request signature.
///
/// It's only valid for one date, region and service. Don't persist it.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey([u8; SHA256_LEN]);

impl SigningKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

/// Every intermediate key of the signing key derivation.
///
/// ```text
/// kDate    = HMAC("AWS4" + secret, date)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "aws4_request")
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKeyChain {
    k_date: [u8; SHA256_LEN],
    k_region: [u8; SHA256_LEN],
    k_service: [u8; SHA256_LEN],
    k_signing: [u8; SHA256_LEN],
}

impl SigningKeyChain {
    /// Run the four HMAC stages in order.
    ///
    /// No stage is skipped, an empty region or service is still hashed.
    pub fn derive(secret: &str, time: DateTime, region: &str, service: &str) -> Self {
        let secret = format!("{AWS4_KEY_PREFIX}{secret}");

        let k_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
        let k_region = hmac_sha256(&k_date, region.as_bytes());
        let k_service = hmac_sha256(&k_region, service.as_bytes());
        let k_signing = hmac_sha256(&k_service, AWS4_REQUEST.as_bytes());

        Self {
            k_date,
            k_region,
            k_service,
            k_signing,
        }
    }

    /// Output of the date stage.
    pub fn k_date(&self) -> &[u8] {
        &self.k_date
    }

    /// Output of the region stage.
    pub fn k_region(&self) -> &[u8] {
        &self.k_region
    }

    /// Output of the service stage.
    pub fn k_service(&self) -> &[u8] {
        &self.k_service
    }

    /// Take the final stage as the signing key.
    pub fn into_signing_key(self) -> SigningKey {
        SigningKey(self.k_signing)
    }
}

impl Debug for SigningKeyChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyChain").finish_non_exhaustive()
    }
}

/// Derive the signing key for the given date, region and service.
pub fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> SigningKey {
    SigningKeyChain::derive(secret, time, region, service).into_signing_key()
}

/// Calculate the hex encoded signature of `string_to_sign`.
pub fn calculate_signature(key: &SigningKey, string_to_sign: &str) -> String {
    hex_hmac_sha256(key.as_bytes(), string_to_sign.as_bytes())
}
