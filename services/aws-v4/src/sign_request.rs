use crate::canonical::{canonical_request_string, canonicalize_headers};
use crate::constants::{AWS4_HMAC_SHA256, X_AMZ_DATE};
use crate::signing::{calculate_signature, credential_scope, generate_signing_key, string_to_sign};
use crate::Credential;
use awsign_core::time::{format_iso8601, now, DateTime};
use awsign_core::{Result, SigningRequest};
use http::request::Parts;
use http::{header, HeaderName, HeaderValue};
use log::debug;

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

/// Headers computed by [`RequestSigner::sign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value of `x-amz-date`, e.g. `20150830T123600Z`.
    pub date: HeaderValue,
    /// Value of `authorization`, marked as sensitive.
    pub authorization: HeaderValue,
}

impl SignedHeaders {
    /// Attach both headers to `headers`, replacing any previous values.
    pub fn apply(self, headers: &mut http::HeaderMap) {
        headers.insert(HeaderName::from_static(X_AMZ_DATE), self.date);
        headers.insert(header::AUTHORIZATION, self.authorization);
    }
}

/// Intermediate values of one signing, all derived from the same instant.
struct Signed {
    scope: String,
    signed_headers: String,
    signature: String,
}

impl RequestSigner {
    /// Create a new builder for AWS V4 signer.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Service this signer signs for.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region this signer signs for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Calculate the signature only.
    ///
    /// The headers of `req` are signed as they are: callers must have set
    /// `x-amz-date` to `format_iso8601(time)` themselves and build the
    /// authorization header on their own.
    pub fn signature(
        &self,
        req: &SigningRequest,
        payload: &[u8],
        cred: &Credential,
        time: DateTime,
    ) -> Result<String> {
        Ok(self.calculate(req, payload, cred, time)?.signature)
    }

    /// Compute `x-amz-date` and `authorization` for the request.
    ///
    /// `req` is not modified, the returned headers must be attached by the
    /// caller (see [`SignedHeaders::apply`]).
    pub fn sign(
        &self,
        req: &SigningRequest,
        payload: &[u8],
        cred: &Credential,
    ) -> Result<SignedHeaders> {
        let now = self.time.unwrap_or_else(now);

        // The date header is signed, so it must be part of the canonical headers.
        let date = HeaderValue::try_from(format_iso8601(now))?;
        let mut req = req.clone();
        req.headers
            .insert(HeaderName::from_static(X_AMZ_DATE), date.clone());

        let signed = self.calculate(&req, payload, cred, now)?;

        let mut authorization = HeaderValue::from_str(&format!(
            "{AWS4_HMAC_SHA256}, Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id, signed.scope, signed.signed_headers, signed.signature
        ))?;
        authorization.set_sensitive(true);

        Ok(SignedHeaders {
            date,
            authorization,
        })
    }

    /// Sign `parts` in place by attaching `x-amz-date` and `authorization`.
    pub fn sign_request(&self, parts: &mut Parts, payload: &[u8], cred: &Credential) -> Result<()> {
        let req = SigningRequest::build(parts)?;
        let headers = self.sign(&req, payload, cred)?;

        headers.apply(&mut parts.headers);
        Ok(())
    }

    fn calculate(
        &self,
        req: &SigningRequest,
        payload: &[u8],
        cred: &Credential,
        time: DateTime,
    ) -> Result<Signed> {
        let headers = canonicalize_headers(&req.headers, &req.host)?;
        let creq = canonical_request_string(&req.method, &req.path, &req.query, &headers, payload)?;
        debug!("calculated canonical request: {creq}");

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = credential_scope(time, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        let string_to_sign = string_to_sign(time, &scope, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&cred.secret_access_key, time, &self.region, &self.service);
        let signature = calculate_signature(&signing_key, &string_to_sign);

        Ok(Signed {
            scope,
            signed_headers: headers.signed_headers,
            signature,
        })
    }
}
