//! AWS SigV4 signer
//!
//! ```
//! use awsign_aws_v4::{Credential, RequestSigner};
//! use awsign_core::time::parse_rfc3339;
//!
//! # fn main() -> awsign_core::Result<()> {
//! let req = http::Request::get("https://iam.amazonaws.com/?Action=ListUsers&Version=2010-05-08")
//!     .body(())
//!     .expect("request must be valid");
//! let (mut parts, _) = req.into_parts();
//!
//! let cred = Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");
//! let signer = RequestSigner::new("iam", "us-east-1")
//!     .with_time(parse_rfc3339("2015-08-30T12:36:00Z")?);
//! signer.sign_request(&mut parts, b"", &cred)?;
//!
//! assert_eq!(parts.headers["x-amz-date"], "20150830T123600Z");
//! assert!(parts.headers.contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```

mod canonical;
pub use canonical::canonical_query_string;
pub use canonical::canonical_request_string;
pub use canonical::canonicalize_headers;
pub use canonical::CanonicalHeaders;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod signing;
pub use signing::calculate_signature;
pub use signing::credential_scope;
pub use signing::generate_signing_key;
pub use signing::string_to_sign;
pub use signing::SigningKey;
pub use signing::SigningKeyChain;

mod sign_request;
pub use sign_request::RequestSigner;
pub use sign_request::SignedHeaders;

mod constants;
pub use constants::AWS4_HMAC_SHA256;
pub use constants::X_AMZ_DATE;
