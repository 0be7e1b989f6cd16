use super::{example_credential, init_signing_test, signature_of};
use anyhow::Result;
use awsign_aws_v4::{canonical_request_string, canonicalize_headers};
use awsign_core::{ErrorKind, SigningRequest};
use http::{HeaderMap, HeaderValue, Method, Request};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use pretty_assertions::assert_eq;

#[test]
fn test_escaped_path_is_signed_verbatim() -> Result<()> {
    let path = format!(
        "/{}",
        utf8_percent_encode("!@#$%^&*()_+-=;:'><,?.txt", NON_ALPHANUMERIC)
    );
    let req = SigningRequest::new(Method::HEAD, "bucket.s3.amazonaws.com", path.as_str());

    let headers = canonicalize_headers(&req.headers, &req.host)?;
    let creq = canonical_request_string(&req.method, &req.path, &req.query, &headers, b"")?;

    assert_eq!(creq.split('\n').nth(1), Some(path.as_str()));
    Ok(())
}

#[test]
fn test_query_with_special_characters() -> Result<()> {
    let req = Request::builder()
        .uri("https://bucket.s3.amazonaws.com/?prefix=a%20b%2Fc&delimiter=%2F&marker=x%2By")
        .body(())?;
    let (parts, _) = req.into_parts();
    let req = SigningRequest::build(&parts)?;

    let headers = canonicalize_headers(&req.headers, &req.host)?;
    let creq = canonical_request_string(&req.method, &req.path, &req.query, &headers, b"")?;

    assert_eq!(
        creq.split('\n').nth(2),
        Some("delimiter=%2F&marker=x%2By&prefix=a%20b%2Fc")
    );
    Ok(())
}

#[test]
fn test_header_value_with_inner_whitespace_is_kept() -> Result<()> {
    let mut headers = HeaderMap::new();
    headers.insert("x-amz-meta-note", HeaderValue::from_static("a  b"));

    let canonical = canonicalize_headers(&headers, "example.com")?;
    assert!(canonical.block.contains("x-amz-meta-note:a  b\n"));
    Ok(())
}

#[test]
fn test_non_utf8_header_is_rejected() -> Result<()> {
    let signer = init_signing_test("s3", "us-east-1");
    let req = SigningRequest::new(Method::GET, "example.com", "/").with_header(
        http::HeaderName::from_static("x-amz-meta-raw"),
        HeaderValue::from_bytes(&[b'a', 0xff])?,
    );

    let err = signer.sign(&req, b"", &example_credential()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    Ok(())
}

#[test]
fn test_query_not_decoding_to_utf8_is_rejected() -> Result<()> {
    let signer = init_signing_test("s3", "us-east-1");
    let req = Request::builder()
        .uri("https://bucket.s3.amazonaws.com/?key=%FF")
        .body(())?;
    let (mut parts, _) = req.into_parts();

    let err = signer
        .sign_request(&mut parts, b"", &example_credential())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(parts.headers.is_empty());
    Ok(())
}

#[test]
fn test_binary_payload() -> Result<()> {
    let signer = init_signing_test("s3", "us-east-1");
    let req = SigningRequest::new(Method::PUT, "bucket.s3.amazonaws.com", "/blob");

    let zeros = signer.sign(&req, &[0u8; 16], &example_credential())?;
    let ones = signer.sign(&req, &[1u8; 16], &example_credential())?;

    assert_ne!(
        signature_of(&zeros.authorization),
        signature_of(&ones.authorization)
    );
    Ok(())
}
