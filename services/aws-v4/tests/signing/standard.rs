use super::{example_credential, example_time, init_signing_test, signature_of, SECRET_ACCESS_KEY};
use anyhow::Result;
use awsign_aws_v4::{
    calculate_signature, canonical_request_string, canonicalize_headers, credential_scope,
    generate_signing_key, string_to_sign, X_AMZ_DATE,
};
use awsign_core::hash::hex_sha256;
use awsign_core::time::format_iso8601;
use awsign_core::SigningRequest;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method, Request};
use pretty_assertions::assert_eq;

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const HASHED_CANONICAL_REQUEST: &str =
    "f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59";
const SIGNING_KEY: &str = "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9";
const SIGNATURE: &str = "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7";

fn list_users() -> Request<&'static str> {
    Request::builder()
        .method(Method::GET)
        .uri("https://iam.amazonaws.com/?Action=ListUsers&Version=2010-05-08")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8")
        .body("")
        .expect("request must be valid")
}

#[test]
fn test_list_users_pipeline() -> Result<()> {
    let (parts, body) = list_users().into_parts();
    let mut req = SigningRequest::build(&parts)?;
    req.headers.insert(
        X_AMZ_DATE,
        HeaderValue::try_from(format_iso8601(example_time()))?,
    );

    let headers = canonicalize_headers(&req.headers, &req.host)?;
    assert_eq!(headers.signed_headers, "content-type;host;x-amz-date");

    let creq = canonical_request_string(
        &req.method,
        &req.path,
        &req.query,
        &headers,
        body.as_bytes(),
    )?;
    assert!(creq.ends_with(&format!("\n{EMPTY_SHA256}")));
    assert_eq!(hex_sha256(creq.as_bytes()), HASHED_CANONICAL_REQUEST);

    let scope = credential_scope(example_time(), "us-east-1", "iam");
    let sts = string_to_sign(example_time(), &scope, &creq);
    assert_eq!(sts.rsplit('\n').next(), Some(HASHED_CANONICAL_REQUEST));

    let key = generate_signing_key(SECRET_ACCESS_KEY, example_time(), "us-east-1", "iam");
    assert_eq!(hex::encode(key.as_bytes()), SIGNING_KEY);

    assert_eq!(calculate_signature(&key, &sts), SIGNATURE);
    Ok(())
}

#[test]
fn test_list_users_sign_request() -> Result<()> {
    let signer = init_signing_test("iam", "us-east-1");

    let (mut parts, body) = list_users().into_parts();
    signer.sign_request(&mut parts, body.as_bytes(), &example_credential())?;

    assert_eq!(parts.headers[X_AMZ_DATE], "20150830T123600Z");
    assert_eq!(
        parts.headers[AUTHORIZATION].to_str()?,
        format!(
            "AWS4-HMAC-SHA256, Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, Signature={SIGNATURE}"
        )
    );
    Ok(())
}

#[test]
fn test_date_header_matches_string_to_sign() -> Result<()> {
    let signer = init_signing_test("iam", "us-east-1");

    let (parts, _) = list_users().into_parts();
    let req = SigningRequest::build(&parts)?;
    let signed = signer.sign(&req, b"", &example_credential())?;

    // The verifier rebuilds the string to sign from the advertised header.
    let mut verifier_view = req.clone();
    verifier_view.headers.insert(X_AMZ_DATE, signed.date.clone());
    let recomputed = signer.signature(&verifier_view, b"", &example_credential(), example_time())?;

    assert_eq!(signed.date.to_str()?, format_iso8601(example_time()));
    assert_eq!(signature_of(&signed.authorization), recomputed);
    Ok(())
}

#[test]
fn test_header_insertion_order_does_not_matter() -> Result<()> {
    let signer = init_signing_test("s3", "us-east-1");
    let meta = [
        ("x-amz-meta-z", "last"),
        ("x-amz-meta-a", "first"),
        ("content-type", "text/plain"),
        ("x-amz-meta-m", "middle"),
    ];

    let mut forward = SigningRequest::new(Method::PUT, "bucket.s3.amazonaws.com", "/key");
    for (k, v) in meta {
        forward.headers.insert(k, HeaderValue::from_static(v));
    }
    let mut backward = SigningRequest::new(Method::PUT, "bucket.s3.amazonaws.com", "/key");
    for (k, v) in meta.iter().rev() {
        backward.headers.insert(*k, HeaderValue::from_static(*v));
    }

    let l = signer.sign(&forward, b"Hello,World!", &example_credential())?;
    let r = signer.sign(&backward, b"Hello,World!", &example_credential())?;

    assert_eq!(l, r);
    assert!(l.authorization.to_str()?.contains(
        "SignedHeaders=content-type;host;x-amz-date;x-amz-meta-a;x-amz-meta-m;x-amz-meta-z"
    ));
    Ok(())
}

#[test]
fn test_signing_is_deterministic() -> Result<()> {
    let signer = init_signing_test("iam", "us-east-1");
    let (parts, _) = list_users().into_parts();
    let req = SigningRequest::build(&parts)?;

    let results = (0..8)
        .map(|_| signer.sign(&req, b"payload", &example_credential()))
        .collect::<awsign_core::Result<Vec<_>>>()?;

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    Ok(())
}

#[test]
fn test_concurrent_signing_with_shared_signer() -> Result<()> {
    let signer = init_signing_test("iam", "us-east-1");
    let cred = example_credential();
    let (parts, _) = list_users().into_parts();
    let req = SigningRequest::build(&parts)?;

    let signatures = std::thread::scope(|s| {
        let handles = (0..4)
            .map(|_| s.spawn(|| signer.sign(&req, b"", &cred)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().expect("signing thread must not panic"))
            .collect::<awsign_core::Result<Vec<_>>>()
    })?;

    for headers in signatures {
        assert_eq!(signature_of(&headers.authorization), SIGNATURE);
    }
    Ok(())
}
