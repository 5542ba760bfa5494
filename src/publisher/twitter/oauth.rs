// OAuth 1.0a request signing (HMAC-SHA1, RFC 5849)
use crate::config::Credentials;
use crate::model::PublishError;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{distr::Alphanumeric, Rng};
use sha1::Sha1;
use urlencoding::encode;

type HmacSha1 = Hmac<Sha1>;

/// `Authorization` header for a request whose signed parameters are `params`.
/// Multipart and JSON bodies are not part of the signature, so callers pass only query pairs.
pub fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Result<String, PublishError> {
    let nonce: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    let timestamp = chrono::Utc::now().timestamp();

    build_header(credentials, method, url, params, &nonce, timestamp)
}

fn build_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    nonce: &str,
    timestamp: i64,
) -> Result<String, PublishError> {
    let timestamp = timestamp.to_string();
    let oauth: [(&str, &str); 6] = [
        ("oauth_consumer_key", credentials.api_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let signature = sign(credentials, method, url, &oauth, params)?;

    let mut fields: Vec<String> = oauth
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect();
    fields.push(format!("oauth_signature=\"{}\"", encode(&signature)));

    Ok(format!("OAuth {}", fields.join(", ")))
}

fn sign(
    credentials: &Credentials,
    method: &str,
    url: &str,
    oauth: &[(&str, &str)],
    params: &[(&str, &str)],
) -> Result<String, PublishError> {
    let mut pairs: Vec<(String, String)> = oauth
        .iter()
        .chain(params)
        .map(|(k, v)| (encode(k).into_owned(), encode(v).into_owned()))
        .collect();
    pairs.sort();

    let parameter_string = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    let base_string = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&parameter_string)
    );
    let signing_key = format!(
        "{}&{}",
        encode(&credentials.api_secret),
        encode(&credentials.access_token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .map_err(|e| PublishError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
