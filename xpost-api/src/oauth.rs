//! OAuth 1.0a request signing.
//!
//! X requires an HMAC-SHA1 signed `Authorization` header for user-context
//! requests. JSON request bodies are not part of the signature base string;
//! only the OAuth protocol parameters and any query parameters are.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::RngCore;
use sha1::Sha1;

use crate::error::{XError, XResult};
use crate::models::XCredentials;

/// Everything except the RFC 3986 unreserved set (ALPHA / DIGIT / "-" / "." / "_" / "~").
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Signs requests with a fixed set of user-context credentials.
pub struct OAuthSigner {
  credentials: XCredentials,
}

impl OAuthSigner {
  pub const fn new(credentials: XCredentials) -> Self {
    Self { credentials }
  }

  /// Build the `Authorization` header value for a request.
  ///
  /// `url` must not carry a query string; pass query parameters in `params`.
  pub fn authorization(&self, method: &str, url: &str, params: &[(&str, &str)]) -> XResult<String> {
    let timestamp = std::time::SystemTime::now()
      .duration_since(std::time::UNIX_EPOCH)
      .map_err(|e| XError::OAuth(format!("system clock is before the Unix epoch: {e}")))?
      .as_secs()
      .to_string();

    self.authorization_with(method, url, params, &generate_nonce(), &timestamp)
  }

  fn authorization_with(
    &self,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    nonce: &str,
    timestamp: &str,
  ) -> XResult<String> {
    let mut oauth_params = vec![
      ("oauth_consumer_key", self.credentials.api_key.clone()),
      ("oauth_nonce", nonce.to_string()),
      ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
      ("oauth_timestamp", timestamp.to_string()),
      ("oauth_token", self.credentials.access_token.clone()),
      ("oauth_version", OAUTH_VERSION.to_string()),
    ];

    let signature = self.signature(method, url, &oauth_params, params)?;
    oauth_params.push(("oauth_signature", signature));

    let header = oauth_params
      .iter()
      .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
      .collect::<Vec<_>>()
      .join(", ");

    Ok(format!("OAuth {header}"))
  }

  fn signature(
    &self,
    method: &str,
    url: &str,
    oauth_params: &[(&str, String)],
    params: &[(&str, &str)],
  ) -> XResult<String> {
    // Parameters are sorted after encoding, by key and then by value.
    let mut encoded: Vec<(String, String)> = oauth_params
      .iter()
      .map(|(k, v)| (percent_encode(k), percent_encode(v)))
      .chain(params.iter().map(|(k, v)| (percent_encode(k), percent_encode(v))))
      .collect();
    encoded.sort();

    let param_string = encoded
      .iter()
      .map(|(k, v)| format!("{k}={v}"))
      .collect::<Vec<_>>()
      .join("&");

    let base_string = format!(
      "{}&{}&{}",
      method.to_uppercase(),
      percent_encode(url),
      percent_encode(&param_string)
    );

    let signing_key = format!(
      "{}&{}",
      percent_encode(&self.credentials.api_key_secret),
      percent_encode(&self.credentials.access_token_secret)
    );

    hmac_sha1(&signing_key, &base_string)
  }
}

/// Percent-encode a string according to RFC 3986.
fn percent_encode(s: &str) -> String {
  utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// 32 hex characters of randomness.
fn generate_nonce() -> String {
  let mut bytes = [0u8; 16];
  rand::thread_rng().fill_bytes(&mut bytes);
  bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hmac_sha1(key: &str, data: &str) -> XResult<String> {
  let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes()).map_err(|e| XError::OAuth(e.to_string()))?;
  mac.update(data.as_bytes());
  Ok(BASE64.encode(mac.finalize().into_bytes()))
}
