/*
[INPUT]:  Canonical query string and API secret
[OUTPUT]: Hex-encoded HMAC-SHA256 signature (signature query parameter)
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or parameter format
*/

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs query strings for SIGNED endpoints
pub struct RequestSigner {
    secret: SecretString,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Create a new request signer with the given API secret
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// HMAC-SHA256 of the exact query string, lowercase hex
    pub fn sign(&self, query: &str) -> String {
        // HMAC accepts keys of any length, so this cannot fail
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Append `signature=` to the query string
    pub fn signed_query(&self, query: &str) -> String {
        let signature = self.sign(query);
        format!("{query}&signature={signature}")
    }
}
