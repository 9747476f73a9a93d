/*
[INPUT]:  Credentials and HMAC query signature
[OUTPUT]: Account summary used to prove the key works
[POS]:    HTTP layer - user data endpoints (require API key + signature)
[UPDATE]: When adding account endpoints or changing query parameters
*/

use reqwest::Method;

use crate::http::{BinanceClient, Result};
use crate::types::AccountInfo;

pub const ACCOUNT_ENDPOINT: &str = "/fapi/v1/account";

impl BinanceClient {
    /// Query account information
    ///
    /// GET /fapi/v1/account
    pub async fn account_info(&self) -> Result<AccountInfo> {
        let builder = self.signed_request(Method::GET, ACCOUNT_ENDPOINT, Vec::new())?;
        self.send_json(builder).await
    }
}
