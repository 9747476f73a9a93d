/*
[INPUT]:  Validated order requests with HMAC query signature
[OUTPUT]: Order acknowledgements from the exchange
[POS]:    HTTP layer - trading endpoints (require API key + signature)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use reqwest::Method;
use tracing::{debug, info};

use crate::http::{BinanceClient, Result};
use crate::types::{NewOrderResponse, OrderRequest};

pub const NEW_ORDER_ENDPOINT: &str = "/fapi/v1/order";

impl BinanceClient {
    /// Place a new order
    ///
    /// POST /fapi/v1/order
    /// Requires: X-MBX-APIKEY header + signature query parameter
    pub async fn new_order(&self, req: &OrderRequest) -> Result<NewOrderResponse> {
        info!(order = %req, "submitting order");
        let builder = self.signed_request(Method::POST, NEW_ORDER_ENDPOINT, req.query_params())?;
        let response: NewOrderResponse = self.send_json(builder).await?;
        debug!(
            order_id = response.order_id,
            status = %response.status,
            "order acknowledged"
        );
        Ok(response)
    }
}
