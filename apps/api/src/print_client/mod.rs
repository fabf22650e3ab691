//! Print-on-demand vendor client.
//!
//! Thin wrapper over the vendor's order API: it posts a reference to the
//! print PDF plus the trim size and gets back an order id. Everything else
//! about fulfilment (shipping, status webhooks) stays on the vendor side.

pub mod handlers;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::layout::PageSizePreset;

#[derive(Debug, Serialize)]
struct VendorOrderRequest<'a> {
    pdf_url: &'a str,
    trim_width_mm: f32,
    trim_height_mm: f32,
    page_count: u32,
}

/// The vendor's acknowledgement of a submitted order.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorOrder {
    pub order_id: String,
    pub status: String,
}

#[derive(Clone)]
pub struct PrintClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PrintClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
        }
    }

    /// Submits one book for printing. The vendor receives trim dimensions
    /// (content size, without bleed — the PDF itself carries the bleed).
    pub async fn submit_order(
        &self,
        pdf_url: &str,
        preset: PageSizePreset,
        page_count: u32,
    ) -> Result<VendorOrder, AppError> {
        let trim = preset.content();
        let request_body = VendorOrderRequest {
            pdf_url,
            trim_width_mm: trim.width_mm,
            trim_height_mm: trim.height_mm,
            page_count,
        };

        debug!(
            pdf_url,
            preset = preset.as_str(),
            page_count,
            "submitting print order"
        );

        let response = self
            .client
            .post(format!("{}/v1/orders", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::PrintVendor(format!("order request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::PrintVendor(format!(
                "vendor returned {status}: {body}"
            )));
        }

        response
            .json::<VendorOrder>()
            .await
            .map_err(|e| AppError::PrintVendor(format!("vendor response parse failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_carries_trim_not_bleed() {
        let trim = PageSizePreset::Square.content();
        let request = VendorOrderRequest {
            pdf_url: "https://bucket/stories/x/print.pdf",
            trim_width_mm: trim.width_mm,
            trim_height_mm: trim.height_mm,
            page_count: 8,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["trim_width_mm"], 210.0);
        assert_eq!(json["trim_height_mm"], 210.0);
    }

    #[test]
    fn test_vendor_order_deserializes() {
        let order: VendorOrder =
            serde_json::from_str(r#"{"order_id": "ord_123", "status": "accepted"}"#).unwrap();
        assert_eq!(order.order_id, "ord_123");
        assert_eq!(order.status, "accepted");
    }
}
