use crate::config::ServiceEndpoint;
use crate::domain::payment::{PaymentRequest, PaymentResponse};
use crate::domain::ports::PaymentAuthorizer;
use crate::error::{AuthorizationError, Result, StorefrontError};
use crate::infrastructure::services::ServiceRegistry;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, warn};

/// Path of the authorization operation on the payment service.
pub const AUTHORIZE_PATH: &str = "/paymentAuth";

/// Payment authorization over HTTP.
///
/// Each `authorize` call issues exactly one `POST` with the JSON request and
/// waits for the JSON verdict. There are no retries here; the request and
/// connect timeouts come from the bound `ServiceEndpoint`. Dropping the
/// returned future abandons the in-flight request.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: reqwest::Client,
    url: String,
}

impl HttpPaymentClient {
    pub fn new(endpoint: &ServiceEndpoint) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(endpoint.timeout_ms))
            .connect_timeout(Duration::from_millis(endpoint.connect_timeout_ms))
            .build()
            .map_err(|e| StorefrontError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}{}", endpoint.url.trim_end_matches('/'), AUTHORIZE_PATH),
        })
    }

    /// Builds a client for the endpoint bound to the logical `service` name.
    pub fn bind(registry: &ServiceRegistry, service: &str) -> Result<Self> {
        Self::new(registry.resolve(service)?)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PaymentAuthorizer for HttpPaymentClient {
    async fn authorize(
        &self,
        request: &PaymentRequest,
    ) -> std::result::Result<PaymentResponse, AuthorizationError> {
        debug!(
            url = %self.url,
            amount = %request.amount(),
            customer = request.customer().as_str(),
            "requesting payment authorization"
        );

        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let payment = parse_response(status, &body)?;

        debug!(
            %status,
            authorised = payment.authorised,
            customer = request.customer().as_str(),
            "payment authorization answered"
        );
        Ok(payment)
    }
}

/// Maps a status and body to a verdict.
///
/// A well-formed `PaymentResponse` is a verdict on a 2xx, and on a 4xx only
/// when it declines, since providers may signal a decline that way. Every
/// other combination is a protocol failure, never a decline or an approval.
fn parse_response(
    status: StatusCode,
    body: &[u8],
) -> std::result::Result<PaymentResponse, AuthorizationError> {
    match serde_json::from_slice::<PaymentResponse>(body) {
        Ok(payment) if status.is_success() => Ok(payment),
        Ok(payment) if status.is_client_error() && payment.is_declined() => {
            warn!(%status, "payment service declined with a client error status");
            Ok(payment)
        }
        Ok(payment) => Err(AuthorizationError::Protocol {
            status,
            detail: format!(
                "payment verdict (authorised = {}) returned with a failure status",
                payment.authorised
            ),
        }),
        Err(e) if status.is_success() => Err(AuthorizationError::Protocol {
            status,
            detail: format!("malformed payment response: {e}"),
        }),
        Err(e) => Err(AuthorizationError::Protocol {
            status,
            detail: format!("no payment response in error body: {e}"),
        }),
    }
}
