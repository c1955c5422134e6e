use crate::domain::payment::{PaymentRequest, PaymentResponse};
use crate::domain::ports::PaymentAuthorizerBox;
use crate::error::{AuthorizationError, Result, StorefrontError};
use tracing::{info, warn};

/// How many times an undelivered payment request may be sent again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    max_retries: u8,
}

impl RetryPolicy {
    pub const NONE: Self = Self { max_retries: 0 };
    pub const ONCE: Self = Self { max_retries: 1 };

    pub fn new(max_retries: u8) -> Result<Self> {
        if max_retries > 1 {
            return Err(StorefrontError::Validation(format!(
                "at most one payment retry is allowed, got {max_retries}"
            )));
        }
        Ok(Self { max_retries })
    }

    pub fn max_retries(&self) -> u8 {
        self.max_retries
    }
}

/// What checkout learns from the payment step.
#[derive(Debug)]
pub enum PaymentOutcome {
    Approved,
    Declined { reason: Option<String> },
    Unavailable(AuthorizationError),
}

impl PaymentOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Wording shown to the shopper.
    pub fn customer_message(&self) -> String {
        match self {
            Self::Approved => "payment authorised".to_string(),
            Self::Declined { reason: Some(reason) } => format!("payment declined: {reason}"),
            Self::Declined { reason: None } => "payment declined".to_string(),
            Self::Unavailable(_) => {
                "payment service unavailable, please try again later".to_string()
            }
        }
    }
}

impl From<PaymentResponse> for PaymentOutcome {
    fn from(response: PaymentResponse) -> Self {
        if response.authorised {
            Self::Approved
        } else {
            Self::Declined {
                reason: response.message,
            }
        }
    }
}

/// The payment step of checkout.
///
/// Sends the request through the bound authorizer. A request is only sent
/// again when the previous attempt failed to connect, so the provider never
/// sees the same charge twice.
pub struct PaymentStep {
    authorizer: PaymentAuthorizerBox,
    policy: RetryPolicy,
}

impl PaymentStep {
    pub fn new(authorizer: PaymentAuthorizerBox, policy: RetryPolicy) -> Self {
        Self { authorizer, policy }
    }

    /// Raw verdict or failure, after the retry policy has been applied.
    pub async fn authorize(
        &self,
        request: &PaymentRequest,
    ) -> std::result::Result<PaymentResponse, AuthorizationError> {
        let mut attempt = 0;
        loop {
            match self.authorizer.authorize(request).await {
                Err(e) if e.is_undelivered() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    warn!(attempt, error = %e, "payment request not delivered, retrying");
                }
                result => return result,
            }
        }
    }

    pub async fn run(&self, request: &PaymentRequest) -> PaymentOutcome {
        let outcome = match self.authorize(request).await {
            Ok(response) => PaymentOutcome::from(response),
            Err(e) => {
                warn!(error = %e, "payment authorization failed");
                PaymentOutcome::Unavailable(e)
            }
        };
        info!(
            customer = request.customer().as_str(),
            amount = %request.amount(),
            approved = outcome.is_approved(),
            "payment step finished"
        );
        outcome
    }
}
