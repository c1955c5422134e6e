use crate::error::StorefrontError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A positive monetary amount for a charge attempt.
///
/// Travels over the wire as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, StorefrontError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(StorefrontError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = StorefrontError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! reference {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, StorefrontError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(StorefrontError::Validation(format!(
                        "{} reference must not be empty",
                        $what
                    )));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = StorefrontError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }
    };
}

reference!(
    /// Opaque reference to the paying customer.
    CustomerRef,
    "customer"
);
reference!(
    /// Opaque reference to the billing address used for authorization checks.
    AddressRef,
    "address"
);
reference!(
    /// Opaque reference to the payment instrument. Its `Debug` output is redacted.
    CardRef,
    "card"
);

impl fmt::Debug for CustomerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomerRef").field(&self.0).finish()
    }
}

impl fmt::Debug for AddressRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AddressRef").field(&self.0).finish()
    }
}

impl fmt::Debug for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CardRef(<redacted>)")
    }
}

/// A single charge attempt, built once per order attempt by the checkout.
///
/// Fields are private so a request cannot change after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    amount: Amount,
    customer: CustomerRef,
    address: AddressRef,
    card: CardRef,
}

impl PaymentRequest {
    pub fn new(amount: Amount, customer: CustomerRef, address: AddressRef, card: CardRef) -> Self {
        Self {
            amount,
            customer,
            address,
            card,
        }
    }

    /// Validates raw values and builds a request from them.
    pub fn try_from_parts(
        amount: Decimal,
        customer: impl Into<String>,
        address: impl Into<String>,
        card: impl Into<String>,
    ) -> Result<Self, StorefrontError> {
        Ok(Self::new(
            Amount::new(amount)?,
            CustomerRef::new(customer)?,
            AddressRef::new(address)?,
            CardRef::new(card)?,
        ))
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn customer(&self) -> &CustomerRef {
        &self.customer
    }

    pub fn address(&self) -> &AddressRef {
        &self.address
    }

    pub fn card(&self) -> &CardRef {
        &self.card
    }
}

/// The provider's verdict on a `PaymentRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub authorised: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl PaymentResponse {
    pub fn approved() -> Self {
        Self {
            authorised: true,
            message: None,
        }
    }

    pub fn declined(reason: impl Into<String>) -> Self {
        Self {
            authorised: false,
            message: Some(reason.into()),
        }
    }

    pub fn is_declined(&self) -> bool {
        !self.authorised
    }
}
