//! Application layer: the checkout payment step and catalogue queries.
//!
//! Both services receive their collaborator already resolved at startup
//! (`PaymentAuthorizerBox`, `ProductRepositoryBox`) and never pick a backend
//! per request.

pub mod catalogue;
pub mod checkout;
