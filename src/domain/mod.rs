//! Domain types and the capability traits the rest of the crate plugs into.

pub mod payment;
pub mod ports;
pub mod product;
