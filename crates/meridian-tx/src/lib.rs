#![deny(missing_docs)]

//! Meridian Wallet SDK - Canonical transaction encoding and building.
//!
//! The remote ledger verifies signatures over a deterministic proto3
//! encoding of the transaction frame. This crate owns that encoding:
//! - `msg` - every protocol message shape, the `Any` payload envelope,
//!   and per-message required-field validation
//! - `tx` - the transaction frame and sign-byte computation
//! - `builder` - the only place encoding and signing are combined

pub mod builder;
pub mod msg;
pub mod tx;

mod error;
pub use error::TxError;

pub use builder::{build_signed_transaction, now_micros, SignedEnvelope, TxParams};
pub use msg::{Any, ProtocolMessage, Signature, Transaction};
pub use tx::{encode_transaction, sign_bytes, wrap_message};
