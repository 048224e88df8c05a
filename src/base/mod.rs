//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): error taxonomy with stable numeric codes
//! - [`LoadState`](loadstate::LoadState): where a request is in its hop loop
//! - [`context`]: mapping of `std::io::Error` into `NetError`

pub mod context;
pub mod loadstate;
pub mod neterror;

#[cfg(test)]
mod tests;
