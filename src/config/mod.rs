//! Configuration
//!
//! Settings groups shared by the library and the command line. Each group is a
//! `clap` [`Args`](clap::Args) struct with environment fallbacks, meant to be
//! flattened into a parser.

mod api;
mod checkout;
mod observability;

pub use api::ApiConfig;
pub use checkout::CheckoutConfig;
pub use observability::{LogFormat, LoggingConfig};
