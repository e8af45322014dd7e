//! Car-loan amortization comparisons across a sweep of APRs.
//!
//! [`amortization`] holds the math, [`presentation`] and [`summary`] turn
//! rows into display strings, and [`analysis`] ties them together behind
//! input validation for callers that want a single entry point.

pub mod amortization;
pub mod analysis;
pub mod error;
pub mod params;
pub mod presentation;
pub mod summary;
pub mod types;

pub use error::LoanError;
pub use types::*;

/// Standard result type for all car-loan operations
pub type LoanResult<T> = Result<T, LoanError>;
