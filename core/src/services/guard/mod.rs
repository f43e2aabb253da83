//! Route guard module
//!
//! This module gates access to protected routes:
//! - A pure decision table over token presence and the identity fetch
//! - A stateful wrapper that clears dead credentials and keeps the
//!   redirect idempotent

mod decision;
mod service;

pub use decision::{decide, GuardDecision, UserFetch};
pub use service::{GuardOutcome, RouteGuard};
