//! Flow countdown module
//!
//! This module runs the resend countdown attached to an OTP step:
//! - One-second ticks driven by the async runtime
//! - Remainder persisted to storage on every tick so the countdown
//!   survives a restart

mod format;
mod service;

pub use format::format_remaining;
pub use service::FlowCountdown;
