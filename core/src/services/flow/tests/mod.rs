//! Tests for the multi-step authentication flows.
