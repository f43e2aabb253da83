//! Storage backend tests

mod select_tests;
