//! Unit tests for the board module.

mod service_tests;
