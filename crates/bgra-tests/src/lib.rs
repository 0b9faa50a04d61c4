//! Integration tests for BGRA-RS crates.
//!
//! These tests drive the public `bgra-ops` API end to end on buffers built
//! with `bgra-core`, checking the properties every resize must hold.
//!
//! Set `RUST_LOG=bgra_ops=trace` to see the operations' tracing output.
