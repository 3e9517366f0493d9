//! End-to-end build sessions against a fake compiler.

mod common;

#[cfg(unix)]
mod build_tests;
