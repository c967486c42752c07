//! Shared traits for the farmhash workspace.
//!
//! This crate defines the contract surface between the algorithm crate and
//! its consumers. It is `no_std` and dependency-free.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

mod fast_hash;

pub use fast_hash::FastHash;
