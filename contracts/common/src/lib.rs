//! Shared building blocks for the staking-rewards contract suite.
//!
//! This crate provides:
//! - [`roles`]: the closed role set and the persistent role table every
//!   privileged entry point checks against.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod roles;

pub use roles::*;
