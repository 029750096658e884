//! Shared types for the CampShare contract suite.
//!
//! This crate provides:
//! - [`HolderKey`]: the identity of a stake position, self-custodied or held
//!   through a custodial manager.
//! - [`admin_tiers`]: the three-tier admin hierarchy.
//! - [`ttl`]: storage lifetime helpers.
//!
//! Every contract keeps its own `#[contracterror]` enum. Codes 1 to 3 mean
//! `NotInitialized`, `AlreadyInitialized` and `Unauthorized` in all of them.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod admin_tiers;
pub mod holder;
pub mod ttl;

pub use admin_tiers::*;
pub use holder::*;
