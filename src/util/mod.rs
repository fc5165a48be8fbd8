//! Small UI helpers shared across pages.

pub mod auth;
