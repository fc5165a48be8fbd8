//! Client-side session state.
//!
//! DESIGN
//! ======
//! `storage` persists the token, `session` owns the live session and its
//! observers, `auth` is the plain snapshot views render from.

pub mod auth;
pub mod session;
pub mod storage;
