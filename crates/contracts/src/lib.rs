//! Shared contracts between the SPA and the approval API.
//!
//! Everything here is plain data plus pure rules (state chain, role guard,
//! payload composition, route access), so it can be tested natively.

pub mod domain;
pub mod system;
