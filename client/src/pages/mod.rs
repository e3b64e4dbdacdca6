//! Route-level screens.
//!
//! Public pages render for everyone. `dashboard`, `section` and
//! `change_password` are only mounted inside the `RequireAuth` guard; `login`
//! is the guard's redirect target.

pub mod change_password;
pub mod dashboard;
pub mod login;
pub mod public;
pub mod section;
