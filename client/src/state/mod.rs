//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Only authentication state is shared across routes; admin pages keep their
//! resource lists in page-local signals.

pub mod auth;
