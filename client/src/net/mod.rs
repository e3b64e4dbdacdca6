//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` holds the `gloo-net` transport behind the session provider and the
//! per-resource calls made by admin pages.

pub mod api;
