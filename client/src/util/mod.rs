//! Browser-facing helpers used by the admin pages.
//!
//! `storage` adapts `localStorage` to the session crate's key-value seam,
//! `auth` holds the route guard and the post-login redirect, and `items`
//! turns free-form backend documents into list labels.

pub mod auth;
pub mod items;
pub mod storage;
