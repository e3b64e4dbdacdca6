//! Reusable admin widgets.
//!
//! `resource_panel` is shared by every admin section page: one panel per
//! backend collection, holding its own item list and error banner.

pub mod resource_panel;
