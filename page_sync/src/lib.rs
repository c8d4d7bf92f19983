//! Refreshes the SMM price block embedded in a static HTML page.
//!
//! A run fetches every catalog product from the provider ([`sync`]), renders
//! the `smmData` JavaScript block ([`render`]) and splices it, together with
//! the displayed update date, into the page ([`document`]).

pub mod catalog;
pub mod config;
pub mod document;
pub mod render;
pub mod sink;
pub mod sync;
pub mod tz;
pub mod window;
