//! Services module
//!
//! Contains the simulated backend the demo loads pages from.

pub mod pages;

pub use pages::{FetchRequest, Page, PageService};
