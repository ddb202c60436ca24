//! View-state logic and static content for the VR Lab showcase.
//!
//! Nothing in this crate touches the terminal. The TUI crate renders the
//! types defined here and drives the state machines from input events and
//! timers.

pub mod broadcast;
pub mod catalog;
pub mod config;
pub mod course;
pub mod drilldown;
pub mod error;
pub mod filter;
pub mod launch;
pub mod modal;
pub mod platform;
pub mod qr;
pub mod share;

pub use error::{Error, Result};
