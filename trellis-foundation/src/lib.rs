//! Framework-agnostic primitives shared by the trellis crates.
//!
//! This crate holds the small vocabulary the layout components are
//! expressed in: the [`Dp`] length unit, identity-comparable callable
//! handles ([`Slot`], [`CallbackWith`]) and shared state cells
//! ([`State`]). Nothing here knows about grids, sections or rendering.

#![deny(missing_docs, clippy::unwrap_used)]

pub mod dp;
pub mod prop;
pub mod state;

pub use dp::Dp;
pub use prop::{CallbackWith, Slot};
pub use state::State;
