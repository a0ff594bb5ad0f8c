//! Core of the updraft arcade game: pure data types, sprite/mask
//! geometry, and the per-tick simulation. All terminal I/O lives in the
//! binary (`main.rs` + its `display` module); everything here is testable
//! without a terminal.

pub mod compute;
pub mod entities;
pub mod sprite;
