//! UCI front end: reads commands from stdin, drives a [`Searcher`] over a
//! shakmaty-backed [`Board`] and writes responses to stdout.
//!
//! [`Searcher`]: crate::engine::search::Searcher
//! [`Board`]: crate::rules::Board

pub mod protocol;

pub use protocol::UCI;
