//! Typed client for the TMDB v3 movie/TV metadata API.
//!
//! Two ways to read a response:
//!
//! - the entity path: [`tmdb::LocalTmdbApi`] decodes straight into
//!   [`tmdb::Movie`], [`tmdb::Tv`], ... with `Option` fields;
//! - the lazy path: [`tmdb::LocalTmdbApi::document`] returns a
//!   [`view::Document`] navigated through [`value::Data`] accessors and the
//!   typed views in [`view`], where absence is an error.
//!
//! Search endpoints are exposed as demand-driven streams in [`tmdb`].

pub mod error;
pub mod tmdb;
pub mod value;
pub mod view;

pub use error::{Error, Result};
