//! This module contains general purpose middleware.
//!
//! Everything in here is a [tower layer] provided by [`tower_http`], configured for how this API
//! wants to log requests and answer browsers.
//!
//! [tower layer]: https://docs.rs/tower/latest/tower/trait.Layer.html

pub(crate) mod logging;
pub(crate) mod cors;
