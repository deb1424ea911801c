//! Live earthquake and tectonic plate map.
//!
//! Feeds are fetched and classified server-side into render-ready layer
//! descriptors; the embedded Leaflet page only draws them.

pub mod boundaries;
pub mod classify;
pub mod composer;
pub mod constants;
pub mod feed;
pub mod markers;
pub mod server;
pub mod settings;
#[cfg(test)]
mod test_support;
