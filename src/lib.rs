//! Renders the hexagonal padlock badge icon set.
//!
//! [`badge::render_badge`] produces one square RGBA icon; [`icon_gen`] drives
//! a full run and writes the PNG files.

pub mod badge;
pub mod icon_gen;
pub mod manifest_json;
pub mod palette;
pub mod shapes;
