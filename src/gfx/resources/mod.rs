//! GPU resource helpers.

pub mod texture_resource;
