//! Export backends for rendered maps.

pub mod svg;
