//! File formats: household persistence and result export.

pub mod codec;
pub mod export;
