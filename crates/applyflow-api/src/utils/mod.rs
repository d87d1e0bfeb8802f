//! Common utilities

pub mod multipart;
