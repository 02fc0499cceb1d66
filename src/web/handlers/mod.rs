//! HTTP request handlers for the retrace web front end.

pub mod form;
pub mod sessions;
