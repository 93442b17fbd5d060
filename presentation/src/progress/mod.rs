//! Round progress reporting

pub mod reporter;
