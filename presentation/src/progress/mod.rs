//! Progress reporting for the tool loop

pub mod reporter;
