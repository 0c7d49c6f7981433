//! Utility functions

pub mod html;
