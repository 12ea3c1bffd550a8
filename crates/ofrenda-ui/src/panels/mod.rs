//! UI Panels Module
//!
//! - Altar: the grid of picture frames

pub mod altar;
