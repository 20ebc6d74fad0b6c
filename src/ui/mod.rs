//! UI utilities for terminal output
//!
//! This module provides the progress spinner shown while years are counted.

mod spinner;

pub use spinner::{create_spinner, finish_spinner_with_status};
