//! Tests for the template compiler
//!
//! Organized into focused submodules, from the lexer up to full resolution.

use super::*;

// Test helper functions
mod helpers;


// Resolution tests
mod compile_basic;
