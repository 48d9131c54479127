//! Validation utilities for AES primitives and modes

use super::{Error, Result};
use params::utils::symmetric::AES_KEY_SIZES;

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a minimum length
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::Length {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Validate that a length is a multiple of `multiple`
///
/// On failure `expected` carries the next multiple up.
#[inline(always)]
pub fn multiple_of(context: &'static str, actual: usize, multiple: usize) -> Result<()> {
    if actual % multiple != 0 {
        return Err(Error::Length {
            context,
            expected: (actual / multiple + 1) * multiple,
            actual,
        });
    }
    Ok(())
}

/// Validate an AES key length
#[inline(always)]
pub fn key_size(actual: usize) -> Result<()> {
    if !AES_KEY_SIZES.contains(&actual) {
        return Err(Error::KeySize { actual });
    }
    Ok(())
}

/// Validate an IV length against the sizes a mode accepts
#[inline(always)]
pub fn iv_size(mode: &'static str, actual: usize, allowed: &[usize]) -> Result<()> {
    if !allowed.contains(&actual) {
        return Err(Error::IvSize { mode, actual });
    }
    Ok(())
}
