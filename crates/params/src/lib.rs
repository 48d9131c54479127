//! Constant values for cencrypt
//!
//! Sizes shared by the AES block core, the IV manager and the mode cryptors.

#![no_std]

pub mod utils;
