//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`register`]: Register offsets and bit fields for the SPI and GPDMA blocks
//! - [`constants`]: Internal constants and magic numbers
//! - [`dma`]: Transfer descriptor builder
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Do not depend on any types
//! or functions in this module from external code.

pub(crate) mod constants;
pub(crate) mod dma;
pub(crate) mod register;
