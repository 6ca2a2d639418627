//! GPDMA programming support
//!
//! - [`DmaScratch`]: sink, filler and reload words owned by one driver
//! - [`DescriptorBuilder`]: per-operation channel programming
//!
//! The channels themselves are reached through
//! [`DmaChannel`](crate::hal::DmaChannel); nothing here touches hardware.

mod descriptor;
mod scratch;

pub(crate) use descriptor::{DescriptorBuilder, Operation, TransferPlan};
pub use scratch::DmaScratch;
