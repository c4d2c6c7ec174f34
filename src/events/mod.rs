// SPDX-License-Identifier: GPL-3.0-only
pub mod bus;

pub use bus::{EventBus, SubscriptionHandle, MANIFEST_LOADED_TOPIC};
