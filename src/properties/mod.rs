// SPDX-License-Identifier: GPL-3.0-only
pub mod traits;
pub mod system;
pub mod device;

pub use traits::PropertyStore;
pub use system::SystemPropertyStore;
pub use device::DeviceInfo;
