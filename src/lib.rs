// SPDX-License-Identifier: GPL-3.0-only
pub mod app;
pub mod config;
pub mod events;
pub mod logging;
pub mod manifest;
pub mod properties;
pub mod refresh;
pub mod session;
pub mod state;
pub mod status;

#[cfg(test)]
mod test_helpers;
