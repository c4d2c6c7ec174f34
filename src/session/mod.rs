// SPDX-License-Identifier: GPL-3.0-only
pub mod session;
pub mod sink;

pub use session::{Session, StatusSnapshot};
pub use sink::{LogSink, StatusSink};
