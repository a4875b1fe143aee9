// SPDX-License-Identifier: Apache-2.0

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]
#![deny(unsafe_code)]

pub mod text;
pub mod usage;
pub mod user;

pub use text::Extraction;
pub use usage::Stats as UsageStats;
pub use user::{
    Account as UserAccount, Context as UserContext, Name as UserName, Profile as UserProfile,
    Record as UserRecord,
};

/// Number of OCR calls a user may make before supplying a credential of
/// their own.
pub const FREE_USAGE_LIMIT: u64 = 5;
