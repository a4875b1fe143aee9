// SPDX-License-Identifier: Apache-2.0

mod get;

pub use get::*;
