// SPDX-License-Identifier: PMPL-1.0-or-later

//! Change-tracked state for UI consumers.

mod observable;

pub use observable::{Observable, Subscription};
