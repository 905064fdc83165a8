//! Shared test harness modules for the geotherm CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod explore_unit;
mod helpers;
