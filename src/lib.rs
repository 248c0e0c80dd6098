// Copyright 2026 Statuswatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Statuswatch library — presence watchdog for Hypixel players.
//!
//! This library crate exposes the core modules for integration testing.

pub mod config;
pub mod games;
pub mod hypixel;
pub mod rules;
pub mod types;
pub mod watcher;
pub mod webhook;
