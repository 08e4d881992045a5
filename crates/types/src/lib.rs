//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, making them usable from the world,
//! the renderer, the input layer and the scheduler alike.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds unless stated otherwise:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_RATE_HZ` | 60 | Fixed simulation steps per second |
//! | `DEFAULT_MAX_FRAME_MS` | 100 | Elapsed-time clamp after a stall |
//! | `DEFAULT_HOLD_WINDOW_MS` | 100 | Key release inference window |
//! | `FPS_WINDOW_MS` | 1000 | Frame counter reporting period |
//!
//! # Grid Defaults
//!
//! - `DEFAULT_GRID_WIDTH`: 80 columns
//! - `DEFAULT_GRID_HEIGHT`: 24 rows
//!
//! # Examples
//!
//! ```
//! use tui_arcade_types::{Entity, Rgb, DEFAULT_TICK_RATE_HZ};
//!
//! let e = Entity::from_raw(7);
//! assert_eq!(e.id(), 7);
//!
//! let white = Rgb::WHITE;
//! assert_eq!(white, Rgb::new(255, 255, 255));
//!
//! assert_eq!(DEFAULT_TICK_RATE_HZ, 60);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed simulation rate (60 steps per second ≈ 16.667ms per step)
pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

/// Maximum elapsed time credited to a single wake-up (100ms)
pub const DEFAULT_MAX_FRAME_MS: u32 = 100;

/// Silence after the last key signal before a key counts as released (100ms)
pub const DEFAULT_HOLD_WINDOW_MS: u32 = 100;

/// Period of the rolling frame counter (1 second)
pub const FPS_WINDOW_MS: u32 = 1000;

/// Default grid width in cells when no terminal size is available
pub const DEFAULT_GRID_WIDTH: u16 = 80;

/// Default grid height in cells when no terminal size is available
pub const DEFAULT_GRID_HEIGHT: u16 = 24;

/// Opaque entity identifier.
///
/// Entities carry no data of their own; everything lives in components
/// stored by the world. Ids are recycled after the entity is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(u32);

impl Entity {
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY: Rgb = Rgb::new(220, 220, 220);
    pub const RED: Rgb = Rgb::new(220, 60, 60);
    pub const GREEN: Rgb = Rgb::new(80, 200, 120);
    pub const BLUE: Rgb = Rgb::new(80, 140, 240);
    pub const YELLOW: Rgb = Rgb::new(240, 210, 80);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(DEFAULT_TICK_RATE_HZ, 60);
        assert_eq!(DEFAULT_MAX_FRAME_MS, 100);
        assert_eq!(DEFAULT_HOLD_WINDOW_MS, 100);
        assert_eq!(FPS_WINDOW_MS, 1000);
    }

    #[test]
    fn entity_orders_by_id() {
        assert!(Entity::from_raw(1) < Entity::from_raw(2));
        assert_eq!(Entity::from_raw(3).to_string(), "#3");
    }
}
