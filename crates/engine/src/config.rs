//! Engine configuration from the environment.

use std::time::Duration;

use crate::types::{DEFAULT_HOLD_WINDOW_MS, DEFAULT_MAX_FRAME_MS, DEFAULT_TICK_RATE_HZ};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub tick_rate_hz: u32,
    pub max_frame_ms: u32,
    pub hold_window_ms: u32,
    /// Grid size override; `None` means "use the terminal size".
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            max_frame_ms: DEFAULT_MAX_FRAME_MS,
            hold_window_ms: DEFAULT_HOLD_WINDOW_MS,
            width: None,
            height: None,
        }
    }
}

impl EngineConfig {
    /// Read `TUI_ARCADE_*` variables, keeping defaults for anything absent or
    /// unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse<T: std::str::FromStr>(v: Option<String>) -> Option<T> {
            v.and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            tick_rate_hz: parse(lookup("TUI_ARCADE_TICK_RATE"))
                .filter(|&hz: &u32| hz > 0)
                .unwrap_or(defaults.tick_rate_hz),
            max_frame_ms: parse(lookup("TUI_ARCADE_MAX_FRAME_MS"))
                .filter(|&ms: &u32| ms > 0)
                .unwrap_or(defaults.max_frame_ms),
            hold_window_ms: parse(lookup("TUI_ARCADE_HOLD_WINDOW_MS"))
                .unwrap_or(defaults.hold_window_ms),
            width: parse(lookup("TUI_ARCADE_WIDTH")).filter(|&w: &u16| w > 0),
            height: parse(lookup("TUI_ARCADE_HEIGHT")).filter(|&h: &u16| h > 0),
        }
    }

    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms as u64)
    }

    pub fn hold_window(&self) -> Duration {
        Duration::from_millis(self.hold_window_ms as u64)
    }

    /// Grid size: explicit overrides first, then `fallback` per axis.
    pub fn grid_size(&self, fallback: (u16, u16)) -> (u16, u16) {
        (
            self.width.unwrap_or(fallback.0),
            self.height.unwrap_or(fallback.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_and_invalid_values_fall_back() {
        let env: HashMap<&str, &str> = [
            ("TUI_ARCADE_TICK_RATE", "0"),
            ("TUI_ARCADE_MAX_FRAME_MS", "abc"),
            ("TUI_ARCADE_HOLD_WINDOW_MS", " 150 "),
            ("TUI_ARCADE_WIDTH", "40"),
        ]
        .into_iter()
        .collect();
        let cfg = EngineConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.tick_rate_hz, DEFAULT_TICK_RATE_HZ);
        assert_eq!(cfg.max_frame_ms, DEFAULT_MAX_FRAME_MS);
        assert_eq!(cfg.hold_window_ms, 150);
        assert_eq!(cfg.grid_size((80, 24)), (40, 24));
    }
}
