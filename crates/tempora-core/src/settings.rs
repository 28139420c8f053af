//! Global library settings.
//!
//! [`Settings`] holds configuration that must be identical for every value
//! computed in a process, currently only whether leap seconds are taken into
//! account when translating between the civil (POSIX) and the continuous
//! (UTC) time scale.  It is a process-wide singleton accessed via a
//! `std::sync::OnceLock`: either [`Settings::init`] is called once before
//! first use, or the settings are read from the environment on first access.

use std::sync::OnceLock;

use crate::errors::{Error, Result};

/// Environment variable consulted when [`Settings::init`] was not called.
///
/// The values `0`, `false`, `off` and `no` (case-insensitive) disable leap
/// seconds; anything else leaves them enabled.
pub const LEAP_SECONDS_ENV: &str = "TEMPORA_LEAP_SECONDS";

/// Process-wide settings used by the tempora library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    leap_seconds_enabled: bool,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Default for Settings {
    fn default() -> Self {
        Self {
            leap_seconds_enabled: true,
        }
    }
}

impl Settings {
    /// Settings with leap seconds enabled or disabled.
    pub fn new(leap_seconds_enabled: bool) -> Self {
        Self {
            leap_seconds_enabled,
        }
    }

    /// Read the settings from the environment.
    pub fn from_env() -> Self {
        let leap_seconds_enabled = match std::env::var(LEAP_SECONDS_ENV) {
            Ok(v) => !matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            ),
            Err(_) => true,
        };
        Self {
            leap_seconds_enabled,
        }
    }

    /// Install `settings` as the process-wide instance.
    ///
    /// Returns an error if the settings were already initialized (explicitly
    /// or by a previous call to [`Settings::instance`]).
    pub fn init(settings: Settings) -> Result<()> {
        INSTANCE.set(settings).map_err(|_| {
            Error::Precondition("settings have already been initialized".into())
        })?;
        tracing::debug!(?settings, "settings initialized explicitly");
        Ok(())
    }

    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| {
            let settings = Settings::from_env();
            tracing::debug!(?settings, "settings initialized from environment");
            settings
        })
    }

    /// Whether leap seconds are taken into account.
    pub fn leap_seconds_enabled(&self) -> bool {
        self.leap_seconds_enabled
    }
}
