//! [`Settings`] definitions.

use common::define_kind;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Settings of the administrator's workspace.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Indicator whether the dark [`Theme`] is enabled.
    pub dark_mode: bool,

    /// [`Notifications`] preferences.
    pub notifications: Notifications,
}

impl Settings {
    /// Key these [`Settings`] are stored under.
    pub const STORAGE_KEY: &'static str = "app_settings_v1";

    /// Returns the [`Theme`] chosen by these [`Settings`].
    #[must_use]
    pub const fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Switches between the [`Theme`]s, returning the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.dark_mode = !self.dark_mode;
        self.theme()
    }

    /// Flips the notifications via the provided [`Channel`], returning
    /// whether they're enabled now.
    pub fn toggle_notification(&mut self, channel: Channel) -> bool {
        let enabled = self.notifications.get_mut(channel);
        *enabled = !*enabled;
        *enabled
    }
}

/// Preferred notification [`Channel`]s.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault,
)]
#[serde(default)]
pub struct Notifications {
    /// Indicator whether notifications via [`Channel::Email`] are enabled.
    #[default(true)]
    pub email: bool,

    /// Indicator whether notifications via [`Channel::Sms`] are enabled.
    #[default(false)]
    pub sms: bool,

    /// Indicator whether notifications via [`Channel::Push`] are enabled.
    #[default(true)]
    pub push: bool,
}

impl Notifications {
    /// Indicates whether notifications via the provided [`Channel`] are
    /// enabled.
    #[must_use]
    pub const fn get(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email,
            Channel::Sms => self.sms,
            Channel::Push => self.push,
        }
    }

    fn get_mut(&mut self, channel: Channel) -> &mut bool {
        match channel {
            Channel::Email => &mut self.email,
            Channel::Sms => &mut self.sms,
            Channel::Push => &mut self.push,
        }
    }
}

define_kind! {
    #[doc = "Visual theme of the workspace."]
    enum Theme {
        #[doc = "Light theme."]
        Light = 1,

        #[doc = "Dark theme."]
        Dark = 2,
    }
}

define_kind! {
    #[doc = "Channel delivering notifications."]
    enum Channel {
        #[doc = "Notifications by email."]
        Email = 1,

        #[doc = "Short SMS alerts."]
        Sms = 2,

        #[doc = "Push notifications on the device."]
        Push = 3,
    }
}

impl Channel {
    /// Returns a human-readable description of this [`Channel`].
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Email => "Receive updates by email.",
            Self::Sms => "Receive short SMS alerts.",
            Self::Push => "Receive push notifications on this device.",
        }
    }
}
