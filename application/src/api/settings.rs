//! [`Settings`]-related definitions.

use derive_more::{From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLObject};
use service::domain::settings;

use crate::Context;

/// Preferences of the administrator's workspace.
#[derive(Clone, Copy, Debug, From, Into)]
pub struct Settings(settings::Settings);

/// Preferences of the administrator's workspace.
#[graphql_object(context = Context)]
impl Settings {
    /// Indicator whether the dark `Theme` is enabled.
    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.0.dark_mode
    }

    /// Visual `Theme` of the workspace.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.0.theme().into()
    }

    /// Notification preferences, one per `NotificationChannel`.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        settings::Channel::ALL
            .iter()
            .map(|&channel| Notification {
                channel: channel.into(),
                enabled: self.0.notifications.get(channel),
                description: channel.description().to_owned(),
            })
            .collect()
    }
}

/// Preference of a single `NotificationChannel`.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Notification {
    /// `NotificationChannel` this preference is about.
    pub channel: Channel,

    /// Indicator whether notifications are delivered by the `channel`.
    pub enabled: bool,

    /// Human-readable description of the `channel`.
    pub description: String,
}

/// Visual theme of the workspace.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum Theme {
    /// Light theme.
    Light,

    /// Dark theme.
    Dark,
}

impl From<settings::Theme> for Theme {
    fn from(theme: settings::Theme) -> Self {
        match theme {
            settings::Theme::Light => Self::Light,
            settings::Theme::Dark => Self::Dark,
        }
    }
}

/// Channel delivering notifications.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "NotificationChannel")]
pub enum Channel {
    /// Notifications by email.
    Email,

    /// Short SMS alerts.
    Sms,

    /// Push notifications on the device.
    Push,
}

impl From<settings::Channel> for Channel {
    fn from(channel: settings::Channel) -> Self {
        match channel {
            settings::Channel::Email => Self::Email,
            settings::Channel::Sms => Self::Sms,
            settings::Channel::Push => Self::Push,
        }
    }
}

impl From<Channel> for settings::Channel {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Email => Self::Email,
            Channel::Sms => Self::Sms,
            Channel::Push => Self::Push,
        }
    }
}
