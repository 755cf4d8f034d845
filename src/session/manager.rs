//! Session state implementation.

use crate::types::{Settings, UserSession};
use tracing::debug;

/// User identity, login flag and settings.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    user: UserSession,
    settings: Settings,
}

impl SessionState {
    pub fn new(settings: Settings) -> Self {
        Self {
            user: UserSession::default(),
            settings,
        }
    }

    pub fn user(&self) -> &UserSession {
        &self.user
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn change_username(&mut self, name: impl Into<String>) {
        self.user.name = name.into();
        debug!("Changed username");
    }

    pub fn change_email(&mut self, email: impl Into<String>) {
        self.user.email = email.into();
        debug!("Changed email");
    }

    pub fn change_uid(&mut self, uid: Option<String>) {
        debug!(has_uid = uid.is_some(), "Changed uid");
        self.user.uid = uid;
    }

    pub fn set_login_status(&mut self, is_logged_in: bool) {
        self.user.is_logged_in = is_logged_in;
        debug!(is_logged_in, "Set login status");
    }

    pub fn set_use_geolocation(&mut self, use_geolocation: bool) {
        self.settings.use_geolocation = use_geolocation;
        debug!(use_geolocation, "Set geolocation setting");
    }
}
