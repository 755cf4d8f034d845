//! Main Store struct tying all components together.

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StoreError};
use crate::farm::FarmState;
use crate::mutations::Mutation;
use crate::normalize::{DefaultLogFactory, LogNormalizer};
use crate::notifications::ErrorQueue;
use crate::session::SessionState;
use crate::subscriptions::{
    ActionPhase, SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager,
    DEFAULT_BUFFER_SIZE,
};
use crate::types::{Area, Asset, ErrorRecord, LogEntry, Settings, Timestamp, UserSession};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write;
use tracing::{debug, warn};

/// Name of the log-creation action, as seen by subscribers.
pub const INITIALIZE_LOG: &str = "initializeLog";

/// Name of the sync hook action, as seen by subscribers.
pub const FORCE_SYNC_ASSETS_AND_AREAS: &str = "forceSyncAssetsAndAreas";

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Settings the store starts with.
    pub settings: Settings,

    /// Buffer size (events) for subscribers that don't choose one. At least 1.
    pub event_buffer_size: usize,

    /// chrono format for the date part of a new log's name.
    pub date_format: String,

    /// chrono format for the time part of a new log's name.
    pub time_format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            event_buffer_size: DEFAULT_BUFFER_SIZE,
            // en-US: 3/4/2019 and 3:04:05 PM
            date_format: "%-m/%-d/%Y".to_string(),
            time_format: "%-I:%M:%S %p".to_string(),
        }
    }
}

/// Copy of the session part of the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub errors: Vec<ErrorRecord>,
    pub user: UserSession,
    pub settings: Settings,
}

/// Copy of the farm part of the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmSnapshot {
    pub name: String,
    pub url: String,
    pub logs: Vec<LogEntry>,
    pub assets: Vec<Asset>,
    pub areas: Vec<Area>,
    pub current_log_index: usize,
    pub photo_loc: String,
    pub geolocation: Value,
    pub local_area: Vec<Value>,
}

/// Owned copy of the whole state tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub shell: ShellSnapshot,
    pub farm: FarmSnapshot,
}

/// The application state tree.
///
/// All writes go through [`Store::commit`], the closure-based log
/// transforms, or an action. Each write either applies completely or
/// returns an error without touching the tree. Subscribers are notified
/// after a write applies.
///
/// The store assumes a single writer; `&mut self` on every transition
/// enforces that for in-process callers.
pub struct Store {
    /// Store configuration.
    config: StoreConfig,

    /// User identity and settings.
    session: SessionState,

    /// Error notifications.
    notifications: ErrorQueue,

    /// Logs, assets, areas and scratch fields.
    farm: FarmState,

    /// Normalizes logs on creation and edit.
    normalizer: Box<dyn LogNormalizer + Send + Sync>,

    /// Time source for new logs.
    clock: Box<dyn Clock + Send + Sync>,

    /// Hook subscribers.
    subscriptions: SubscriptionManager,
}

impl Store {
    /// Create a store with explicit capabilities.
    pub fn new<N, C>(config: StoreConfig, normalizer: N, clock: C) -> Self
    where
        N: LogNormalizer + Send + Sync + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let subscriptions = SubscriptionManager::with_buffer_size(config.event_buffer_size);
        let session = SessionState::new(config.settings.clone());

        debug!(?config, "Created store");

        Self {
            config,
            session,
            notifications: ErrorQueue::new(),
            farm: FarmState::new(),
            normalizer: Box::new(normalizer),
            clock: Box::new(clock),
            subscriptions,
        }
    }

    /// Create a store with default config, [`DefaultLogFactory`] and the
    /// system clock.
    pub fn with_defaults() -> Self {
        Self::new(StoreConfig::default(), DefaultLogFactory, SystemClock)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // --- Reads ---

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn notifications(&self) -> &ErrorQueue {
        &self.notifications
    }

    pub fn farm(&self) -> &FarmState {
        &self.farm
    }

    /// Owned copy of the whole tree.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            shell: ShellSnapshot {
                errors: self.notifications.errors().to_vec(),
                user: self.session.user().clone(),
                settings: self.session.settings().clone(),
            },
            farm: FarmSnapshot {
                name: self.farm.name().to_string(),
                url: self.farm.url().to_string(),
                logs: self.farm.logs().to_vec(),
                assets: self.farm.assets().to_vec(),
                areas: self.farm.areas().to_vec(),
                current_log_index: self.farm.current_log_index(),
                photo_loc: self.farm.photo_loc().to_string(),
                geolocation: self.farm.geolocation().clone(),
                local_area: self.farm.local_area().to_vec(),
            },
        }
    }

    // --- Subscriptions ---

    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id);
    }

    // --- Mutations ---

    /// Apply a named transition.
    pub fn commit(&mut self, mutation: Mutation) -> Result<()> {
        let name = mutation.name();

        if let Err(e) = self.apply(mutation) {
            warn!(mutation = name, error = %e, "Mutation rejected");
            return Err(e);
        }

        debug!(mutation = name, "Mutation applied");
        self.subscriptions.broadcast_mutation(name);
        Ok(())
    }

    /// Deserialize a [`Mutation`] from JSON and apply it.
    pub fn commit_json(&mut self, message: Value) -> Result<()> {
        let mutation: Mutation = serde_json::from_value(message)?;
        self.commit(mutation)
    }

    fn apply(&mut self, mutation: Mutation) -> Result<()> {
        match mutation {
            Mutation::LogError(error) => self.notifications.log_error(error),
            Mutation::DismissError(index) => self.notifications.dismiss_error(index)?,

            Mutation::ChangeUsername(name) => self.session.change_username(name),
            Mutation::ChangeEmail(email) => self.session.change_email(email),
            Mutation::ChangeUid(uid) => self.session.change_uid(uid),
            Mutation::SetLoginStatus(status) => self.session.set_login_status(status),
            Mutation::SetUseGeolocation(value) => self.session.set_use_geolocation(value),

            Mutation::ChangeFarmName(name) => self.farm.change_farm_name(name),
            Mutation::ChangeFarmUrl(url) => self.farm.change_farm_url(url),
            Mutation::AddLogs(logs) => self.farm.add_logs(logs),
            Mutation::AddAssets(assets) => self.farm.add_assets(assets),
            Mutation::AddAreas(areas) => self.farm.add_areas(areas),
            Mutation::AddLogAndMakeCurrent(log) => {
                self.farm.add_log_and_make_current(log);
            }
            Mutation::SetCurrentLogIndex(index) => self.farm.set_current_log_index(index)?,
            Mutation::UpdateCurrentLog(props) => {
                self.farm.update_current_log(props, &*self.normalizer)?
            }
            Mutation::UpdateAsset(asset) => self.farm.update_asset(asset)?,
            Mutation::UpdateArea(area) => self.farm.update_area(area)?,
            Mutation::DeleteLog { index } => {
                self.farm.delete_log(index)?;
            }
            Mutation::DeleteAllAssets => self.farm.delete_all_assets(),
            Mutation::DeleteAllAreas => self.farm.delete_all_areas(),
            Mutation::ClearLogs => self.farm.clear_logs(),
            Mutation::ClearAssets => self.farm.clear_assets(),
            Mutation::ClearAreas => self.farm.clear_areas(),
            Mutation::SetPhotoLoc(loc) => self.farm.set_photo_loc(loc),
            Mutation::SetGeoloc(geolocation) => self.farm.set_geoloc(geolocation),
            Mutation::AddLocalArea(point) => self.farm.add_local_area(point),
            Mutation::ClearLocalArea => self.farm.clear_local_area(),
        }

        Ok(())
    }

    /// Replace every log with `f(log)`.
    pub fn update_all_logs<F>(&mut self, f: F)
    where
        F: Fn(LogEntry) -> LogEntry,
    {
        self.farm.update_all_logs(f);
        self.subscriptions.broadcast_mutation("updateAllLogs");
    }

    /// Replace the logs at `indices`, in order, with `mapper(log)`.
    ///
    /// Fails with [`StoreError::IndexOutOfRange`] before touching any log if
    /// an index is invalid.
    pub fn update_logs<F>(&mut self, indices: &[usize], mapper: F) -> Result<()>
    where
        F: Fn(LogEntry) -> LogEntry,
    {
        self.farm.update_logs(indices, mapper)?;
        self.subscriptions.broadcast_mutation("updateLogs");
        Ok(())
    }

    // --- Actions ---

    /// Create a log of `log_type` stamped with the current time and make it
    /// the current log. Returns the new current log index.
    ///
    /// The log is named `"<date> - <time>"` using the configured formats.
    pub fn initialize_log(&mut self, log_type: &str) -> Result<usize> {
        self.subscriptions.broadcast_action(INITIALIZE_LOG, ActionPhase::Before);

        let now = self.clock.now();
        let timestamp = Timestamp::from_datetime(&now);
        let date = format_datetime(&now, &self.config.date_format)?;
        let time = format_datetime(&now, &self.config.time_format)?;

        let raw = LogEntry::new()
            .with("type", log_type)
            .with("name", format!("{} - {}", date, time)).with("timestamp", timestamp.to_string());
        let log = self.normalizer.normalize(raw)?;

        self.commit(Mutation::AddLogAndMakeCurrent(log))?;
        let index = self.farm.current_log_index();

        debug!(log_type, %timestamp, index, "Initialized log");
        self.subscriptions.broadcast_action(INITIALIZE_LOG, ActionPhase::After);
        Ok(index)
    }

    /// Extension point for synchronizing assets and areas. Does no work
    /// itself; subscribers to the action carry out the sync.
    pub fn force_sync_assets_and_areas(&self) {
        self.subscriptions.broadcast_action(FORCE_SYNC_ASSETS_AND_AREAS, ActionPhase::Before);
        debug!("Requested asset and area sync");
        self.subscriptions.broadcast_action(FORCE_SYNC_ASSETS_AND_AREAS, ActionPhase::After);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Format `dt` with a chrono format string, rejecting unusable formats
/// instead of panicking.
fn format_datetime(dt: &DateTime<FixedOffset>, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", dt.format(format))
        .map_err(|_| StoreError::InvalidFormat(format.to_string()))?;
    Ok(out)
}
