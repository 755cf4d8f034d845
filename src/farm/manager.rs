//! Farm state: logs, assets, areas and in-progress scratch fields.

use super::collections::{KeyedCollection, LogList};
use crate::error::Result;
use crate::normalize::LogNormalizer;
use crate::types::{Area, Asset, LogEntry, Record};
use serde_json::{Map, Value};
use tracing::debug;

/// The farm's domain records plus transient working state.
#[derive(Clone, Debug)]
pub struct FarmState {
    name: String,
    url: String,
    logs: LogList,
    assets: KeyedCollection,
    areas: KeyedCollection,
    photo_loc: String,
    geolocation: Value,
    local_area: Vec<Value>,
}

impl Default for FarmState {
    fn default() -> Self {
        Self::new()
    }
}

impl FarmState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            logs: LogList::new(),
            assets: KeyedCollection::new("asset"),
            areas: KeyedCollection::new("area"),
            photo_loc: String::new(),
            geolocation: Value::Object(Map::new()),
            local_area: Vec::new(),
        }
    }

    // --- Reads ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn logs(&self) -> &[LogEntry] {
        self.logs.as_slice()
    }

    pub fn current_log_index(&self) -> usize {
        self.logs.current_index()
    }

    pub fn current_log(&self) -> Option<&LogEntry> {
        self.logs.current()
    }

    pub fn assets(&self) -> &[Asset] {
        self.assets.as_slice()
    }

    pub fn asset(&self, id: &Value) -> Option<&Asset> {
        self.assets.get(id)
    }

    pub fn areas(&self) -> &[Area] {
        self.areas.as_slice()
    }

    pub fn area(&self, id: &Value) -> Option<&Area> {
        self.areas.get(id)
    }

    pub fn photo_loc(&self) -> &str {
        &self.photo_loc
    }

    pub fn geolocation(&self) -> &Value {
        &self.geolocation
    }

    pub fn local_area(&self) -> &[Value] {
        &self.local_area
    }

    // --- Farm identity ---

    pub fn change_farm_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        debug!(name = %self.name, "Changed farm name");
    }

    pub fn change_farm_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        debug!(url = %self.url, "Changed farm url");
    }

    // --- Bulk append ---

    pub fn add_logs(&mut self, logs: Vec<LogEntry>) {
        self.logs.extend(logs);
    }

    pub fn add_assets(&mut self, assets: Vec<Asset>) {
        self.assets.extend(assets);
    }

    pub fn add_areas(&mut self, areas: Vec<Area>) {
        self.areas.extend(areas);
    }

    // --- Current log ---

    /// Append `log` and make it current. Returns the new current index.
    pub fn add_log_and_make_current(&mut self, log: LogEntry) -> usize {
        self.logs.push_current(log)
    }

    pub fn set_current_log_index(&mut self, index: usize) -> Result<()> {
        self.logs.set_current(index)
    }

    /// Merge `props` over the current log, normalize, and store the result in
    /// place of the current log.
    pub fn update_current_log(
        &mut self,
        props: Record,
        normalizer: &dyn LogNormalizer,
    ) -> Result<()> {
        self.logs.replace_current(|mut log| {
            log.merge(props);
            normalizer.normalize(log)
        })
    }

    pub fn delete_log(&mut self, index: usize) -> Result<LogEntry> {
        self.logs.remove(index)
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    // --- Batch transforms ---

    pub fn update_all_logs<F>(&mut self, f: F)
    where
        F: Fn(LogEntry) -> LogEntry,
    {
        self.logs.map_all(f);
    }

    pub fn update_logs<F>(&mut self, indices: &[usize], mapper: F) -> Result<()>
    where
        F: Fn(LogEntry) -> LogEntry,
    {
        self.logs.map_at(indices, mapper)
    }

    // --- Id-keyed replace ---

    pub fn update_asset(&mut self, asset: Asset) -> Result<()> {
        self.assets.replace(asset)
    }

    pub fn update_area(&mut self, area: Area) -> Result<()> {
        self.areas.replace(area)
    }

    // --- Bulk clear ---

    pub fn delete_all_assets(&mut self) {
        self.assets.clear();
    }

    pub fn delete_all_areas(&mut self) {
        self.areas.clear();
    }

    pub fn clear_assets(&mut self) {
        self.assets.clear();
    }

    pub fn clear_areas(&mut self) {
        self.areas.clear();
    }

    // --- Scratch fields ---

    pub fn set_photo_loc(&mut self, loc: impl Into<String>) {
        self.photo_loc = loc.into();
        debug!(photo_loc = %self.photo_loc, "Set photo location");
    }

    pub fn set_geoloc(&mut self, geolocation: Value) {
        self.geolocation = geolocation;
        debug!("Set geolocation");
    }

    pub fn add_local_area(&mut self, point: Value) {
        self.local_area.push(point);
        debug!(len = self.local_area.len(), "Added local area point");
    }

    pub fn clear_local_area(&mut self) {
        self.local_area.clear();
        debug!("Cleared local area");
    }
}
