//! Named, data-only transitions.
//!
//! Every transition whose payload is plain data has a [`Mutation`] variant,
//! so a collaborator can drive the store from a deserialized message such as
//! `{"type": "addLogs", "payload": [...]}`. Transitions that take a
//! function (`update_all_logs`, `update_logs`) are only available as
//! methods on [`crate::Store`].

use crate::types::{Area, Asset, ErrorRecord, LogEntry, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A transition and its payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Mutation {
    // --- Notifications ---
    LogError(ErrorRecord),
    DismissError(usize),

    // --- Session ---
    ChangeUsername(String),
    ChangeEmail(String),
    ChangeUid(Option<String>),
    SetLoginStatus(bool),
    SetUseGeolocation(bool),

    // --- Farm ---
    ChangeFarmName(String),
    ChangeFarmUrl(String),
    AddLogs(Vec<LogEntry>),
    AddAssets(Vec<Asset>),
    AddAreas(Vec<Area>),
    AddLogAndMakeCurrent(LogEntry),
    SetCurrentLogIndex(usize),
    UpdateCurrentLog(Record),
    UpdateAsset(Asset),
    UpdateArea(Area),
    DeleteLog { index: usize },
    DeleteAllAssets,
    DeleteAllAreas,
    ClearLogs,
    ClearAssets,
    ClearAreas,
    SetPhotoLoc(String),
    SetGeoloc(Value),
    AddLocalArea(Value),
    ClearLocalArea,
}

impl Mutation {
    /// The transition's name as seen by subscribers.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::LogError(_) => "logError",
            Mutation::DismissError(_) => "dismissError",
            Mutation::ChangeUsername(_) => "changeUsername",
            Mutation::ChangeEmail(_) => "changeEmail",
            Mutation::ChangeUid(_) => "changeUid",
            Mutation::SetLoginStatus(_) => "setLoginStatus",
            Mutation::SetUseGeolocation(_) => "setUseGeolocation",
            Mutation::ChangeFarmName(_) => "changeFarmName",
            Mutation::ChangeFarmUrl(_) => "changeFarmUrl",
            Mutation::AddLogs(_) => "addLogs",
            Mutation::AddAssets(_) => "addAssets",
            Mutation::AddAreas(_) => "addAreas",
            Mutation::AddLogAndMakeCurrent(_) => "addLogAndMakeCurrent",
            Mutation::SetCurrentLogIndex(_) => "setCurrentLogIndex",
            Mutation::UpdateCurrentLog(_) => "updateCurrentLog",
            Mutation::UpdateAsset(_) => "updateAsset",
            Mutation::UpdateArea(_) => "updateArea",
            Mutation::DeleteLog { .. } => "deleteLog",
            Mutation::DeleteAllAssets => "deleteAllAssets",
            Mutation::DeleteAllAreas => "deleteAllAreas",
            Mutation::ClearLogs => "clearLogs",
            Mutation::ClearAssets => "clearAssets",
            Mutation::ClearAreas => "clearAreas",
            Mutation::SetPhotoLoc(_) => "setPhotoLoc",
            Mutation::SetGeoloc(_) => "setGeoloc",
            Mutation::AddLocalArea(_) => "addLocalArea",
            Mutation::ClearLocalArea => "clearLocalArea",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_tagged() {
        let mutation: Mutation = serde_json::from_value(json!({
            "type": "addLogs",
            "payload": [{"type": "farm_activity", "name": "walk"}],
        }))
        .unwrap();

        match mutation {
            Mutation::AddLogs(logs) => {
                assert_eq!(logs.len(), 1);
                assert_eq!(logs[0].get("name"), Some(&json!("walk")));
            }
            other => panic!("unexpected mutation {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_unit_and_struct_variants() {
        let clear: Mutation = serde_json::from_value(json!({"type": "clearLogs"})).unwrap();
        assert_eq!(clear, Mutation::ClearLogs);

        let delete: Mutation =
            serde_json::from_value(json!({"type": "deleteLog", "payload": {"index": 3}})).unwrap();
        assert_eq!(delete, Mutation::DeleteLog { index: 3 });
    }

    #[test]
    fn test_name_matches_tag() {
        let mutations = vec![
            Mutation::DismissError(0),
            Mutation::SetGeoloc(json!({})),
            Mutation::UpdateCurrentLog(Record::new()),
            Mutation::ClearLocalArea,
        ];

        for mutation in mutations {
            let value = serde_json::to_value(&mutation).unwrap();
            assert_eq!(value["type"], mutation.name());
        }
    }

    #[test]
    fn test_rejects_unknown_type() {
        let result: Result<Mutation, _> =
            serde_json::from_value(json!({"type": "dropDatabase"}));
        assert!(result.is_err());
    }
}
