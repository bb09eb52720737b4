use super::{config::Config, store::NoteStore};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

pub type NoteId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub important: bool,
    #[serde(serialize_with = "serialize_millis")]
    pub date: DateTime<Utc>,
}

impl Note {
    /// Notes are immutable apart from importance, so an update is a new note
    /// sharing everything else with the old one.
    pub fn with_importance(&self, important: bool) -> Note {
        Note {
            important,
            ..self.clone()
        }
    }
}

/// `2019-05-30T17:30:31.098Z`; millisecond precision, always UTC.
fn serialize_millis<S>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Body of `POST /api/notes`. Both fields are optional at the wire level;
/// the controller decides what is required.
#[derive(Debug, Default, Deserialize)]
pub struct NewNote {
    pub content: Option<String>,
    pub important: Option<bool>,
}

/// Body of `PUT /api/notes/:id`. A missing `important` leaves the note
/// alone, an explicit `false` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct ImportanceUpdate {
    pub important: Option<bool>,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: impl NoteStore + 'static, config: Config) -> Self {
        AppState {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
    pub environment: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}
