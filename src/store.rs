use super::models::{Note, NoteId};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

/// Storage behind the notes API. Handlers only ever talk to this trait, so a
/// persistent implementation can replace [`MemoryStore`] without touching
/// them.
///
/// Implementations must make each mutating call atomic: two concurrent
/// `create` calls may not observe the same maximum id.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, in insertion order.
    async fn list(&self) -> Result<Vec<Note>>;
    async fn get(&self, id: NoteId) -> Result<Option<Note>>;
    /// `content` is expected to have been validated by the caller.
    async fn create(&self, content: String, important: bool) -> Result<Note>;
    /// `Ok(None)` when there is no such note. An `important` of `None`
    /// returns the note unchanged.
    async fn set_importance(
        &self,
        id: NoteId,
        important: Option<bool>,
    ) -> Result<Option<Note>>;
    /// Deleting a note that does not exist is not an error.
    async fn delete(&self, id: NoteId) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryStore {
    pub fn new(notes: Vec<Note>) -> Self {
        MemoryStore {
            notes: RwLock::new(notes),
        }
    }

    /// The three notes every fresh process starts with.
    pub fn seeded() -> Self {
        Self::new(seed_notes())
    }
}

/// Ids are max + 1 over whatever is live right now, so deleting the newest
/// note frees its id for the next one.
fn next_id(notes: &[Note]) -> NoteId {
    notes.iter().map(|n| n.id).max().map_or(1, |max| max + 1)
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.notes.read().await.clone())
    }

    async fn get(&self, id: NoteId) -> Result<Option<Note>> {
        Ok(self.notes.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn create(&self, content: String, important: bool) -> Result<Note> {
        let mut notes = self.notes.write().await;
        let note = Note {
            id: next_id(&notes),
            content,
            important,
            date: Utc::now(),
        };
        notes.push(note.clone());

        Ok(note)
    }

    async fn set_importance(
        &self,
        id: NoteId,
        important: Option<bool>,
    ) -> Result<Option<Note>> {
        let mut notes = self.notes.write().await;
        let Some(slot) = notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(important) = important {
            *slot = slot.with_importance(important);
        }

        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: NoteId) -> Result<()> {
        self.notes.write().await.retain(|n| n.id != id);

        Ok(())
    }
}

fn seed_date(
    (y, mo, d): (i32, u32, u32),
    (h, mi, s): (u32, u32, u32),
    millis: i64,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("seed dates are valid calendar dates")
        + chrono::Duration::milliseconds(millis)
}

pub fn seed_notes() -> Vec<Note> {
    vec![
        Note {
            id: 1,
            content: "HTML is easy".to_string(),
            important: true,
            date: seed_date((2019, 5, 30), (17, 30, 31), 98),
        },
        Note {
            id: 2,
            content: "Browser can execute only JavaScript".to_string(),
            important: false,
            date: seed_date((2019, 5, 30), (18, 39, 34), 91),
        },
        Note {
            id: 3,
            content:
                "GET and POST are the most important methods of HTTP protocol"
                    .to_string(),
            important: true,
            date: seed_date((2019, 5, 30), (19, 20, 14), 298),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(notes: &[Note]) -> Vec<NoteId> {
        notes.iter().map(|n| n.id).collect()
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = MemoryStore::seeded();
        let notes = store.list().await.unwrap();
        assert_eq!(ids(&notes), vec![1, 2, 3]);
        assert_eq!(
            serde_json::to_value(&notes[0]).unwrap()["date"],
            "2019-05-30T17:30:31.098Z"
        );
    }

    #[tokio::test]
    async fn test_first_id_is_one() {
        let store = MemoryStore::default();
        let note = store.create("first".into(), false).await.unwrap();
        assert_eq!(note.id, 1);
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let store = MemoryStore::seeded();
        for i in 0..10 {
            store.create(format!("note {i}"), i % 2 == 0).await.unwrap();
        }
        store.delete(5).await.unwrap();
        store.create("after delete".into(), false).await.unwrap();

        let notes = store.list().await.unwrap();
        let unique: HashSet<NoteId> = notes.iter().map(|n| n.id).collect();
        assert_eq!(unique.len(), notes.len());
    }

    #[tokio::test]
    async fn test_freed_max_id_is_reused() {
        let store = MemoryStore::seeded();
        let note = store.create("test".into(), false).await.unwrap();
        assert_eq!(note.id, 4);
        store.delete(4).await.unwrap();
        let again = store.create("again".into(), false).await.unwrap();
        assert_eq!(again.id, 4);
    }

    #[tokio::test]
    async fn test_delete_keeps_order_and_gaps() {
        let store = MemoryStore::seeded();
        store.delete(2).await.unwrap();
        let note = store.create("new".into(), true).await.unwrap();
        assert_eq!(note.id, 4);
        assert_eq!(ids(&store.list().await.unwrap()), vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = MemoryStore::seeded();
        store.delete(42).await.unwrap();
        store.delete(42).await.unwrap();
        assert_eq!(store.list().await.unwrap(), seed_notes());
    }

    #[tokio::test]
    async fn test_set_importance() {
        let store = MemoryStore::seeded();

        let note = store.set_importance(1, Some(false)).await.unwrap().unwrap();
        assert!(!note.important);
        assert_eq!(note.content, "HTML is easy");
        assert_eq!(note.date, seed_notes()[0].date);

        // no value given, nothing changes
        let note = store.set_importance(2, None).await.unwrap().unwrap();
        assert_eq!(note, seed_notes()[1]);

        assert_eq!(ids(&store.list().await.unwrap()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_set_importance_missing() {
        let store = MemoryStore::seeded();
        assert!(store.set_importance(9, Some(true)).await.unwrap().is_none());
        assert_eq!(store.list().await.unwrap(), seed_notes());
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = std::sync::Arc::new(MemoryStore::default());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.create(format!("n{i}"), false).await.unwrap().id
                })
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            assert!(seen.insert(handle.await.unwrap()));
        }
        assert_eq!(seen.len(), 32);
    }
}
