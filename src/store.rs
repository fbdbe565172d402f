use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::vote::{Vote, VoteError};

pub const VOTES_DOCUMENT: &str = "votes";

/// Open votes keyed by title.
pub type Votes = BTreeMap<String, Vote>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access document `{name}`: {source}")]
    Io {
        name: String,
        source: std::io::Error,
    },
    #[error("document `{name}` is not valid JSON: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },
}

/// Named JSON documents in one directory, read and written whole.
#[derive(Clone, Debug)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// A document that does not exist yet loads as `T::default()`.
    pub async fn load<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        let text = match tokio::fs::read_to_string(self.path(name)).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Document `{name}` missing, using defaults");
                return Ok(T::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    name: name.to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            name: name.to_string(),
            source,
        })
    }

    /// Replaces the whole document. Written beside the target and renamed
    /// over it, so readers never observe a half-written file.
    pub async fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            name: name.to_string(),
            source,
        };

        let text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            name: name.to_string(),
            source,
        })?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;
        let target = self.path(name);
        let staging = self.dir.join(format!("{name}.json.tmp"));
        tokio::fs::write(&staging, text).await.map_err(io_err)?;
        tokio::fs::rename(&staging, &target).await.map_err(io_err)?;
        Ok(())
    }
}

/// Typed access to the `votes` document.
///
/// Mutations go through [`VoteStore::update`], which holds a lock across the
/// load/modify/save cycle so concurrent ballots on the same vote are not lost.
/// Nothing is cached between calls; every call reads the file.
pub struct VoteStore {
    documents: JsonStore,
    write_lock: Mutex<()>,
}

impl VoteStore {
    pub fn new(documents: JsonStore) -> Self {
        Self {
            documents,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn load_all(&self) -> Result<Votes, StoreError> {
        self.documents.load(VOTES_DOCUMENT).await
    }

    pub async fn get(&self, title: &str) -> Result<Option<Vote>, StoreError> {
        let mut votes = self.load_all().await?;
        Ok(votes.remove(title))
    }

    /// Runs `f` against the freshly loaded document and saves the result.
    /// If `f` fails, the file is left untouched.
    pub async fn update<R>(
        &self,
        f: impl FnOnce(&mut Votes) -> Result<R, VoteError>,
    ) -> Result<R, VoteError> {
        let _guard = self.write_lock.lock().await;

        let mut votes = self.load_all().await?;
        let result = f(&mut votes)?;
        self.documents.save(VOTES_DOCUMENT, &votes).await?;
        Ok(result)
    }

    /// Stores a vote under its title. An open vote with the same title is
    /// never replaced.
    pub async fn insert_new(&self, vote: Vote) -> Result<(), VoteError> {
        self.update(|votes| {
            if votes.contains_key(&vote.title) {
                return Err(VoteError::DuplicateTitle(vote.title));
            }
            votes.insert(vote.title.clone(), vote);
            Ok(())
        })
        .await
    }

    pub async fn remove(&self, title: &str) -> Result<Vote, VoteError> {
        self.update(|votes| {
            votes
                .remove(title)
                .ok_or_else(|| VoteError::NotFound(title.to_string()))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::Vote;

    #[tokio::test]
    async fn test_missing_document_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let votes: Votes = store.load("votes").await.unwrap();
        assert!(votes.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested"));

        let mut votes = Votes::new();
        let mut lunch = Vote::create("Lunch", Some("Where?".to_string()), false, "Pizza, Sushi")
            .unwrap();
        lunch.register(0, 7, "Ana").unwrap();
        votes.insert(lunch.title.clone(), lunch);
        let mut raid = Vote::create("Raid night", None, true, "Wed,Thu").unwrap();
        raid.register(1, 9, "Bo").unwrap();
        votes.insert(raid.title.clone(), raid);

        store.save("votes", &votes).await.unwrap();
        let loaded: Votes = store.load("votes").await.unwrap();
        assert_eq!(loaded, votes);
        assert!(!dir.path().join("nested").join("votes.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("votes.json"), "{ not json").unwrap();
        let store = JsonStore::new(dir.path());
        let err = store.load::<Votes>("votes").await.unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[tokio::test]
    async fn test_failed_update_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let votes = VoteStore::new(JsonStore::new(dir.path()));

        let result: Result<(), _> = votes
            .update(|_| Err(VoteError::NotFound("Lunch".to_string())))
            .await;
        assert!(result.is_err());
        assert!(!dir.path().join("votes.json").exists());
    }

    #[tokio::test]
    async fn test_insert_new_keeps_existing_vote() {
        let dir = tempfile::tempdir().unwrap();
        let votes = VoteStore::new(JsonStore::new(dir.path()));

        let first = Vote::create("Lunch", None, true, "Pizza").unwrap();
        votes.insert_new(first.clone()).await.unwrap();

        let second = Vote::create("Lunch", None, false, "Sushi, Tacos").unwrap();
        let err = votes.insert_new(second).await.unwrap_err();
        assert!(matches!(err, VoteError::DuplicateTitle(t) if t == "Lunch"));
        assert_eq!(votes.get("Lunch").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_remove_returns_vote() {
        let dir = tempfile::tempdir().unwrap();
        let votes = VoteStore::new(JsonStore::new(dir.path()));

        let lunch = Vote::create("Lunch", None, true, "Pizza").unwrap();
        votes.insert_new(lunch.clone()).await.unwrap();

        assert_eq!(votes.remove("Lunch").await.unwrap(), lunch);
        assert!(votes.load_all().await.unwrap().is_empty());
        assert!(matches!(
            votes.remove("Lunch").await.unwrap_err(),
            VoteError::NotFound(_)
        ));
    }
}
