use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use api_types::auth::AuthUser;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::ClientError;

/// The signed-in user, shared by every clone.
///
/// Set on login and register; cleared on sign-out and when a token refresh
/// fails.
#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Arc<RwLock<Option<AuthUser>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session resumed from a saved profile.
    pub fn with_user(user: Option<AuthUser>) -> Self {
        Self {
            user: Arc::new(RwLock::new(user)),
        }
    }

    pub async fn current_user(&self) -> Option<AuthUser> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    pub(crate) async fn set(&self, user: AuthUser) {
        *self.user.write().await = Some(user);
    }

    pub(crate) async fn clear(&self) {
        self.user.write().await.take();
    }
}

/// A cookie kept between runs, scoped to the path the server set it for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub path: String,
    /// `name=value`.
    pub pair: String,
}

/// What the CLI remembers between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub cookies: Vec<StoredCookie>,
}

/// JSON file holding a [`SavedSession`].
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved session. A missing file is an empty session; so is an
    /// unreadable one, which only gets logged.
    pub fn load(&self) -> Result<SavedSession, ClientError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SavedSession::default());
            }
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&content) {
            Ok(saved) => Ok(saved),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring corrupt session file: {err}");
                Ok(SavedSession::default())
            }
        }
    }

    pub fn save(&self, saved: &SavedSession) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(saved)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            net_salary_usd: 1190.0,
        }
    }

    fn temp_store(name: &str) -> SessionStore {
        let dir = std::env::temp_dir()
            .join(format!("fintrack_session_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        SessionStore::new(dir.join("session.json"))
    }

    #[tokio::test]
    async fn session_set_and_clear_are_shared() {
        let session = Session::new();
        let other = session.clone();
        session.set(user()).await;
        assert_eq!(other.current_user().await, Some(user()));
        other.clear().await;
        assert!(!session.is_authenticated().await);
    }

    #[test]
    fn store_round_trip_and_clear() {
        let store = temp_store("round_trip");
        assert_eq!(store.load().unwrap(), SavedSession::default());

        let saved = SavedSession {
            user: Some(user()),
            cookies: vec![StoredCookie {
                path: "/".to_string(),
                pair: "access_token=abc".to_string(),
            }],
        };
        store.save(&saved).unwrap();
        assert_eq!(store.load().unwrap(), saved);

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), SavedSession::default());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let store = temp_store("corrupt");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load().unwrap(), SavedSession::default());
    }
}
