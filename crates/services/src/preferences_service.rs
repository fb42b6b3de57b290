use std::sync::Arc;

use storage::repository::KeyValueStore;
use tutor_core::model::{ButtonPosition, Theme};

use crate::error::PreferencesError;

pub const THEME_KEY: &str = "theme";
pub const BUTTON_POSITION_KEY: &str = "searchButtonPosition";

/// Theme choice and floating search button placement.
#[derive(Clone)]
pub struct PreferencesService {
    kv: Arc<dyn KeyValueStore>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored theme, or `Theme::System` when unset or unrecognised.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError::Storage` if the store cannot be read.
    pub async fn theme(&self) -> Result<Theme, PreferencesError> {
        let Some(raw) = self.kv.get(THEME_KEY).await? else {
            return Ok(Theme::default());
        };
        Ok(raw.parse().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring stored theme");
            Theme::default()
        }))
    }

    /// # Errors
    ///
    /// Returns `PreferencesError::Storage` if the write fails.
    pub async fn set_theme(&self, theme: Theme) -> Result<(), PreferencesError> {
        self.kv.put(THEME_KEY, theme.as_str()).await?;
        Ok(())
    }

    /// Stored button offset; `None` lets the view use its default corner.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError::Storage` if the store cannot be read.
    pub async fn button_position(&self) -> Result<Option<ButtonPosition>, PreferencesError> {
        let Some(raw) = self.kv.get(BUTTON_POSITION_KEY).await? else {
            return Ok(None);
        };
        let position = serde_json::from_str::<ButtonPosition>(&raw)
            .ok()
            .and_then(|pos| ButtonPosition::new(pos.x, pos.y).ok());
        if position.is_none() {
            tracing::warn!(raw = %raw, "ignoring stored search button position");
        }
        Ok(position)
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` if encoding or the write fails.
    pub async fn set_button_position(
        &self,
        position: ButtonPosition,
    ) -> Result<(), PreferencesError> {
        let json = serde_json::to_string(&position)?;
        self.kv.put(BUTTON_POSITION_KEY, &json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn theme_defaults_and_roundtrips() {
        let store = InMemoryStore::new();
        let svc = PreferencesService::new(Arc::new(store.clone()));
        assert_eq!(svc.theme().await.unwrap(), Theme::System);

        svc.set_theme(Theme::Dark).await.unwrap();
        assert_eq!(svc.theme().await.unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn unknown_theme_falls_back_to_system() {
        let store = InMemoryStore::new();
        store.put(THEME_KEY, "sepia").await.unwrap();
        let svc = PreferencesService::new(Arc::new(store));
        assert_eq!(svc.theme().await.unwrap(), Theme::System);
    }

    #[tokio::test]
    async fn button_position_tolerates_garbage() {
        let store = InMemoryStore::new();
        let svc = PreferencesService::new(Arc::new(store.clone()));
        assert_eq!(svc.button_position().await.unwrap(), None);

        store.put(BUTTON_POSITION_KEY, "[1,2").await.unwrap();
        assert_eq!(svc.button_position().await.unwrap(), None);

        let pos = ButtonPosition::new(24.0, 480.5).unwrap();
        svc.set_button_position(pos).await.unwrap();
        assert_eq!(svc.button_position().await.unwrap(), Some(pos));
    }
}
