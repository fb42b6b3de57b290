use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use storage::lessons::LessonStore;
use storage::repository::StorageError;
use tutor_core::model::Lesson;

/// Fetches lesson markdown from `{base_url}/{source}` over HTTP.
#[derive(Clone, Debug)]
pub struct HttpLessonStore {
    client: Client,
    base_url: String,
}

impl HttpLessonStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn url_for(&self, lesson: &Lesson) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            lesson.source().as_str().trim_start_matches('/')
        )
    }
}

#[async_trait]
impl LessonStore for HttpLessonStore {
    async fn fetch(&self, lesson: &Lesson) -> Result<String, StorageError> {
        let url = self.url_for(lesson);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| StorageError::Fetch(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound);
        }
        if !status.is_success() {
            return Err(StorageError::Fetch(format!("{url} returned {status}")));
        }

        response
            .text()
            .await
            .map_err(|err| StorageError::Fetch(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::{LessonCatalog, LessonId};

    #[test]
    fn url_joins_base_and_source_with_one_slash() {
        let catalog = LessonCatalog::new([("Basics", "01-git-basics.md")]).unwrap();
        let lesson = catalog.get(LessonId::new(0)).unwrap();

        let store = HttpLessonStore::new("https://example.org/tutorial/");
        assert_eq!(
            store.url_for(lesson),
            "https://example.org/tutorial/01-git-basics.md"
        );
        let store = HttpLessonStore::new("https://example.org/tutorial");
        assert_eq!(
            store.url_for(lesson),
            "https://example.org/tutorial/01-git-basics.md"
        );
    }
}
