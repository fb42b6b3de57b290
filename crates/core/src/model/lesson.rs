use thiserror::Error;

use crate::model::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson catalog must contain at least one lesson")]
    EmptyCatalog,

    #[error("lesson {index} has an empty title")]
    EmptyTitle { index: usize },

    #[error("lesson {index} has an empty source reference")]
    EmptySource { index: usize },
}

/// Opaque fetch key for a lesson's markdown (a file name or URL path segment).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LessonSource(String);

impl LessonSource {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single lesson of the tutorial. Immutable once the catalog is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    source: LessonSource,
}

impl Lesson {
    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn source(&self) -> &LessonSource {
        &self.source
    }
}

/// Ordered, non-empty list of lessons. A lesson's id is its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// Build a catalog from `(title, source)` pairs in display order.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyCatalog` when no entries are given, or
    /// `EmptyTitle`/`EmptySource` when an entry is blank.
    pub fn new<I, T, S>(entries: I) -> Result<Self, LessonError>
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<String>,
        S: Into<String>,
    {
        let mut lessons = Vec::new();
        for (index, (title, source)) in entries.into_iter().enumerate() {
            let title = title.into().trim().to_string();
            if title.is_empty() {
                return Err(LessonError::EmptyTitle { index });
            }
            let source = source.into().trim().to_string();
            if source.is_empty() {
                return Err(LessonError::EmptySource { index });
            }
            lessons.push(Lesson {
                id: LessonId::new(index),
                title,
                source: LessonSource(source),
            });
        }

        if lessons.is_empty() {
            return Err(LessonError::EmptyCatalog);
        }

        Ok(Self { lessons })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.get(id.value())
    }

    #[must_use]
    pub fn contains(&self, id: LessonId) -> bool {
        id.value() < self.lessons.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter()
    }

    #[must_use]
    pub fn first_id(&self) -> LessonId {
        LessonId::new(0)
    }

    #[must_use]
    pub fn last_id(&self) -> LessonId {
        LessonId::new(self.lessons.len() - 1)
    }

    #[must_use]
    pub fn is_last(&self, id: LessonId) -> bool {
        id == self.last_id()
    }

    #[must_use]
    pub fn next_after(&self, id: LessonId) -> Option<LessonId> {
        let next = id.value().checked_add(1)?;
        (next < self.lessons.len()).then(|| LessonId::new(next))
    }

    #[must_use]
    pub fn previous_before(&self, id: LessonId) -> Option<LessonId> {
        id.value().checked_sub(1).map(LessonId::new)
    }
}

impl<'a> IntoIterator for &'a LessonCatalog {
    type Item = &'a Lesson;
    type IntoIter = std::slice::Iter<'a, Lesson>;

    fn into_iter(self) -> Self::IntoIter {
        self.lessons.iter()
    }
}
