use std::sync::Arc;

use chrono::{DateTime, Utc};
use tutor_core::Clock;
use tutor_core::model::{
    AnswerFeedback, Courseware, LessonCatalog, LessonId, Progress, QuizSession, QuizStep,
};
use tutor_core::time::elapsed_minutes;

use crate::error::TutorialError;

use super::state::{
    CompletionStats, LessonRequest, LoadedLesson, QuizAdvance, QuizTicket, Transition,
    TutorialState,
};

/// Drives the tutorial screens and owns the learner's progress.
///
/// Every lesson entry bumps a generation counter. Fetch results and quiz
/// advances carry the generation they were issued under and are dropped
/// once a newer navigation happened.
#[derive(Clone, Debug)]
pub struct TutorialMachine {
    catalog: Arc<LessonCatalog>,
    courseware: Arc<Courseware>,
    clock: Clock,
    state: TutorialState,
    progress: Progress,
    started_at: DateTime<Utc>,
    generation: u64,
    loaded: Option<LoadedLesson>,
    quiz: Option<QuizSession>,
}

impl TutorialMachine {
    #[must_use]
    pub fn new(
        catalog: Arc<LessonCatalog>,
        courseware: Arc<Courseware>,
        progress: Progress,
        clock: Clock,
    ) -> Self {
        Self {
            catalog,
            courseware,
            clock,
            state: TutorialState::Welcome,
            progress,
            started_at: clock.now(),
            generation: 0,
            loaded: None,
            quiz: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &TutorialState {
        &self.state
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn catalog(&self) -> &LessonCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&LoadedLesson> {
        self.loaded.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Welcome → first lesson.
    pub fn start(&mut self) -> Transition {
        self.enter_lesson(self.catalog.first_id(), None)
    }

    pub fn previous(&mut self) -> Transition {
        let Some(current) = self.state.lesson() else {
            return Transition::none();
        };
        match self.catalog.previous_before(current) {
            Some(id) => self.enter_lesson(id, None),
            None => Transition::none(),
        }
    }

    /// Next lesson, or the completion screen after the last one.
    pub fn next(&mut self) -> Transition {
        let Some(current) = self.state.lesson() else {
            return Transition::none();
        };
        match self.catalog.next_after(current) {
            Some(id) => self.enter_lesson(id, None),
            None => self.complete(),
        }
    }

    /// Jump to `lesson` from any state, optionally scrolling to `anchor`.
    ///
    /// # Errors
    ///
    /// Returns `TutorialError::LessonOutOfRange` and leaves the state
    /// untouched when `lesson` is not in the catalog.
    pub fn navigate(
        &mut self,
        lesson: LessonId,
        anchor: Option<String>,
    ) -> Result<Transition, TutorialError> {
        if !self.catalog.contains(lesson) {
            return Err(TutorialError::LessonOutOfRange {
                index: lesson.value(),
                len: self.catalog.len(),
            });
        }
        Ok(self.enter_lesson(lesson, anchor.filter(|a| !a.is_empty())))
    }

    /// Reopen the lesson stored in progress.
    pub fn resume(&mut self) -> Transition {
        let lesson = self.progress.current_lesson();
        let lesson = if self.catalog.contains(lesson) {
            lesson
        } else {
            self.catalog.first_id()
        };
        self.enter_lesson(lesson, None)
    }

    /// Back to the welcome screen, keeping progress.
    pub fn show_welcome(&mut self) -> Transition {
        self.leave_lesson();
        self.state = TutorialState::Welcome;
        Transition::none()
    }

    /// Back to the welcome screen with progress wiped.
    pub fn restart(&mut self) -> Transition {
        self.leave_lesson();
        self.state = TutorialState::Welcome;
        self.started_at = self.clock.now();

        let fresh = Progress::new();
        let progress_changed = self.progress != fresh;
        self.progress = fresh;
        tracing::debug!("tutorial restarted");
        Transition {
            request: None,
            progress_changed,
        }
    }

    /// Accept fetched markdown for `request`.
    ///
    /// Returns `None` and changes nothing when a newer navigation has
    /// superseded the request.
    pub fn complete_load(
        &mut self,
        request: &LessonRequest,
        markdown: String,
    ) -> Option<&LoadedLesson> {
        if !self.is_current(request) {
            tracing::debug!(lesson = %request.lesson, "discarding stale lesson load");
            return None;
        }

        let lesson = request.lesson;
        let title = self
            .catalog
            .get(lesson)
            .map(|l| l.title().to_string())
            .unwrap_or_default();
        self.quiz = self
            .courseware
            .quiz_for(lesson)
            .cloned()
            .map(QuizSession::new);
        self.loaded = Some(LoadedLesson {
            lesson,
            title,
            markdown,
            anchor: request.anchor.clone(),
            exercise: self.courseware.exercise_for(lesson).cloned(),
            generation: request.generation,
        });
        self.loaded.as_ref()
    }

    /// Whether a failed fetch belongs to the current navigation and should
    /// be reported.
    #[must_use]
    pub fn fail_load(&self, request: &LessonRequest) -> bool {
        self.is_current(request)
    }

    /// # Errors
    ///
    /// Returns `TutorialError::NoQuiz` without an active quiz, or the quiz's
    /// own error for an invalid selection.
    pub fn select_option(&mut self, option: usize) -> Result<(), TutorialError> {
        let quiz = self.quiz.as_mut().ok_or(TutorialError::NoQuiz)?;
        quiz.select(option)?;
        Ok(())
    }

    /// Grade the selected option. The returned ticket is handed back to
    /// `advance_quiz` once the reveal delays have elapsed.
    ///
    /// # Errors
    ///
    /// Returns `TutorialError::NoQuiz` without an active quiz, or the quiz's
    /// own error when nothing is selected or the answer was already graded.
    pub fn submit_answer(&mut self) -> Result<(AnswerFeedback, QuizTicket), TutorialError> {
        let generation = self.generation;
        let quiz = self.quiz.as_mut().ok_or(TutorialError::NoQuiz)?;
        let feedback = quiz.submit()?;
        let ticket = QuizTicket {
            generation,
            question: feedback.question_index,
        };
        Ok((feedback, ticket))
    }

    /// Move past a revealed answer. A finished quiz records its score.
    ///
    /// Returns `Ok(None)` for a stale ticket.
    ///
    /// # Errors
    ///
    /// Returns the quiz's own error if the answer was not revealed.
    pub fn advance_quiz(
        &mut self,
        ticket: QuizTicket,
    ) -> Result<Option<QuizAdvance>, TutorialError> {
        if ticket.generation != self.generation {
            return Ok(None);
        }
        let Some(lesson) = self.state.lesson() else {
            return Ok(None);
        };
        let Some(quiz) = self.quiz.as_mut() else {
            return Ok(None);
        };
        if quiz.current_index() != ticket.question {
            return Ok(None);
        }

        let step = quiz.advance()?;
        let progress_changed = match step {
            QuizStep::Finished { score, .. } => {
                tracing::debug!(lesson = %lesson, score = score.value(), "quiz finished");
                self.progress.record_quiz_score(lesson, score);
                true
            }
            QuizStep::Question(_) => false,
        };
        Ok(Some(QuizAdvance {
            step,
            progress_changed,
        }))
    }

    /// Mark the open lesson's exercise done. Returns whether progress changed.
    ///
    /// # Errors
    ///
    /// Returns `TutorialError::NotInLesson` outside a lesson.
    pub fn complete_exercise(&mut self) -> Result<bool, TutorialError> {
        let lesson = self.state.lesson().ok_or(TutorialError::NotInLesson)?;
        Ok(self.progress.complete_exercise(lesson))
    }

    fn is_current(&self, request: &LessonRequest) -> bool {
        request.generation == self.generation
            && self.state.lesson() == Some(request.lesson)
    }

    fn leave_lesson(&mut self) {
        self.generation += 1;
        self.loaded = None;
        self.quiz = None;
    }

    fn enter_lesson(&mut self, lesson: LessonId, anchor: Option<String>) -> Transition {
        self.leave_lesson();
        self.state = TutorialState::Lesson(lesson);
        let progress_changed = self.progress.set_current_lesson(lesson);
        tracing::debug!(lesson = %lesson, generation = self.generation, "entering lesson");

        Transition {
            request: Some(LessonRequest {
                lesson,
                anchor,
                generation: self.generation,
            }),
            progress_changed,
        }
    }

    fn complete(&mut self) -> Transition {
        self.leave_lesson();
        let now = self.clock.now();
        self.progress.mark_completed(now);

        let stats = CompletionStats {
            mean_quiz_score: self.progress.mean_quiz_score(),
            elapsed_minutes: elapsed_minutes(self.started_at, now),
            completed_exercises: self.progress.completed_exercise_count(),
            lesson_count: self.catalog.len(),
        };
        tracing::info!(
            mean_quiz_score = stats.mean_quiz_score,
            minutes = stats.elapsed_minutes,
            "tutorial completed"
        );
        self.state = TutorialState::Completion(stats);
        Transition {
            request: None,
            progress_changed: true,
        }
    }
}
