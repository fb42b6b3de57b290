use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuizScore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question has an empty prompt")]
    EmptyPrompt,

    #[error("question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct option {correct} is out of range for {len} options")]
    CorrectOutOfRange { correct: usize, len: usize },

    #[error("quiz must contain at least one question")]
    EmptyQuiz,

    #[error("option {option} is out of range for {len} options")]
    OptionOutOfRange { option: usize, len: usize },

    #[error("no option selected")]
    NoSelection,

    #[error("question is not accepting answers")]
    NotAnswering,

    #[error("answer has not been revealed yet")]
    NotRevealed,

    #[error("quiz already finished")]
    Finished,
}

/// Unvalidated question as it appears in courseware files.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionDraft {
    /// Validate the draft into a `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the prompt is blank, there are fewer than two
    /// options, or the correct index points past the options.
    pub fn validate(self) -> Result<Question, QuizError> {
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuizError::EmptyPrompt);
        }
        let len = self.options.len();
        if len < 2 {
            return Err(QuizError::TooFewOptions { len });
        }
        if self.correct >= len {
            return Err(QuizError::CorrectOutOfRange {
                correct: self.correct,
                len,
            });
        }

        Ok(Question {
            prompt,
            options: self.options,
            correct: self.correct,
            explanation: self.explanation.trim().to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct: usize,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Ordered, non-empty list of questions attached to a lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuizError::EmptyQuiz` when `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// How an option is shown once the answer is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Incorrect,
}

/// Outcome of submitting the selected option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_index: usize,
    pub selected: usize,
    pub correct_option: usize,
    pub is_correct: bool,
    pub marks: Vec<OptionMark>,
    pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Answering,
    Revealed,
    Finished(QuizScore),
}

/// What comes after a revealed answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStep {
    Question(usize),
    Finished {
        score: QuizScore,
        correct: usize,
        total: usize,
    },
}

/// In-memory quiz run for the lesson currently on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSession {
    quiz: Quiz,
    current: usize,
    correct_count: usize,
    selected: Option<usize>,
    phase: QuizPhase,
}

impl QuizSession {
    #[must_use]
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            current: 0,
            correct_count: 0,
            selected: None,
            phase: QuizPhase::Answering,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Finished(_) => None,
            _ => self.quiz.questions.get(self.current),
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, QuizPhase::Finished(_))
    }

    /// Mark `option` as the chosen answer, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswering` after submission, or
    /// `OptionOutOfRange` for an unknown option.
    pub fn select(&mut self, option: usize) -> Result<(), QuizError> {
        let question = self.answering_question()?;
        let len = question.options.len();
        if option >= len {
            return Err(QuizError::OptionOutOfRange { option, len });
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Grade the selected option and reveal the marking.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` if nothing is selected, or
    /// `NotAnswering` if the current answer was already submitted.
    pub fn submit(&mut self) -> Result<AnswerFeedback, QuizError> {
        let question = self.answering_question()?;
        let selected = self.selected.ok_or(QuizError::NoSelection)?;
        let correct_option = question.correct;
        let is_correct = selected == correct_option;

        let marks = (0..question.options.len())
            .map(|index| {
                if index == correct_option {
                    OptionMark::Correct
                } else if index == selected {
                    OptionMark::Incorrect
                } else {
                    OptionMark::Neutral
                }
            })
            .collect();
        let explanation = question.explanation.clone();

        if is_correct {
            self.correct_count += 1;
        }
        self.phase = QuizPhase::Revealed;

        Ok(AnswerFeedback {
            question_index: self.current,
            selected,
            correct_option,
            is_correct,
            marks,
            explanation,
        })
    }

    /// Move past a revealed answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRevealed` before submission, or `Finished` if
    /// the quiz already ended.
    pub fn advance(&mut self) -> Result<QuizStep, QuizError> {
        match self.phase {
            QuizPhase::Answering => return Err(QuizError::NotRevealed),
            QuizPhase::Finished(_) => return Err(QuizError::Finished),
            QuizPhase::Revealed => {}
        }

        self.current += 1;
        self.selected = None;

        if self.current < self.quiz.len() {
            self.phase = QuizPhase::Answering;
            return Ok(QuizStep::Question(self.current));
        }

        let total = self.quiz.len();
        let score = QuizScore::from_ratio(self.correct_count, total);
        self.phase = QuizPhase::Finished(score);
        Ok(QuizStep::Finished {
            score,
            correct: self.correct_count,
            total,
        })
    }

    fn answering_question(&self) -> Result<&Question, QuizError> {
        match self.phase {
            QuizPhase::Answering => self
                .quiz
                .questions
                .get(self.current)
                .ok_or(QuizError::Finished),
            QuizPhase::Revealed => Err(QuizError::NotAnswering),
            QuizPhase::Finished(_) => Err(QuizError::Finished),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> Question {
        QuestionDraft {
            prompt: "What does `git init` do?".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
            explanation: "It creates a repository.".into(),
        }
        .validate()
        .unwrap()
    }

    fn quiz(len: usize) -> Quiz {
        Quiz::new((0..len).map(|_| question(1)).collect()).unwrap()
    }

    #[test]
    fn draft_validation_rejects_bad_questions() {
        let draft = QuestionDraft {
            prompt: " ".into(),
            options: vec!["a".into(), "b".into()],
            correct: 0,
            explanation: String::new(),
        };
        assert_eq!(draft.validate(), Err(QuizError::EmptyPrompt));

        let draft = QuestionDraft {
            prompt: "Q".into(),
            options: vec!["a".into()],
            correct: 0,
            explanation: String::new(),
        };
        assert_eq!(draft.validate(), Err(QuizError::TooFewOptions { len: 1 }));

        let draft = QuestionDraft {
            prompt: "Q".into(),
            options: vec!["a".into(), "b".into()],
            correct: 2,
            explanation: String::new(),
        };
        assert_eq!(
            draft.validate(),
            Err(QuizError::CorrectOutOfRange { correct: 2, len: 2 })
        );
    }

    #[test]
    fn three_of_four_scores_seventy_five() {
        let mut session = QuizSession::new(quiz(4));
        let answers = [1, 1, 0, 1];
        let mut last = None;
        for answer in answers {
            session.select(answer).unwrap();
            session.submit().unwrap();
            last = Some(session.advance().unwrap());
        }

        assert_eq!(
            last,
            Some(QuizStep::Finished {
                score: QuizScore::new(75).unwrap(),
                correct: 3,
                total: 4,
            })
        );
        assert!(session.is_finished());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn selection_replaces_previous_choice() {
        let mut session = QuizSession::new(quiz(1));
        session.select(0).unwrap();
        session.select(2).unwrap();
        assert_eq!(session.selected(), Some(2));
        assert_eq!(
            session.select(9),
            Err(QuizError::OptionOutOfRange { option: 9, len: 4 })
        );
    }

    #[test]
    fn submit_marks_correct_and_incorrect_options() {
        let mut session = QuizSession::new(quiz(2));
        session.select(3).unwrap();
        let feedback = session.submit().unwrap();

        assert!(!feedback.is_correct);
        assert_eq!(
            feedback.marks,
            vec![
                OptionMark::Neutral,
                OptionMark::Correct,
                OptionMark::Neutral,
                OptionMark::Incorrect
            ]
        );
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.phase(), QuizPhase::Revealed);
        assert_eq!(session.select(1), Err(QuizError::NotAnswering));
        assert_eq!(session.submit(), Err(QuizError::NotAnswering));
    }

    #[test]
    fn submit_requires_selection_and_advance_requires_reveal() {
        let mut session = QuizSession::new(quiz(2));
        assert_eq!(session.submit(), Err(QuizError::NoSelection));
        assert_eq!(session.advance(), Err(QuizError::NotRevealed));

        session.select(1).unwrap();
        session.submit().unwrap();
        assert_eq!(session.advance(), Ok(QuizStep::Question(1)));
        assert_eq!(session.selected(), None);
        assert_eq!(session.phase(), QuizPhase::Answering);
    }
}
