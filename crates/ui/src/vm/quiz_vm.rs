use tutor_core::model::{AnswerFeedback, OptionMark, QuizPhase, QuizSession};

/// Reveal stage of a submitted answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealedAnswer {
    pub feedback: AnswerFeedback,
    pub show_explanation: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub index: usize,
    pub text: String,
    pub selected: bool,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizVm {
    Question {
        label: String,
        prompt: String,
        options: Vec<QuizOptionVm>,
        can_submit: bool,
        locked: bool,
        verdict: Option<&'static str>,
        explanation: Option<String>,
    },
    Finished {
        score: u8,
        summary: String,
    },
}

fn option_class(mark: Option<OptionMark>, selected: bool) -> &'static str {
    match mark {
        Some(OptionMark::Correct) => "quiz-option correct",
        Some(OptionMark::Incorrect) => "quiz-option incorrect",
        Some(OptionMark::Neutral) | None if selected => "quiz-option selected",
        Some(OptionMark::Neutral) | None => "quiz-option",
    }
}

#[must_use]
pub fn quiz_vm(session: &QuizSession, revealed: Option<&RevealedAnswer>) -> Option<QuizVm> {
    if let QuizPhase::Finished(score) = session.phase() {
        return Some(QuizVm::Finished {
            score: score.value(),
            summary: format!(
                "You got {} out of {} questions correct!",
                session.correct_count(),
                session.total()
            ),
        });
    }

    let question = session.current_question()?;
    let revealed = revealed.filter(|r| r.feedback.question_index == session.current_index());
    let selected = revealed.map(|r| r.feedback.selected).or(session.selected());

    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let mark = revealed.and_then(|r| r.feedback.marks.get(index).copied());
            let is_selected = selected == Some(index);
            QuizOptionVm {
                index,
                text: text.clone(),
                selected: is_selected,
                class: option_class(mark, is_selected),
            }
        })
        .collect();

    let locked = matches!(session.phase(), QuizPhase::Revealed);
    let shown = revealed.filter(|r| r.show_explanation);

    Some(QuizVm::Question {
        label: format!(
            "Question {} of {}",
            session.current_index() + 1,
            session.total()
        ),
        prompt: question.prompt().to_string(),
        options,
        can_submit: !locked && session.selected().is_some(),
        locked,
        verdict: shown.map(|r| {
            if r.feedback.is_correct {
                "Correct!"
            } else {
                "Incorrect."
            }
        }),
        explanation: shown.map(|r| r.feedback.explanation.clone()),
    })
}
