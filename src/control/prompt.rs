/// Input collection used by the view controller.
///
/// A prompter asks the user one question at a time and blocks until it is
/// answered or cancelled. `None` means the user cancelled.
pub trait Prompter {
    /// Ask for a line of text, optionally pre-filled with `initial`.
    fn ask_text(&mut self, title: &str, prompt: &str, initial: Option<&str>) -> Option<String>;

    /// Tell the user the last answer was rejected. The next `ask_*` call
    /// re-asks the same question.
    fn reject(&mut self, _message: &str) {}

    /// Ask for a number. Unparsable answers are rejected and asked again;
    /// a blank answer or a cancel gives `None`.
    fn ask_float(&mut self, title: &str, prompt: &str) -> Option<f64> {
        loop {
            let text = self.ask_text(title, prompt, None)?;
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => return Some(value),
                _ => self.reject("Not a valid number."),
            }
        }
    }
}

/// A prompter that replays canned answers, in order. Used by tests and by
/// the script runner, where every answer is known up front.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<Option<String>>,
    /// Rejection messages received, in order
    pub rejections: Vec<String>,
    /// Prompts that were shown, in order
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            rejections: Vec::new(),
            asked: Vec::new(),
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_text(&mut self, _title: &str, prompt: &str, _initial: Option<&str>) -> Option<String> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().flatten()
    }

    fn reject(&mut self, message: &str) {
        self.rejections.push(message.to_string());
    }
}
