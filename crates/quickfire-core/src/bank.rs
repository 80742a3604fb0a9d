//! Question bank - the immutable corpus of question/answer pairs
//!
//! Loaded once at startup from two parallel text files: line N of the
//! questions file pairs with line N of the answers file. An empty or
//! mismatched corpus is a configuration error, surfaced before the
//! server accepts any connection.

use std::fs;
use std::path::Path;

use crate::{QuizError, QuizResult};

/// One question/answer pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionEntry {
    /// Question text as broadcast to participants
    pub text: String,
    /// Accepted answer, compared case-insensitively
    pub answer: String,
}

impl QuestionEntry {
    pub fn new(text: impl Into<String>, answer: impl Into<String>) -> Self {
        QuestionEntry {
            text: text.into(),
            answer: answer.into(),
        }
    }
}

/// Immutable, ordered question bank indexed 0..N-1
#[derive(Clone, Debug)]
pub struct QuestionBank {
    entries: Vec<QuestionEntry>,
}

impl QuestionBank {
    /// Build a bank from pre-paired entries. Fails on an empty corpus.
    pub fn new(entries: Vec<QuestionEntry>) -> QuizResult<Self> {
        if entries.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        Ok(QuestionBank { entries })
    }

    /// Load a bank from parallel questions/answers files.
    pub fn load(questions_path: &Path, answers_path: &Path) -> QuizResult<Self> {
        let questions = read_lines(questions_path)?;
        let answers = read_lines(answers_path)?;

        if questions.len() != answers.len() {
            return Err(QuizError::CorpusMismatch {
                questions: questions.len(),
                answers: answers.len(),
            });
        }

        let entries = questions
            .into_iter()
            .zip(answers)
            .map(|(text, answer)| QuestionEntry { text, answer })
            .collect();

        QuestionBank::new(entries)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry at an index
    pub fn get(&self, index: usize) -> Option<&QuestionEntry> {
        self.entries.get(index)
    }

    /// Iterate over all entries in corpus order
    pub fn iter(&self) -> impl Iterator<Item = &QuestionEntry> {
        self.entries.iter()
    }
}

fn read_lines(path: &Path) -> QuizResult<Vec<String>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| QuizError::Corpus(format!("{}: {}", path.display(), e)))?;

    let mut lines: Vec<String> = contents.lines().map(|l| l.trim_end().to_string()).collect();

    // Trailing blank lines are editor noise, not empty questions
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    Ok(lines)
}
