//! Truth / dare / trivia question bank.

use std::fmt;
use std::fs;
use std::path::Path;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Truth,
    Dare,
    Trivia,
}

impl Category {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "truth" => Ok(Category::Truth),
            "dare" => Ok(Category::Dare),
            "trivia" => Ok(Category::Trivia),
            other => Err(DomainError::validation(
                ValidationKind::InvalidCategory,
                format!("unknown question category '{other}'"),
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Truth => "truth",
            Category::Dare => "dare",
            Category::Trivia => "trivia",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    /// Optional sub-type used for filtering (e.g. `personal`, `party`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Multiple-choice options (trivia only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Question {
    fn prompt(kind: &str, text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: Some(kind.to_string()),
            options: Vec::new(),
            answer: None,
        }
    }

    fn trivia(text: &str, options: [&str; 4], answer: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: Some("shell".to_string()),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: Some(answer.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    truth: Vec<Question>,
    #[serde(default)]
    dare: Vec<Question>,
    #[serde(default)]
    trivia: Vec<Question>,
}

impl QuestionBank {
    pub fn builtin() -> Self {
        Self {
            truth: vec![
                Question::prompt("personal", "What is the most embarrassing thing on your phone right now?"),
                Question::prompt("personal", "Which habit of yours would you most like to break?"),
                Question::prompt("party", "Who here has the best outfit tonight?"),
                Question::prompt("party", "Which person in this room would you call at 3am?"),
                Question::prompt("personal", "What is a small lie you told this week?"),
            ],
            dare: vec![
                Question::prompt("party", "Toast with a player of your choice, arms linked."),
                Question::prompt("party", "Do your best impression of someone here and let the others guess."),
                Question::prompt("solo", "Read out your most recent search history entry."),
                Question::prompt("party", "Compliment the player you know the least."),
                Question::prompt("solo", "Speak only in questions until your next turn."),
            ],
            trivia: vec![
                Question::trivia(
                    "Which command prints the current working directory?",
                    ["A) cd", "B) ls", "C) pwd", "D) mkdir"],
                    "C",
                ),
                Question::trivia(
                    "Which command lists all files, including hidden ones?",
                    ["A) ls", "B) ls -a", "C) ls -l", "D) dir"],
                    "B",
                ),
                Question::trivia(
                    "Which command changes the current directory?",
                    ["A) mv", "B) cd", "C) cp", "D) rm"],
                    "B",
                ),
                Question::trivia(
                    "Which command copies a file?",
                    ["A) cp", "B) mv", "C) rm", "D) touch"],
                    "A",
                ),
            ],
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Load a JSON bank, falling back to the built-in one when the file is
    /// missing or malformed.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        let loaded = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| Self::from_json(&raw).map_err(|e| e.to_string()));
        match loaded {
            Ok(bank) => {
                info!(
                    path = %path.display(),
                    truth = bank.truth.len(),
                    dare = bank.dare.len(),
                    trivia = bank.trivia.len(),
                    "question bank loaded"
                );
                bank
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "question bank unreadable; using built-in bank");
                Self::builtin()
            }
        }
    }

    pub fn questions(&self, category: Category) -> &[Question] {
        match category {
            Category::Truth => &self.truth,
            Category::Dare => &self.dare,
            Category::Trivia => &self.trivia,
        }
    }

    /// Random question from `category`, restricted to `kind` when at least
    /// one question matches it.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        category: Category,
        kind: Option<&str>,
        rng: &mut R,
    ) -> Result<&Question, DomainError> {
        let pool = self.questions(category);
        let filtered: Vec<&Question> = match kind {
            Some(kind) => pool
                .iter()
                .filter(|q| q.kind.as_deref() == Some(kind))
                .collect(),
            None => Vec::new(),
        };

        let picked = if filtered.is_empty() {
            pool.choose(rng)
        } else {
            filtered.choose(rng).copied()
        };
        picked.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Question,
                format!("no {category} questions available"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn filter_restricts_to_kind() {
        let bank = QuestionBank::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..20 {
            let q = bank.pick(Category::Dare, Some("solo"), &mut rng).unwrap();
            assert_eq!(q.kind.as_deref(), Some("solo"));
        }
    }

    #[test]
    fn unmatched_filter_falls_back_to_whole_category() {
        let bank = QuestionBank::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let q = bank.pick(Category::Truth, Some("nope"), &mut rng).unwrap();
        assert!(bank.questions(Category::Truth).contains(q));
    }

    #[test]
    fn empty_category_is_not_found() {
        let bank = QuestionBank::from_json(r#"{"truth": [{"question": "x"}]}"#).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            bank.pick(Category::Trivia, None, &mut rng),
            Err(DomainError::NotFound(NotFoundKind::Question, _))
        ));
    }

    #[test]
    fn trivia_serializes_options_and_answer() {
        let bank = QuestionBank::builtin();
        let json = serde_json::to_value(&bank.questions(Category::Trivia)[0]).unwrap();
        assert_eq!(json["answer"], "C");
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
        assert!(json.get("question").is_some());
    }

    #[test]
    fn unknown_category_is_validation_error() {
        assert!(matches!(
            Category::parse("riddles"),
            Err(DomainError::Validation(ValidationKind::InvalidCategory, _))
        ));
        assert_eq!(Category::parse(" Trivia ").unwrap(), Category::Trivia);
    }

    #[test]
    fn unreadable_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(QuestionBank::load_or_builtin(Some(&path)), QuestionBank::builtin());
    }
}
