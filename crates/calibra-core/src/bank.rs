//! TOML question bank parser and the file-backed question source.
//!
//! Loads question banks from TOML files and directories, validating the
//! question invariants at the boundary so the rest of the core can trust
//! every `Question` it sees.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::index;
use serde::Deserialize;

use crate::error::BankError;
use crate::model::Question;
use crate::traits::QuestionSource;

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    bound_low: f64,
    bound_high: f64,
}

/// A loaded set of questions, the corpus a round draws from.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    /// Bank identifier from the file header.
    pub id: String,
    /// Human-readable bank name.
    pub name: String,
    /// Optional description.
    pub description: String,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from already-validated questions (useful for tests).
    ///
    /// Fails with the same invariant errors as file parsing: every bound
    /// must be finite with `bound_low <= bound_high`, and ids must be
    /// unique within the bank.
    pub fn new(id: &str, questions: Vec<Question>) -> Result<Self, BankError> {
        let mut seen = HashSet::new();
        for q in &questions {
            check_bounds(&q.id, q.bound_low, q.bound_high)?;
            if !seen.insert(q.id.clone()) {
                return Err(BankError::DuplicateId {
                    question_id: q.id.clone(),
                });
            }
        }
        Ok(Self {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            questions,
        })
    }

    /// Number of questions in the corpus.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if the bank holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// All questions, in file order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl QuestionSource for QuestionBank {
    fn select_random(&self, n: usize) -> Vec<Question> {
        let amount = n.min(self.questions.len());
        let mut rng = rand::rng();

        // Distinct indices, so distinct questions within one draw.
        index::sample(&mut rng, self.questions.len(), amount)
            .into_iter()
            .map(|i| self.questions[i].clone())
            .collect()
    }
}

fn check_bounds(question_id: &str, low: f64, high: f64) -> Result<(), BankError> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(BankError::InvalidBounds {
            question_id: question_id.to_string(),
            bound_low: low,
            bound_high: high,
        });
    }
    Ok(())
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content).map_err(|e| BankError::Parse {
        path: source_path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut seen = HashSet::new();
    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            check_bounds(&q.id, q.bound_low, q.bound_high)?;
            if !seen.insert(q.id.clone()) {
                return Err(BankError::DuplicateId { question_id: q.id });
            }
            Ok(Question {
                id: q.id,
                text: q.text,
                bound_low: q.bound_low,
                bound_high: q.bound_high,
            })
        })
        .collect::<Result<Vec<_>, BankError>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` bank files from a directory.
///
/// Files that fail to parse are skipped with a warning rather than
/// aborting the whole load.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}
