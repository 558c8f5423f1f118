// crates/exitsim-config/src/clause.rs
// ============================================================================
// Module: Exit Clause Accumulator
// Description: Assembles `<percentage> <clause>` pairs into weighted outcomes.
// Purpose: Turn flat `--exit` tokens into a typed behaviour list.
// Dependencies: exitsim-core, thiserror
// ============================================================================

//! ## Overview
//! `--exit` takes two values. clap hands them over as one flat token list, so
//! the accumulator holds whichever half it has seen and yields a
//! [`WeightedOutcome`] only once both halves are present.

// ============================================================================
// SECTION: Imports
// ============================================================================

use exitsim_core::Outcome;
use exitsim_core::WeightedOutcome;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Malformed exit clause tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClauseError {
    /// The percentage is not a number.
    #[error("'{0}' is not a percentage")]
    InvalidPercentage(String),
    /// The percentage exceeds 100.
    #[error("'{0}' is above 100%")]
    AboveHundred(String),
    /// The percentage is negative.
    #[error("'{0}' is below 0%")]
    BelowZero(String),
    /// The clause is neither `hang` nor `code:<int>`.
    #[error("'{0}' is not an exit clause (expected hang or code:<int>)")]
    InvalidClause(String),
    /// A percentage was given without its clause.
    #[error("exit percentage '{0}' has no clause")]
    Incomplete(String),
}

impl ClauseError {
    /// Returns the offending token.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::InvalidPercentage(token)
            | Self::AboveHundred(token)
            | Self::BelowZero(token)
            | Self::InvalidClause(token)
            | Self::Incomplete(token) => token,
        }
    }
}

// ============================================================================
// SECTION: Accumulator
// ============================================================================

/// Two-field accumulator for one exit clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExitClauseAccumulator {
    /// Raw percentage token, kept for error reporting.
    raw_percentage: Option<String>,
    /// Parsed probability in `[0, 1]`.
    probability: Option<f64>,
}

impl ExitClauseAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next token.
    ///
    /// Returns the completed entry when `token` was the clause half.
    ///
    /// # Errors
    ///
    /// Returns [`ClauseError`] when the token is malformed for its position.
    pub fn push(&mut self, token: &str) -> Result<Option<WeightedOutcome>, ClauseError> {
        match self.probability.take() {
            None => {
                self.probability = Some(parse_percentage(token)?);
                self.raw_percentage = Some(token.to_string());
                Ok(None)
            }
            Some(probability) => {
                self.raw_percentage = None;
                let outcome = parse_clause(token)?;
                Ok(Some(WeightedOutcome::new(probability, outcome)))
            }
        }
    }

    /// Finishes accumulation.
    ///
    /// # Errors
    ///
    /// Returns [`ClauseError::Incomplete`] when a percentage is left dangling.
    pub fn finish(self) -> Result<(), ClauseError> {
        match (self.probability, self.raw_percentage) {
            (Some(_), Some(raw)) => Err(ClauseError::Incomplete(raw)),
            _ => Ok(()),
        }
    }

    /// Assembles a whole token list into weighted outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`ClauseError`] for the first malformed or dangling token.
    pub fn collect<'a>(
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<WeightedOutcome>, ClauseError> {
        let mut accumulator = Self::new();
        let mut entries = Vec::new();
        for token in tokens {
            if let Some(entry) = accumulator.push(token)? {
                entries.push(entry);
            }
        }
        accumulator.finish()?;
        Ok(entries)
    }
}

// ============================================================================
// SECTION: Token Parsing
// ============================================================================

/// Parses `NN%` (or bare `NN`) into a probability in `[0, 1]`.
fn parse_percentage(token: &str) -> Result<f64, ClauseError> {
    let digits = token.trim().strip_suffix('%').unwrap_or(token).trim();
    let value: f64 =
        digits.parse().map_err(|_| ClauseError::InvalidPercentage(token.to_string()))?;
    if !value.is_finite() {
        return Err(ClauseError::InvalidPercentage(token.to_string()));
    }
    if value > 100.0 {
        return Err(ClauseError::AboveHundred(token.to_string()));
    }
    if value < 0.0 {
        return Err(ClauseError::BelowZero(token.to_string()));
    }
    Ok(value / 100.0)
}

/// Parses `hang` or `code:<digits>`.
fn parse_clause(token: &str) -> Result<Outcome, ClauseError> {
    let trimmed = token.trim();
    if trimmed == "hang" {
        return Ok(Outcome::Hang);
    }
    let invalid = || ClauseError::InvalidClause(token.to_string());
    let digits = trimmed.strip_prefix("code:").ok_or_else(invalid)?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse().map(Outcome::ExitCode).map_err(|_| invalid())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
