//! LIKE vs exact matching of operator-supplied identifiers

use super::error::{TakeoverError, TakeoverResult};
use super::Takeover;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchMode {
    Like,
    Exact,
}

impl MatchMode {
    /// Menu number of this mode
    pub fn choice(&self) -> &'static str {
        match self {
            MatchMode::Like => "1",
            MatchMode::Exact => "2",
        }
    }

    /// Condition template, `%s` stands for the value and `%%` for a literal percent
    pub fn template(&self) -> &'static str {
        match self {
            MatchMode::Like => " LIKE '%%%s%%'",
            MatchMode::Exact => "='%s'",
        }
    }

    /// Template rendered for `value`
    pub fn condition(&self, value: &str) -> String {
        let escaped = value.replace('\'', "''");
        self.template()
            .replace("%s", "\u{0}")
            .replace("%%", "%")
            .replace('\u{0}', &escaped)
    }

    pub fn from_choice(choice: &str) -> TakeoverResult<Self> {
        match choice.trim() {
            "" | "1" => Ok(MatchMode::Like),
            "2" => Ok(MatchMode::Exact),
            other => Err(TakeoverError::InvalidInput(format!(
                "'{}' is not a valid matching choice",
                other
            ))),
        }
    }
}

impl Takeover<'_> {
    /// Ask whether `what` names are matched with LIKE or exactly
    pub fn like_or_exact(&self, what: &str) -> TakeoverResult<(MatchMode, &'static str)> {
        let message = format!(
            "do you want to consider provided {what}(s):\n[1] as LIKE {what} names (default)\n[2] as exact {what} names\n> "
        );

        let answer = self.prompt.read_input(&message, "1")?;
        let mode = MatchMode::from_choice(&answer)?;
        Ok((mode, mode.template()))
    }
}
