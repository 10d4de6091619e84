//! Operator interaction
//!
//! Destructive steps ask before acting. The prompt is injected so batch
//! runs and tests can answer without a terminal.

use anyhow::Result;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

pub trait Prompt: Send + Sync {
    /// Show `message` and return the raw answer, `default` when left empty
    fn read_input(&self, message: &str, default: &str) -> Result<String>;
}

/// Yes-default confirmation: empty, "y" or "Y" accept
pub fn confirm(prompt: &dyn Prompt, message: &str) -> Result<bool> {
    let answer = prompt.read_input(message, "Y")?;
    Ok(matches!(answer.trim(), "" | "y" | "Y"))
}

/// Blocking prompt on the controlling terminal
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn read_input(&self, message: &str, default: &str) -> Result<String> {
        print!("[?] {}", message);
        io::stdout().flush()?;

        answer_from(&mut io::stdin().lock(), default)
    }
}

/// One line from `reader`; end of input is an error, never an implicit yes
fn answer_from(reader: &mut impl BufRead, default: &str) -> Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        anyhow::bail!("no answer: standard input is closed");
    }

    let input = input.trim();
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input.to_string())
    }
}

/// Never asks, always takes the default answer
pub struct BatchPrompt;

impl Prompt for BatchPrompt {
    fn read_input(&self, message: &str, default: &str) -> Result<String> {
        tracing::info!("{} {}", message.trim_end(), default);
        Ok(default.to_string())
    }
}

/// Replays pre-recorded answers, then falls back to defaults
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Messages shown so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Prompt for ScriptedPrompt {
    fn read_input(&self, message: &str, default: &str) -> Result<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(message.to_string());
        }

        let answer = self
            .answers
            .lock()
            .map_err(|_| anyhow::anyhow!("prompt answers poisoned"))?
            .pop_front();

        match answer {
            Some(a) if !a.trim().is_empty() => Ok(a.trim().to_string()),
            _ => Ok(default.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirm_yes_default() {
        let prompt = ScriptedPrompt::new(["", "y", "Y", "n", "yes"]);
        assert!(confirm(&prompt, "drop? ").unwrap());
        assert!(confirm(&prompt, "drop? ").unwrap());
        assert!(confirm(&prompt, "drop? ").unwrap());
        assert!(!confirm(&prompt, "drop? ").unwrap());
        assert!(!confirm(&prompt, "drop? ").unwrap());
        // exhausted script falls back to the default
        assert!(confirm(&prompt, "drop? ").unwrap());
        assert_eq!(prompt.asked().len(), 6);
    }

    #[test]
    fn test_closed_input_is_not_an_answer() {
        let mut closed = Cursor::new("");
        assert!(answer_from(&mut closed, "Y").is_err());

        let mut input = Cursor::new("\n  n \n");
        assert_eq!(answer_from(&mut input, "Y").unwrap(), "Y");
        assert_eq!(answer_from(&mut input, "Y").unwrap(), "n");
        assert!(answer_from(&mut input, "Y").is_err());
    }

    #[test]
    fn test_batch_prompt_takes_default() {
        assert_eq!(BatchPrompt.read_input("choice? ", "1").unwrap(), "1");
    }
}
