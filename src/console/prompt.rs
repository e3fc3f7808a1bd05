//! Line-oriented input over any `BufRead`/`Write` pair.

use crate::console::render;
use crate::core::error::PromptError;
use crate::models::comment::Category;
use crate::stores::SortDirection;
use std::io::{BufRead, Write};

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print `label`, then read one line with surrounding whitespace removed
    pub fn read_line(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    fn read_required(&mut self, label: &str, field: &'static str) -> Result<String, PromptError> {
        let value = self.read_line(label)?;
        if value.is_empty() {
            return Err(PromptError::EmptyField(field));
        }
        Ok(value)
    }

    /// Blank input means "keep the current value"
    fn read_optional(&mut self, label: &str) -> Result<Option<String>, PromptError> {
        let value = self.read_line(label)?;
        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    pub fn read_number(&mut self, label: &str) -> Result<u32, PromptError> {
        let value = self.read_line(label)?;
        value
            .parse::<u32>()
            .map_err(|_| PromptError::InvalidNumber(value))
    }

    /// Show a numbered menu and return the 1-based choice
    pub fn choose(&mut self, title: &str, items: &[&str]) -> Result<usize, PromptError> {
        render::print_menu(&mut self.output, items)?;

        let max = items.len();
        let value = self.read_line(&format!("{title} (1-{max}): "))?;
        let choice = value
            .parse::<usize>()
            .map_err(|_| PromptError::InvalidNumber(value))?;

        if choice < 1 || choice > max {
            return Err(PromptError::InvalidChoice { max });
        }
        Ok(choice)
    }

    /// Yes/no question; anything other than 1 or 2 asks again
    pub fn confirm(&mut self, title: &str) -> Result<bool, PromptError> {
        loop {
            match self.read_line(&format!("{title} (1. Yes, 2. No): "))?.as_str() {
                "1" => return Ok(true),
                "2" => return Ok(false),
                _ => self.say("Invalid choice, pick 1 or 2.")?,
            }
        }
    }

    pub fn login_form(&mut self) -> Result<(String, String), PromptError> {
        let username = self.read_line("Username: ")?;
        let password = self.read_line("Password: ")?;

        if username.is_empty() || password.is_empty() {
            return Err(PromptError::EmptyField("username and password"));
        }
        Ok((username, password))
    }

    pub fn register_form(&mut self) -> Result<(String, String), PromptError> {
        let username = self.read_line("Username: ")?;
        let password = self.read_line("Password: ")?;
        let confirmation = self.read_line("Confirm password: ")?;

        if username.is_empty() || password.is_empty() || confirmation.is_empty() {
            return Err(PromptError::EmptyField("username, password and confirmation"));
        }
        if password != confirmation {
            return Err(PromptError::PasswordMismatch);
        }
        Ok((username, password))
    }

    pub fn category(&mut self, label: &str) -> Result<Category, PromptError> {
        let value = self.read_line(label)?;
        value.parse::<Category>().map_err(PromptError::InvalidCategory)
    }

    pub fn comment_form(&mut self) -> Result<(String, Category), PromptError> {
        let text = self.read_required("Comment: ", "comment")?;
        let category = self.category("Category (1. positive, 2. neutral, 3. negative): ")?;
        Ok((text, category))
    }

    /// New text and category, each `None` when left blank.
    /// With `strict_category` a non-blank category must name a known one.
    pub fn comment_edit_form(
        &mut self,
        strict_category: bool,
    ) -> Result<(Option<String>, Option<String>), PromptError> {
        let text = self.read_optional("New comment (blank keeps current): ")?;
        let category = self.read_optional("New category (blank keeps current): ")?;

        let category = match category {
            Some(raw) if strict_category => Some(
                raw.parse::<Category>()
                    .map_err(PromptError::InvalidCategory)?
                    .as_str()
                    .to_string(),
            ),
            other => other,
        };
        Ok((text, category))
    }

    pub fn user_edit_form(&mut self) -> Result<(Option<String>, Option<String>), PromptError> {
        let username = self.read_optional("New username (blank keeps current): ")?;
        let password = self.read_optional("New password (blank keeps current): ")?;
        Ok((username, password))
    }

    pub fn sort_direction(&mut self) -> Result<SortDirection, PromptError> {
        match self.choose("Sort order", &["Ascending", "Descending"])? {
            1 => Ok(SortDirection::Ascending),
            _ => Ok(SortDirection::Descending),
        }
    }
}
