//! Typing state machine - types out and erases a list of texts in a loop
//!
//! Pure and timer-agnostic: the owner calls [`TypingMachine::advance`] once
//! per timer fire and sleeps [`TypingMachine::next_delay`] between fires.
//! The tokio-driven wrapper lives in [`super::driver`].

use std::time::Duration;

use crate::error::CoreError;

/// One discrete state of the typing/erasing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Appending one character per tick
    Typing,
    /// Full text shown, waiting before erasing
    HoldingFull,
    /// Removing one character per tick
    Erasing,
    /// Nothing shown, waiting before typing the next text
    HoldingEmpty,
}

/// Timing parameters, fixed for the machine's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingConfig {
    /// Delay between appended characters
    pub typing_interval: Duration,
    /// Delay between removed characters
    pub erasing_interval: Duration,
    /// Pause with the full text shown before erasing starts
    pub hold_after_full: Duration,
    /// Pause with nothing shown before the next text starts
    pub hold_after_empty: Duration,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            typing_interval: Duration::from_millis(150),
            erasing_interval: Duration::from_millis(75),
            hold_after_full: Duration::from_millis(2000),
            hold_after_empty: Duration::from_millis(500),
        }
    }
}

impl TypingConfig {
    /// Reject zero durations - a zero interval would spin the driver loop.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("typing_interval", self.typing_interval),
            ("erasing_interval", self.erasing_interval),
            ("hold_after_full", self.hold_after_full),
            ("hold_after_empty", self.hold_after_empty),
        ];
        for (name, value) in fields {
            if value.is_zero() {
                return Err(CoreError::invalid_argument(format!(
                    "{name} must be positive"
                )));
            }
        }
        Ok(())
    }
}

/// Cycles through a fixed list of texts, one character per tick
#[derive(Debug, Clone)]
pub struct TypingMachine {
    texts: Vec<String>,
    active_chars: Vec<char>,
    active_index: usize,
    displayed: String,
    chars_shown: usize,
    phase: Phase,
    config: TypingConfig,
}

impl TypingMachine {
    pub fn new(texts: Vec<String>, config: TypingConfig) -> Result<Self, CoreError> {
        if texts.is_empty() {
            return Err(CoreError::invalid_argument("texts must not be empty"));
        }
        config.validate()?;

        let active_chars = texts[0].chars().collect();
        Ok(Self {
            texts,
            active_chars,
            active_index: 0,
            displayed: String::new(),
            chars_shown: 0,
            phase: Phase::Typing,
            config,
        })
    }

    /// The text currently shown (a character prefix of the active text)
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index into `texts` of the text currently being typed or erased
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Delay until the next timer fire for the current phase
    pub fn next_delay(&self) -> Duration {
        match self.phase {
            Phase::Typing => self.config.typing_interval,
            Phase::HoldingFull => self.config.hold_after_full,
            Phase::Erasing => self.config.erasing_interval,
            Phase::HoldingEmpty => self.config.hold_after_empty,
        }
    }

    /// Process one timer fire.
    ///
    /// Returns the new displayed text iff it changed; hold-phase fires only
    /// move the machine to the next phase.
    pub fn advance(&mut self) -> Option<&str> {
        match self.phase {
            Phase::Typing => {
                if let Some(&next) = self.active_chars.get(self.chars_shown) {
                    self.displayed.push(next);
                    self.chars_shown += 1;
                    if self.chars_shown == self.active_chars.len() {
                        self.phase = Phase::HoldingFull;
                    }
                    Some(&self.displayed)
                } else {
                    // Empty active text: nothing to type, hold immediately
                    self.phase = Phase::HoldingFull;
                    None
                }
            }
            Phase::HoldingFull => {
                self.phase = Phase::Erasing;
                None
            }
            Phase::Erasing => {
                if self.chars_shown > 0 {
                    self.displayed.pop();
                    self.chars_shown -= 1;
                    if self.chars_shown == 0 {
                        self.wrap_to_next_text();
                    }
                    Some(&self.displayed)
                } else {
                    // Empty active text: nothing to erase, move on
                    self.wrap_to_next_text();
                    None
                }
            }
            Phase::HoldingEmpty => {
                self.phase = Phase::Typing;
                None
            }
        }
    }

    fn wrap_to_next_text(&mut self) {
        self.active_index = (self.active_index + 1) % self.texts.len();
        self.active_chars = self.texts[self.active_index].chars().collect();
        self.phase = Phase::HoldingEmpty;
    }
}
