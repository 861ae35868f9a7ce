use std::time::Duration;

use crate::{Error, Result};

/// Sampling and budget parameters for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    /// Sampling temperature in `[0, 2]`.
    pub temperature: f32,
    /// Upper bound on generated tokens, must be positive.
    pub max_tokens: u32,
    /// Per-call timeout; the provider default applies when unset.
    pub timeout: Option<Duration>,
}

impl CompletionOptions {
    /// Maximum accepted sampling temperature.
    pub const MAX_TEMPERATURE: f32 = 2.0;

    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            timeout: None,
        }
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks the parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput)
    /// for an out-of-range temperature or a zero token budget.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=Self::MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(Error::invalid_input().with_message(format!(
                "temperature {} is outside [0, {}]",
                self.temperature,
                Self::MAX_TEMPERATURE
            )));
        }

        if self.max_tokens == 0 {
            return Err(Error::invalid_input().with_message("max_tokens must be positive"));
        }

        Ok(())
    }
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self::new(0.7, 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(CompletionOptions::default().validate().is_ok());
        assert!(CompletionOptions::new(0.0, 1).validate().is_ok());
        assert!(CompletionOptions::new(2.0, 1).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(CompletionOptions::new(2.5, 100).validate().is_err());
        assert!(CompletionOptions::new(-0.1, 100).validate().is_err());
        assert!(CompletionOptions::new(f32::NAN, 100).validate().is_err());
        assert!(CompletionOptions::new(0.7, 0).validate().is_err());
    }
}
