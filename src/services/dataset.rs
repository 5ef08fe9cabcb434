use rand::Rng;
use regex::Regex;
use thiserror::Error;

/// Message shown to the viewer when custom input is rejected
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please enter numbers separated by commas.";

/// Errors from parsing a custom array
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Not a number: {token:?} (position {position})")]
    InvalidToken { token: String, position: usize },
}

/// Where the working sequence of a run came from
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Parsed from the custom input text
    Custom(Vec<f64>),
    /// Freshly generated because the input was blank
    Random(Vec<f64>),
    /// Freshly generated because the input was rejected
    Fallback { values: Vec<f64>, error: DatasetError },
}

impl Dataset {
    pub fn values(&self) -> &[f64] {
        match self {
            Dataset::Custom(values) | Dataset::Random(values) => values,
            Dataset::Fallback { values, .. } => values,
        }
    }

    pub fn into_values(self) -> Vec<f64> {
        match self {
            Dataset::Custom(values) | Dataset::Random(values) => values,
            Dataset::Fallback { values, .. } => values,
        }
    }
}

/// Produces working sequences, random or parsed from user text
///
/// # Fields
///
/// - `number_pattern`: compiled once at construction; accepts plain decimal numbers
///   such as `5`, `-3.25`, `.5` or `1e3`, and nothing else (no `NaN`, `inf`, hex)
/// - `size`: length of generated sequences
/// - `max_value`: generated values are drawn from `0..max_value`
pub struct DatasetProvider {
    number_pattern: Regex,
    size: usize,
    max_value: u32,
}

impl DatasetProvider {
    pub fn new(size: usize, max_value: u32) -> Self {
        Self {
            number_pattern: Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$")
                .expect("Invalid number regex"),
            size,
            max_value: max_value.max(1),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Generate `size` random integers in `0..max_value`
    pub fn generate(&self) -> Vec<f64> {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate with a caller-supplied RNG
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.size)
            .map(|_| f64::from(rng.gen_range(0..self.max_value)))
            .collect()
    }

    /// Parse comma-separated decimal numbers
    ///
    /// Whitespace around each token is trimmed. Any token that is not a number,
    /// including an empty one, rejects the whole input.
    ///
    /// # Returns
    /// - `Ok(None)` for blank input
    /// - `Ok(Some(values))` for valid input
    pub fn parse_custom(&self, input: &str) -> Result<Option<Vec<f64>>, DatasetError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        input
            .split(',')
            .enumerate()
            .map(|(position, raw)| {
                let token = raw.trim();
                self.parse_token(token).ok_or_else(|| DatasetError::InvalidToken {
                    token: token.to_string(),
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn parse_token(&self, token: &str) -> Option<f64> {
        if !self.number_pattern.is_match(token) {
            return None;
        }
        token.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    /// Resolve the sequence for a run from the current input text
    ///
    /// Blank input and rejected input both fall back to a fresh random sequence.
    pub fn resolve(&self, input: &str) -> Dataset {
        match self.parse_custom(input) {
            Ok(Some(values)) => Dataset::Custom(values),
            Ok(None) => Dataset::Random(self.generate()),
            Err(error) => {
                tracing::warn!("Rejected custom input: {}", error);
                Dataset::Fallback {
                    values: self.generate(),
                    error,
                }
            }
        }
    }
}

impl Default for DatasetProvider {
    fn default() -> Self {
        Self::new(30, 100)
    }
}
