//! Typed parsers for the comma-delimited species encodings used by the
//! legacy export. The positional code/percentage format is fragile, so it
//! is converted to typed pairs here and the rule logic never touches the
//! raw text.

use thiserror::Error;

/// Split a comma-delimited species string into trimmed tokens.
/// Tokens keep their stored case; empty tokens are preserved so the
/// caller can report them.
pub fn parse_species_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesPercentageError {
    #[error("species '{0}' has no percentage")]
    MissingPercentage(String),
    #[error("percentage '{0}' is not a whole number")]
    InvalidPercentage(String),
    #[error("percentage '{0}' must be between 0 and 100")]
    OutOfRangePercentage(String),
}

/// Parse an alternating "code,percentage,code,percentage" string into
/// typed pairs. Even positions are species codes, odd positions must
/// parse as whole numbers between 0 and 100. The range bound keeps the
/// downstream sum arithmetic safe against arbitrary caller input.
pub fn parse_species_percentages(
    raw: &str,
) -> Result<Vec<(String, i64)>, SpeciesPercentageError> {
    let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
    let mut pairs = Vec::with_capacity(tokens.len() / 2);

    for chunk in tokens.chunks(2) {
        let code = chunk[0];
        match chunk.get(1) {
            Some(percentage) => {
                let value = percentage.parse::<i64>().map_err(|_| {
                    SpeciesPercentageError::InvalidPercentage(percentage.to_string())
                })?;
                if !(0..=100).contains(&value) {
                    return Err(SpeciesPercentageError::OutOfRangePercentage(
                        percentage.to_string(),
                    ));
                }
                pairs.push((code.to_string(), value));
            }
            None => {
                return Err(SpeciesPercentageError::MissingPercentage(code.to_string()));
            }
        }
    }

    Ok(pairs)
}
