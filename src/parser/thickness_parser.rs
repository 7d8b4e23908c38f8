// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use nom::{
    character::complete::multispace0, number::complete::double, sequence::delimited, IResult,
    Parser,
};

/// Separator between thickness values.
pub const THICKNESS_DELIMITER: char = ',';

pub struct ThicknessParser {
    delimiter: char,
}

impl ThicknessParser {
    pub fn new() -> Self {
        Self {
            delimiter: THICKNESS_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Parse a delimited list of thickness values.
    ///
    /// Whitespace around each entry is ignored and entries that are empty
    /// after trimming are skipped, so `"1, 2,,3,"` yields three values. Any
    /// other entry must be a finite real number or the whole input is
    /// rejected.
    pub fn parse(&self, input: &str) -> Result<Vec<f64>, ParseError> {
        let mut values = Vec::new();

        for (position, raw) in input.split(self.delimiter).enumerate() {
            let token = raw.trim();
            if token.is_empty() {
                continue;
            }

            let value = parse_entry(token).ok_or_else(|| ParseError::InvalidNumber {
                token: token.to_string(),
                position: position + 1,
            })?;

            if !value.is_finite() {
                return Err(ParseError::NonFinite {
                    token: token.to_string(),
                    position: position + 1,
                });
            }

            values.push(value);
        }

        Ok(values)
    }
}

impl Default for ThicknessParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A single entry must be consumed completely by the number parser.
fn parse_entry(token: &str) -> Option<f64> {
    let result: IResult<&str, f64> = delimited(multispace0, double, multispace0).parse(token);
    match result {
        Ok((rest, value)) if rest.is_empty() => Some(value),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("'{token}' (entry {position}) is not a number. Please enter valid numbers separated by commas.")]
    InvalidNumber { token: String, position: usize },

    #[error("'{token}' (entry {position}) is not a finite number. Please enter valid numbers separated by commas.")]
    NonFinite { token: String, position: usize },
}

impl ParseError {
    pub fn token(&self) -> &str {
        match self {
            ParseError::InvalidNumber { token, .. } | ParseError::NonFinite { token, .. } => token,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::InvalidNumber { position, .. } | ParseError::NonFinite { position, .. } => {
                *position
            }
        }
    }
}

pub fn parse_thicknesses(input: &str) -> Result<Vec<f64>, ParseError> {
    ThicknessParser::new().parse(input)
}
