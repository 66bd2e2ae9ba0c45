use std::fmt;

// ============================================================================
// Pointer Paths
// ============================================================================
//
// A pointer is `/`-separated with `~1` and `~0` escapes. Parsing only splits
// and unescapes; whether a token names a member or a sequence position is
// decided at resolution time, against the node the token is applied to.
//
// ============================================================================

/// A decoded path token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step(String);

/// How a step addresses a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    At(usize),
    /// One past the last element (`-`)
    Append,
}

impl Step {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the step as a sequence position.
    ///
    /// Only plain digit runs and `-` qualify; signs, whitespace and other
    /// tokens (identifiers, ids) do not.
    pub fn position(&self) -> Option<Position> {
        if self.0 == "-" {
            return Some(Position::Append);
        }
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok().map(Position::At)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed pointer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pointer {
    raw: String,
    steps: Vec<Step>,
}

/// Syntax errors found while splitting a pointer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointerSyntaxError {
    #[error("pointer must be empty or start with '/': {0:?}")]
    MissingLeadingSlash(String),

    #[error("invalid escape sequence in pointer segment {0:?}")]
    InvalidEscape(String),
}

impl Pointer {
    pub fn parse(raw: &str) -> Result<Self, PointerSyntaxError> {
        if raw.is_empty() {
            return Ok(Self::default());
        }

        let Some(rest) = raw.strip_prefix('/') else {
            return Err(PointerSyntaxError::MissingLeadingSlash(raw.to_string()));
        };

        let steps = rest
            .split('/')
            .map(unescape)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            steps,
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Split into parent steps and the final step
    pub fn split_last(&self) -> Option<(&Step, &[Step])> {
        self.steps.split_last()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn unescape(segment: &str) -> Result<Step, PointerSyntaxError> {
    let mut decoded = String::with_capacity(segment.len());
    let mut chars = segment.chars();

    while let Some(c) = chars.next() {
        if c != '~' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => decoded.push('~'),
            Some('1') => decoded.push('/'),
            _ => return Err(PointerSyntaxError::InvalidEscape(segment.to_string())),
        }
    }

    Ok(Step(decoded))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tokens(raw: &str) -> Vec<String> {
        Pointer::parse(raw)
            .unwrap()
            .steps()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_parse_member_and_index_tokens() {
        assert_eq!(tokens("/rooms/0/name"), vec!["rooms", "0", "name"]);
        assert_eq!(tokens("/address/street"), vec!["address", "street"]);
    }

    #[test]
    fn test_empty_pointer_is_root() {
        let pointer = Pointer::parse("").unwrap();
        assert!(pointer.is_root());
        assert!(pointer.split_last().is_none());
    }

    #[test]
    fn test_escapes_are_decoded() {
        assert_eq!(tokens("/a~1b/c~0d"), vec!["a/b", "c~d"]);
        // `~01` decodes to `~1`, not `/`
        assert_eq!(tokens("/~01"), vec!["~1"]);
    }

    #[test]
    fn test_trailing_slash_yields_empty_token() {
        assert_eq!(tokens("/rooms/"), vec!["rooms", ""]);
    }

    #[rstest]
    #[case("address/street")]
    #[case("~1rooms")]
    fn test_missing_leading_slash_rejected(#[case] raw: &str) {
        assert!(matches!(
            Pointer::parse(raw),
            Err(PointerSyntaxError::MissingLeadingSlash(_))
        ));
    }

    #[rstest]
    #[case("/a~2b")]
    #[case("/trailing~")]
    fn test_invalid_escape_rejected(#[case] raw: &str) {
        assert!(matches!(
            Pointer::parse(raw),
            Err(PointerSyntaxError::InvalidEscape(_))
        ));
    }

    #[rstest]
    #[case("0", Some(Position::At(0)))]
    #[case("12", Some(Position::At(12)))]
    #[case("-", Some(Position::Append))]
    #[case("+1", None)]
    #[case("-1", None)]
    #[case("", None)]
    #[case("name", None)]
    #[case("b6a448f4-4b77-4591-9530-d145b770a2e6", None)]
    fn test_step_position(#[case] token: &str, #[case] expected: Option<Position>) {
        assert_eq!(Step::new(token).position(), expected);
    }
}
