use std::fmt;
use std::str::FromStr;

use crate::error::FillError;
use crate::navigation::Direction;

/// Delimiters accepted between tokens of a serialized path, in priority order.
pub const PATH_DELIMITERS: [&str; 2] = [" > ", "/"];

/// One element of a label path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    /// Literal text found with a forward search
    Label(String),
    /// Structural move written as `<left>`, `<right>`, `<up>` or `<down>`
    Move(Direction),
}

impl PathToken {
    /// Parse a single token. Anything wrapped in angle brackets must name a direction.
    pub fn parse(raw: &str, index: usize) -> Result<Self, FillError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FillError::EmptyToken { index });
        }

        if let Some(inner) = raw.strip_prefix('<').and_then(|r| r.strip_suffix('>')) {
            return inner.parse::<Direction>().map(PathToken::Move);
        }

        Ok(PathToken::Label(raw.to_string()))
    }

    pub fn is_move(&self) -> bool {
        matches!(self, PathToken::Move(_))
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToken::Label(label) => f.write_str(label),
            PathToken::Move(direction) => write!(f, "<{direction}>"),
        }
    }
}

/// Non-empty, ordered sequence of labels and moves walked from the document start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPath {
    tokens: Vec<PathToken>,
}

impl LabelPath {
    pub fn new(tokens: Vec<PathToken>) -> Result<Self, FillError> {
        if tokens.is_empty() {
            return Err(FillError::EmptyPath);
        }
        Ok(Self { tokens })
    }

    /// Build from already-split token strings such as `["대표자", "<down>"]`.
    pub fn from_tokens<I, S>(raw: I) -> Result<Self, FillError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = raw
            .into_iter()
            .enumerate()
            .map(|(index, token)| PathToken::parse(token.as_ref(), index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tokens)
    }

    /// A path consisting of one literal label.
    pub fn label(label: &str) -> Result<Self, FillError> {
        Self::new(vec![PathToken::parse(label, 0)?])
    }

    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when the final token already moved the cursor to the target cell.
    pub fn ends_with_move(&self) -> bool {
        self.tokens.last().is_some_and(PathToken::is_move)
    }

    /// Display form of the first `depth` tokens.
    pub fn prefix_display(&self, depth: usize) -> String {
        join_tokens(&self.tokens[..depth.min(self.tokens.len())])
    }
}

impl FromStr for LabelPath {
    type Err = FillError;

    /// Split on `" > "` when present, otherwise on `"/"`, otherwise one label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(FillError::EmptyPath);
        }

        match PATH_DELIMITERS.iter().find(|delimiter| s.contains(**delimiter)) {
            Some(delimiter) => Self::from_tokens(s.split(delimiter)),
            None => Self::from_tokens([s]),
        }
    }
}

impl fmt::Display for LabelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_tokens(&self.tokens))
    }
}

fn join_tokens(tokens: &[PathToken]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" > ")
}
