use serde::{Deserialize, Serialize};

/// Max number of tokens a single message may produce.
pub const TOKEN_CAPACITY: usize = 128;
/// The root value always lands in the first slot.
pub const ROOT_TOKEN_INDEX: usize = 0;
/// Deepest container nesting the tokenizer and the navigator accept.
pub const MAX_NESTING_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
  Undefined,
  Object,
  Array,
  String,
  Primitive,
}

/// A typed byte range inside the source text. `end` is exclusive.
///
/// String tokens cover the contents between the quotes; containers cover the
/// brackets themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub start: usize,
  pub end: usize,
}

impl Token {
  pub const EMPTY: Token = Token {
    kind: TokenKind::Undefined,
    start: 0,
    end: 0,
  };

  pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
    Self { kind, start, end }
  }

  pub fn len(&self) -> usize {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn is_container(&self) -> bool {
    matches!(self.kind, TokenKind::Object | TokenKind::Array)
  }

  /// Strict byte-range containment: `other` lies inside `self`, brackets excluded.
  pub fn contains(&self, other: &Token) -> bool {
    self.start < other.start && other.end < self.end
  }

  /// The token's bytes, or `None` when the span falls outside `src`.
  pub fn bytes<'a>(&self, src: &'a [u8]) -> Option<&'a [u8]> {
    if self.start > self.end {
      return None;
    }
    src.get(self.start..self.end)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
  /// No tokens at all (empty or whitespace-only input).
  Empty,
  Malformed,
  /// Input ended inside a string or an open container.
  Truncated,
  TooDeep,
  RootNotObject,
  /// A hand-built token points outside the source, or has `end < start`.
  OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum DocumentStatus {
  Valid,
  Invalid(InvalidReason),
  /// More tokens (or inputs/outputs/coins) than the fixed ceilings allow.
  CapacityExceeded,
}

/// Fixed-capacity token buffer for one message.
///
/// The document is populated once per message and only read afterwards. Re-parsing
/// overwrites it in place, so a host can keep one instance around for the whole
/// device session.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
  tokens: [Token; TOKEN_CAPACITY],
  count: usize,
  status: DocumentStatus,
}

impl Default for ParsedDocument {
  fn default() -> Self {
    Self::new()
  }
}

impl ParsedDocument {
  pub const fn new() -> Self {
    Self {
      tokens: [Token::EMPTY; TOKEN_CAPACITY],
      count: 0,
      status: DocumentStatus::Invalid(InvalidReason::Empty),
    }
  }

  /// Tokenize `src` into this document, replacing whatever it held.
  pub fn parse(&mut self, src: &[u8]) -> DocumentStatus {
    crate::tokenizer::tokenize(src, self)
  }

  /// Build a document from an externally produced token stream.
  ///
  /// Tokens are checked against `src_len`, the capacity and the nesting ceiling;
  /// the root must be an object.
  pub fn from_tokens(tokens: &[Token], src_len: usize) -> Self {
    let mut doc = Self::new();
    if tokens.len() > TOKEN_CAPACITY {
      doc.tokens.copy_from_slice(&tokens[..TOKEN_CAPACITY]);
      doc.count = TOKEN_CAPACITY;
      doc.status = DocumentStatus::CapacityExceeded;
      return doc;
    }
    doc.tokens[..tokens.len()].copy_from_slice(tokens);
    doc.count = tokens.len();

    let in_bounds = tokens.iter().all(|t| t.start <= t.end && t.end <= src_len);
    let typed = tokens.iter().all(|t| t.kind != TokenKind::Undefined);
    doc.status = match tokens.first() {
      None => DocumentStatus::Invalid(InvalidReason::Empty),
      Some(_) if !in_bounds => DocumentStatus::Invalid(InvalidReason::OutOfBounds),
      Some(_) if !typed => DocumentStatus::Invalid(InvalidReason::Malformed),
      Some(_) if !within_nesting_ceiling(tokens) => {
        DocumentStatus::Invalid(InvalidReason::TooDeep)
      }
      Some(root) if root.kind != TokenKind::Object => {
        DocumentStatus::Invalid(InvalidReason::RootNotObject)
      }
      Some(_) => DocumentStatus::Valid,
    };
    doc
  }

  pub fn reset(&mut self) {
    self.count = 0;
    self.status = DocumentStatus::Invalid(InvalidReason::Empty);
  }

  pub fn status(&self) -> DocumentStatus {
    self.status
  }

  pub fn is_valid(&self) -> bool {
    self.status == DocumentStatus::Valid
  }

  pub fn len(&self) -> usize {
    self.count
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  pub fn token(&self, index: usize) -> Option<&Token> {
    self.tokens().get(index)
  }

  pub fn tokens(&self) -> &[Token] {
    &self.tokens[..self.count]
  }

  /// Tokens of a navigable document; empty for anything not `Valid`.
  pub(crate) fn navigable(&self) -> &[Token] {
    if self.is_valid() {
      self.tokens()
    } else {
      &[]
    }
  }

  pub(crate) fn set_status(&mut self, status: DocumentStatus) {
    self.status = status;
  }

  /// Append a token, or report that the buffer is full.
  pub(crate) fn push(&mut self, token: Token) -> Option<usize> {
    if self.count >= TOKEN_CAPACITY {
      return None;
    }
    let idx = self.count;
    self.tokens[idx] = token;
    self.count += 1;
    Some(idx)
  }

  pub(crate) fn close(&mut self, index: usize, end: usize) {
    if let Some(t) = self.tokens[..self.count].get_mut(index) {
      t.end = end;
    }
  }
}

/// One containment pass over a pre-order stream: no more than `MAX_NESTING_DEPTH`
/// containers may be open around any token, the same limit the tokenizer applies.
fn within_nesting_ceiling(tokens: &[Token]) -> bool {
  let mut open = [0usize; MAX_NESTING_DEPTH + 1];
  let mut depth = 0;
  for (i, tok) in tokens.iter().enumerate() {
    while depth > 0 && !tokens[open[depth - 1]].contains(tok) {
      depth -= 1;
    }
    if depth + usize::from(tok.is_container()) > MAX_NESTING_DEPTH {
      return false;
    }
    open[depth] = i;
    depth += 1;
  }
  true
}
