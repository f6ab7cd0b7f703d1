use crate::token::{
  DocumentStatus, InvalidReason, ParsedDocument, Token, TokenKind, MAX_NESTING_DEPTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
  Object,
  Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
  Open,
  AfterKey,
  AfterColon,
  AfterValue,
  AfterComma,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
  token: usize,
  kind: Container,
  state: FrameState,
}

const EMPTY_FRAME: Frame = Frame {
  token: 0,
  kind: Container::Array,
  state: FrameState::Open,
};

const MALFORMED: DocumentStatus = DocumentStatus::Invalid(InvalidReason::Malformed);
const TRUNCATED: DocumentStatus = DocumentStatus::Invalid(InvalidReason::Truncated);

/// Tokenize a JSON message into `doc`, overwriting it.
///
/// Scanning stops at `src.len()` or the first NUL byte. On capacity overflow the
/// tokens produced so far stay in the buffer and the status is `CapacityExceeded`.
pub fn tokenize(src: &[u8], doc: &mut ParsedDocument) -> DocumentStatus {
  doc.reset();
  let end = src.iter().position(|&b| b == 0).unwrap_or(src.len());
  let outcome = Tokenizer::new(&src[..end], doc).run();
  let status = match outcome {
    Ok(()) => root_status(doc),
    Err(status) => status,
  };
  doc.set_status(status);
  status
}

fn root_status(doc: &ParsedDocument) -> DocumentStatus {
  match doc.tokens().first() {
    None => DocumentStatus::Invalid(InvalidReason::Empty),
    Some(root) if root.kind != TokenKind::Object => {
      DocumentStatus::Invalid(InvalidReason::RootNotObject)
    }
    Some(_) => DocumentStatus::Valid,
  }
}

struct Tokenizer<'s, 'd> {
  src: &'s [u8],
  pos: usize,
  doc: &'d mut ParsedDocument,
  stack: [Frame; MAX_NESTING_DEPTH],
  depth: usize,
  root_done: bool,
}

impl<'s, 'd> Tokenizer<'s, 'd> {
  fn new(src: &'s [u8], doc: &'d mut ParsedDocument) -> Self {
    Self {
      src,
      pos: 0,
      doc,
      stack: [EMPTY_FRAME; MAX_NESTING_DEPTH],
      depth: 0,
      root_done: false,
    }
  }

  fn run(&mut self) -> Result<(), DocumentStatus> {
    while self.pos < self.src.len() {
      match self.src[self.pos] {
        b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
        b'{' => self.open(Container::Object)?,
        b'[' => self.open(Container::Array)?,
        b'}' => self.close(Container::Object)?,
        b']' => self.close(Container::Array)?,
        b'"' => self.string()?,
        b':' => self.colon()?,
        b',' => self.comma()?,
        b'-' | b'0'..=b'9' | b't' | b'f' | b'n' => self.primitive()?,
        _ => return Err(MALFORMED),
      }
    }
    if self.depth > 0 {
      return Err(TRUNCATED);
    }
    if !self.root_done {
      return Err(DocumentStatus::Invalid(InvalidReason::Empty));
    }
    Ok(())
  }

  fn top(&self) -> Option<Frame> {
    self.depth.checked_sub(1).map(|i| self.stack[i])
  }

  fn set_top_state(&mut self, state: FrameState) {
    if let Some(i) = self.depth.checked_sub(1) {
      self.stack[i].state = state;
    }
  }

  fn push(&mut self, token: Token) -> Result<usize, DocumentStatus> {
    self.doc.push(token).ok_or(DocumentStatus::CapacityExceeded)
  }

  /// Check that a value may start at the current position.
  fn begin_value(&self) -> Result<(), DocumentStatus> {
    match self.top() {
      None if self.root_done => Err(MALFORMED),
      None => Ok(()),
      Some(f) => match (f.kind, f.state) {
        (Container::Object, FrameState::AfterColon) => Ok(()),
        (Container::Array, FrameState::Open | FrameState::AfterComma) => Ok(()),
        _ => Err(MALFORMED),
      },
    }
  }

  fn end_value(&mut self) {
    if self.depth == 0 {
      self.root_done = true;
    } else {
      self.set_top_state(FrameState::AfterValue);
    }
  }

  fn expects_key(&self) -> bool {
    matches!(
      self.top(),
      Some(Frame {
        kind: Container::Object,
        state: FrameState::Open | FrameState::AfterComma,
        ..
      })
    )
  }

  fn open(&mut self, kind: Container) -> Result<(), DocumentStatus> {
    self.begin_value()?;
    if self.depth == MAX_NESTING_DEPTH {
      return Err(DocumentStatus::Invalid(InvalidReason::TooDeep));
    }
    let token_kind = match kind {
      Container::Object => TokenKind::Object,
      Container::Array => TokenKind::Array,
    };
    let token = self.push(Token::new(token_kind, self.pos, self.pos))?;
    self.stack[self.depth] = Frame {
      token,
      kind,
      state: FrameState::Open,
    };
    self.depth += 1;
    self.pos += 1;
    Ok(())
  }

  fn close(&mut self, kind: Container) -> Result<(), DocumentStatus> {
    let frame = self.top().ok_or(MALFORMED)?;
    if frame.kind != kind || !matches!(frame.state, FrameState::Open | FrameState::AfterValue) {
      return Err(MALFORMED);
    }
    self.doc.close(frame.token, self.pos + 1);
    self.depth -= 1;
    self.pos += 1;
    self.end_value();
    Ok(())
  }

  fn colon(&mut self) -> Result<(), DocumentStatus> {
    match self.top() {
      Some(Frame {
        kind: Container::Object,
        state: FrameState::AfterKey,
        ..
      }) => {
        self.set_top_state(FrameState::AfterColon);
        self.pos += 1;
        Ok(())
      }
      _ => Err(MALFORMED),
    }
  }

  fn comma(&mut self) -> Result<(), DocumentStatus> {
    match self.top() {
      Some(f) if f.state == FrameState::AfterValue => {
        self.set_top_state(FrameState::AfterComma);
        self.pos += 1;
        Ok(())
      }
      _ => Err(MALFORMED),
    }
  }

  fn string(&mut self) -> Result<(), DocumentStatus> {
    let start = self.pos + 1;
    let mut i = start;
    loop {
      let b = *self.src.get(i).ok_or(TRUNCATED)?;
      match b {
        b'"' => break,
        b'\\' => {
          let esc = *self.src.get(i + 1).ok_or(TRUNCATED)?;
          match esc {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => i += 2,
            b'u' => {
              for k in 2..6 {
                let h = *self.src.get(i + k).ok_or(TRUNCATED)?;
                if !h.is_ascii_hexdigit() {
                  return Err(MALFORMED);
                }
              }
              i += 6;
            }
            _ => return Err(MALFORMED),
          }
        }
        c if c < 0x20 => return Err(MALFORMED),
        _ => i += 1,
      }
    }

    let token = Token::new(TokenKind::String, start, i);
    if self.expects_key() {
      self.push(token)?;
      self.set_top_state(FrameState::AfterKey);
    } else {
      self.begin_value()?;
      self.push(token)?;
      self.end_value();
    }
    self.pos = i + 1;
    Ok(())
  }

  fn primitive(&mut self) -> Result<(), DocumentStatus> {
    self.begin_value()?;
    let start = self.pos;
    let mut i = start;
    while let Some(&b) = self.src.get(i) {
      match b {
        b' ' | b'\t' | b'\r' | b'\n' | b',' | b']' | b'}' => break,
        b'"' | b':' | b'[' | b'{' => return Err(MALFORMED),
        c if !(32..127).contains(&c) => return Err(MALFORMED),
        _ => i += 1,
      }
    }
    // A primitive cut off by the end of input inside a container is a partial value.
    if i == self.src.len() && self.depth > 0 {
      return Err(TRUNCATED);
    }
    if !is_literal(&self.src[start..i]) {
      return Err(MALFORMED);
    }
    self.push(Token::new(TokenKind::Primitive, start, i))?;
    self.end_value();
    self.pos = i;
    Ok(())
  }
}

fn is_literal(raw: &[u8]) -> bool {
  matches!(raw, b"true" | b"false" | b"null") || is_number(raw)
}

/// JSON number grammar: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`.
fn is_number(raw: &[u8]) -> bool {
  fn digits(raw: &[u8], i: &mut usize) -> usize {
    let start = *i;
    while raw.get(*i).is_some_and(u8::is_ascii_digit) {
      *i += 1;
    }
    *i - start
  }

  let mut i = 0;
  if raw.first() == Some(&b'-') {
    i += 1;
  }
  match raw.get(i) {
    Some(b'0') => i += 1,
    Some(b'1'..=b'9') => {
      digits(raw, &mut i);
    }
    _ => return false,
  }
  if raw.get(i) == Some(&b'.') {
    i += 1;
    if digits(raw, &mut i) == 0 {
      return false;
    }
  }
  if matches!(raw.get(i), Some(b'e' | b'E')) {
    i += 1;
    if matches!(raw.get(i), Some(b'+' | b'-')) {
      i += 1;
    }
    if digits(raw, &mut i) == 0 {
      return false;
    }
  }
  i == raw.len()
}
