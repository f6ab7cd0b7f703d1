use std::{
  path::Path,
  sync::Arc,
  time::{SystemTime, UNIX_EPOCH},
};

use parking_lot::Mutex;
use thiserror::Error;
use uuid::Uuid;

use crate::{
  cursor::{decode_cursor, encode_cursor, ViewCursor},
  display::{get_field, get_pair, pair_count, FieldBuffers},
  flatten::row_count,
  models::{FieldView, MessageKind, SessionInfo},
  render::{DisplayContext, SliceCopy},
  schema::{TxSchema, MSG_SEND},
  token::{DocumentStatus, InvalidReason, ParsedDocument},
};

#[derive(Debug, Error)]
pub enum CoreError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("unknown session: {0}")]
  UnknownSession(String),
  #[error("bad cursor token: {0}")]
  BadCursor(String),
  #[error("invalid argument: {0}")]
  InvalidArg(String),
  #[error("invalid document: {0:?}")]
  InvalidDocument(InvalidReason),
  #[error("transaction too large")]
  CapacityExceeded,
  #[error("no field at row {row}")]
  NotFound { row: usize },
}

#[derive(Debug, Clone)]
pub struct DisplayOptions {
  pub max_chars_per_line: usize,
  /// Name line buffer size, NUL included.
  pub name_capacity: usize,
  /// Value line buffer size, NUL included. Must hold the longest coin/amount.
  pub value_capacity: usize,
}

impl Default for DisplayOptions {
  fn default() -> Self {
    Self {
      max_chars_per_line: 17,
      name_capacity: 32,
      value_capacity: 128,
    }
  }
}

#[derive(Debug, Clone)]
pub struct CoreOptions {
  pub display: DisplayOptions,
  pub max_message_bytes: usize,
  pub schema: TxSchema,
}

impl Default for CoreOptions {
  fn default() -> Self {
    Self {
      display: DisplayOptions::default(),
      max_message_bytes: 4096,
      schema: MSG_SEND,
    }
  }
}

/// The single active message. The token buffer is reused across messages.
struct ActiveSlot {
  info: Option<SessionInfo>,
  source: Vec<u8>,
  doc: Box<ParsedDocument>,
}

#[derive(Clone)]
pub struct CoreEngine {
  options: CoreOptions,
  active: Arc<Mutex<ActiveSlot>>,
}

impl CoreEngine {
  pub fn new(options: CoreOptions) -> Self {
    Self {
      options,
      active: Arc::new(Mutex::new(ActiveSlot {
        info: None,
        source: Vec::new(),
        doc: Box::new(ParsedDocument::new()),
      })),
    }
  }

  /// Tokenize a message and make it the active session.
  ///
  /// The previous session, if any, is discarded. Messages that cannot be displayed
  /// still open; `SessionInfo.status` says why, so the UI can tell "too large" apart
  /// from "malformed".
  pub fn open_message(&self, bytes: &[u8], kind: MessageKind) -> Result<SessionInfo, CoreError> {
    if bytes.len() > self.options.max_message_bytes {
      return Err(CoreError::InvalidArg(format!(
        "message too large: {} bytes (max {})",
        bytes.len(),
        self.options.max_message_bytes
      )));
    }

    let mut guard = self.active.lock();
    let slot = &mut *guard;
    if let Some(prev) = slot.info.take() {
      log::debug!("[engine] discarding session {}", prev.session_id);
    }
    slot.source.clear();
    slot.source.extend_from_slice(bytes);

    let mut status = slot.doc.parse(&slot.source);
    let rows = match kind {
      MessageKind::Transaction => {
        status = self.options.schema.enforce(&mut slot.doc, &slot.source);
        row_count(&slot.doc, &slot.source, &self.options.schema).unwrap_or(0)
      }
      MessageKind::SignedMessage => pair_count(&slot.doc),
    };

    let info = SessionInfo {
      session_id: Uuid::new_v4().to_string(),
      kind,
      status,
      row_count: rows,
      source_len: bytes.len(),
      created_at_ms: now_ms(),
    };
    match status {
      DocumentStatus::Valid => log::info!(
        "[engine] opened {:?} session {} ({} rows, {} tokens)",
        kind,
        info.session_id,
        rows,
        slot.doc.len()
      ),
      DocumentStatus::CapacityExceeded => log::warn!(
        "[engine] session {}: message exceeds display capacity",
        info.session_id
      ),
      DocumentStatus::Invalid(reason) => {
        log::warn!("[engine] session {}: invalid document ({:?})", info.session_id, reason)
      }
    }
    slot.info = Some(info.clone());
    Ok(info)
  }

  /// Read a message from disk and open it.
  pub fn open_file(&self, path: impl AsRef<Path>, kind: MessageKind) -> Result<SessionInfo, CoreError> {
    let path = path.as_ref();
    let len = std::fs::metadata(path)?.len();
    if len > self.options.max_message_bytes as u64 {
      return Err(CoreError::InvalidArg(format!(
        "message too large: {} bytes (max {})",
        len, self.options.max_message_bytes
      )));
    }
    let bytes = std::fs::read(path)?;
    self.open_message(&bytes, kind)
  }

  /// Render the row addressed by `cursor` (row 0, no scroll when absent).
  pub fn field(&self, session_id: &str, cursor: Option<&str>) -> Result<FieldView, CoreError> {
    let cursor = decode_cursor(cursor)?;
    let guard = self.active.lock();
    let info = guard
      .info
      .as_ref()
      .filter(|i| i.session_id == session_id)
      .ok_or_else(|| CoreError::UnknownSession(session_id.to_string()))?;
    match info.status {
      DocumentStatus::Valid => {}
      DocumentStatus::Invalid(reason) => return Err(CoreError::InvalidDocument(reason)),
      DocumentStatus::CapacityExceeded => return Err(CoreError::CapacityExceeded),
    }

    let display = &self.options.display;
    let ctx = DisplayContext::new(display.max_chars_per_line, cursor.scroll);
    let mut name = vec![0u8; display.name_capacity];
    let mut value = vec![0u8; display.value_capacity];
    let out = FieldBuffers::new(&mut name, &mut value);

    let rendered = match info.kind {
      MessageKind::Transaction => get_field(
        &guard.doc,
        &guard.source,
        &self.options.schema,
        cursor.row,
        ctx,
        &SliceCopy,
        out,
      )
      .map(|f| (Some(f.kind), f.name_len, f.value_len, f.total_size)),
      MessageKind::SignedMessage => get_pair(&guard.doc, &guard.source, cursor.row, ctx, &SliceCopy, out)
        .map(|p| (None, p.name_len, p.value_len, p.total_size)),
    };
    let (kind, name_len, value_len, total_size) =
      rendered.ok_or(CoreError::NotFound { row: cursor.row })?;
    log::debug!(
      "[engine] row {} scroll {}: {} of {} bytes",
      cursor.row,
      cursor.scroll,
      value_len,
      total_size
    );

    let scrolls = kind.map_or(true, |k| k.scrollable());
    // Advance by what was actually written; a value buffer narrower than a line
    // clamps the window.
    let next_scroll_at = cursor.scroll.saturating_add(value_len);
    let next_scroll = (scrolls && value_len > 0 && next_scroll_at < total_size)
      .then(|| {
        encode_cursor(ViewCursor {
          row: cursor.row,
          scroll: next_scroll_at,
        })
      });
    let next_row = (cursor.row + 1 < info.row_count).then(|| {
      encode_cursor(ViewCursor {
        row: cursor.row + 1,
        scroll: 0,
      })
    });

    Ok(FieldView {
      kind,
      name: String::from_utf8_lossy(&name[..name_len]).into_owned(),
      value: String::from_utf8_lossy(&value[..value_len]).into_owned(),
      total_size,
      row: cursor.row,
      scroll: cursor.scroll,
      next_scroll,
      next_row,
    })
  }

  /// Current session, if it matches `session_id`.
  pub fn session(&self, session_id: &str) -> Result<SessionInfo, CoreError> {
    self
      .active
      .lock()
      .info
      .clone()
      .filter(|i| i.session_id == session_id)
      .ok_or_else(|| CoreError::UnknownSession(session_id.to_string()))
  }

  /// Drop the active session and clear its token buffer.
  pub fn close(&self, session_id: &str) -> Result<(), CoreError> {
    let mut guard = self.active.lock();
    if guard.info.as_ref().map(|i| i.session_id.as_str()) != Some(session_id) {
      return Err(CoreError::UnknownSession(session_id.to_string()));
    }
    guard.info = None;
    guard.source.clear();
    guard.doc.reset();
    log::debug!("[engine] closed session {session_id}");
    Ok(())
  }
}

fn now_ms() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default()
    .as_millis() as i64
}
