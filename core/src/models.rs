use serde::{Deserialize, Serialize};

use crate::{schema::FieldKind, token::DocumentStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
  /// Inputs/outputs with coins, displayed through the transaction schema.
  Transaction,
  /// Any object; each root-level key/value pair is one row.
  SignedMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
  pub session_id: String,
  pub kind: MessageKind,
  pub status: DocumentStatus,
  /// 0 for documents that cannot be displayed.
  pub row_count: usize,
  pub source_len: usize,
  pub created_at_ms: i64,
}

/// One rendered display row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldView {
  /// `None` for key/value rows of a signed message.
  pub kind: Option<FieldKind>,
  pub name: String,
  pub value: String,
  pub total_size: usize,
  pub row: usize,
  pub scroll: usize,
  /// Cursor for the next horizontal window of this value, if any remains.
  pub next_scroll: Option<String>,
  /// Cursor for the first window of the next row, if there is one.
  pub next_row: Option<String>,
}
