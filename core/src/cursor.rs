use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// The whole UI navigation state: which row, and how far it is scrolled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCursor {
  pub row: usize,
  pub scroll: usize,
}

/// Opaque token for a position in the row list.
///
/// `scroll` is a byte offset into the row's value. Only scrollable values use a
/// non-zero offset; the engine hands out the token for the next window.
pub fn encode_cursor(c: ViewCursor) -> String {
  let json = serde_json::to_vec(&c).expect("cursor serialize");
  base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json)
}

/// Missing or empty tokens start at row 0, unscrolled. Row bounds are checked by
/// whoever renders the row, not here.
pub fn decode_cursor(token: Option<&str>) -> Result<ViewCursor, crate::engine::CoreError> {
  match token {
    None => Ok(ViewCursor::default()),
    Some(t) if t.is_empty() => Ok(ViewCursor::default()),
    Some(t) => {
      let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(t)
        .map_err(|e| crate::engine::CoreError::BadCursor(e.to_string()))?;
      let c: ViewCursor = serde_json::from_slice(&bytes)
        .map_err(|e| crate::engine::CoreError::BadCursor(e.to_string()))?;
      Ok(c)
    }
  }
}
