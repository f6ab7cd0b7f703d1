mod cursor;
mod display;
mod engine;
mod flatten;
mod models;
pub mod navigator;
mod render;
mod schema;
mod token;
mod tokenizer;

pub use crate::cursor::{decode_cursor, encode_cursor, ViewCursor};
pub use crate::display::{get_field, get_pair, pair_count, FieldBuffers, FieldInfo, PairInfo};
pub use crate::engine::{CoreEngine, CoreError, CoreOptions, DisplayOptions};
pub use crate::flatten::{resolve_row, row_count, ResolvedField};
pub use crate::models::{FieldView, MessageKind, SessionInfo};
pub use crate::render::{
  render_fixed, render_scrolled, ByteCopy, DisplayContext, Rendered, SliceCopy,
};
pub use crate::schema::{
  CoinSpec, FieldKind, SectionSpec, TxSchema, MAX_COINS, MAX_INPUTS, MAX_OUTPUTS, MSG_SEND,
};
pub use crate::token::{
  DocumentStatus, InvalidReason, ParsedDocument, Token, TokenKind, MAX_NESTING_DEPTH,
  ROOT_TOKEN_INDEX, TOKEN_CAPACITY,
};
pub use crate::tokenizer::tokenize;
