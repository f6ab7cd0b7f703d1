//! Maps a linear UI row index onto the nested transaction fields.
//!
//! Rows are: for each item of each section, one address row, then a coin row and
//! an amount row per coin. Nothing is cached; every lookup re-walks the document
//! from the first section and counts rows until it reaches the requested one.

use crate::{
  navigator::{children, value_for_key},
  schema::{FieldKind, TxSchema},
  token::{ParsedDocument, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedField {
  pub kind: FieldKind,
  /// Token holding the value to display.
  pub token: usize,
  pub row: usize,
}

enum Walk {
  Found(ResolvedField),
  Exhausted(usize),
}

/// Count rows up to `target`. `None` when the document does not fit the schema or
/// the target row's field is missing.
fn walk(doc: &ParsedDocument, src: &[u8], schema: &TxSchema, target: Option<usize>) -> Option<Walk> {
  if !doc.is_valid() {
    return None;
  }
  let mut row = 0usize;
  for section in schema.sections {
    let Some(array) = schema.section_array(doc, src, section).ok()? else {
      continue;
    };
    let mut items = children(doc, array);
    for item in items.by_ref() {
      let coins = schema.coins_array(doc, src, section, item).ok()?;
      if target == Some(row) {
        let token = value_for_key(doc, src, item, section.address_key.as_bytes())?;
        return Some(Walk::Found(ResolvedField {
          kind: section.address_kind,
          token,
          row,
        }));
      }
      row += 1;

      let Some(coins) = coins else {
        continue;
      };
      let mut coin_walk = children(doc, coins);
      for coin in coin_walk.by_ref() {
        if doc.token(coin).map(|t| t.kind) != Some(TokenKind::Object) {
          return None;
        }
        let fields = [
          (FieldKind::Coin, schema.coin.denom_key),
          (FieldKind::Amount, schema.coin.amount_key),
        ];
        for (kind, key) in fields {
          if target == Some(row) {
            let token = value_for_key(doc, src, coin, key.as_bytes())?;
            return Some(Walk::Found(ResolvedField { kind, token, row }));
          }
          row += 1;
        }
      }
      if coin_walk.aborted() {
        return None;
      }
    }
    if items.aborted() {
      return None;
    }
  }
  Some(Walk::Exhausted(row))
}

/// Total number of display rows, `None` for documents that cannot be displayed.
pub fn row_count(doc: &ParsedDocument, src: &[u8], schema: &TxSchema) -> Option<usize> {
  match walk(doc, src, schema, None)? {
    Walk::Exhausted(n) => Some(n),
    Walk::Found(_) => None,
  }
}

/// Field shown at `row`, or `None` past the last row.
pub fn resolve_row(
  doc: &ParsedDocument,
  src: &[u8],
  schema: &TxSchema,
  row: usize,
) -> Option<ResolvedField> {
  match walk(doc, src, schema, Some(row))? {
    Walk::Found(field) => Some(field),
    Walk::Exhausted(_) => None,
  }
}
