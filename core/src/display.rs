use crate::{
  flatten::resolve_row,
  navigator::{nth_key, nth_value, object_element_count},
  render::{render_fixed, render_scrolled, write_terminated, ByteCopy, DisplayContext},
  schema::{FieldKind, TxSchema},
  token::{ParsedDocument, ROOT_TOKEN_INDEX},
};

/// Caller-owned name/value line buffers. Both receive NUL-terminated text.
#[derive(Debug)]
pub struct FieldBuffers<'a> {
  pub name: &'a mut [u8],
  pub value: &'a mut [u8],
}

impl<'a> FieldBuffers<'a> {
  pub fn new(name: &'a mut [u8], value: &'a mut [u8]) -> Self {
    Self { name, value }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
  pub kind: FieldKind,
  pub name_len: usize,
  pub value_len: usize,
  pub total_size: usize,
  pub row: usize,
}

/// Render transaction row `row` into `out`.
///
/// Addresses are windowed by `ctx`; coin and amount values are copied whole and
/// must fit the value buffer. `None` past the last row, for documents that are
/// not `Valid`, and for values that cannot be shown.
pub fn get_field(
  doc: &ParsedDocument,
  src: &[u8],
  schema: &TxSchema,
  row: usize,
  ctx: DisplayContext,
  copier: &impl ByteCopy,
  out: FieldBuffers<'_>,
) -> Option<FieldInfo> {
  let field = resolve_row(doc, src, schema, row)?;
  let token = doc.token(field.token)?;
  let rendered = if field.kind.scrollable() {
    render_scrolled(src, token, ctx, out.value, copier)?
  } else {
    render_fixed(src, token, out.value, copier)?
  };
  let name_len = write_terminated(field.kind.label().as_bytes(), out.name, copier)?;
  Some(FieldInfo {
    kind: field.kind,
    name_len,
    value_len: rendered.written,
    total_size: rendered.total_size,
    row: field.row,
  })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairInfo {
  pub name_len: usize,
  pub value_len: usize,
  pub total_size: usize,
  pub row: usize,
}

/// Rows of the generic key/value view: one per root-level pair.
pub fn pair_count(doc: &ParsedDocument) -> usize {
  object_element_count(doc, ROOT_TOKEN_INDEX)
}

/// Render root-level pair `row`: the key as the name, the scrolled value as the value.
pub fn get_pair(
  doc: &ParsedDocument,
  src: &[u8],
  row: usize,
  ctx: DisplayContext,
  copier: &impl ByteCopy,
  out: FieldBuffers<'_>,
) -> Option<PairInfo> {
  let key = doc.token(nth_key(doc, ROOT_TOKEN_INDEX, row)?)?;
  let value = doc.token(nth_value(doc, ROOT_TOKEN_INDEX, row)?)?;
  let name_len = write_terminated(key.bytes(src)?, out.name, copier)?;
  let rendered = render_scrolled(src, value, ctx, out.value, copier)?;
  Some(PairInfo {
    name_len,
    value_len: rendered.written,
    total_size: rendered.total_size,
    row,
  })
}
