//! Tree navigation over a flat, pre-order token buffer.
//!
//! There are no parent or sibling links. A token's children are found by walking
//! forward from it while tokens stay inside its byte range, and every step over a
//! child skips that child's own contained run. Object children alternate key,
//! value.
//!
//! Every function here returns `None`/0 for out-of-range indices, wrong token
//! kinds and documents whose status is not `Valid`.

use crate::token::{ParsedDocument, Token, TokenKind, MAX_NESTING_DEPTH};

/// Index of the first token after `child`'s subtree.
///
/// Walks the contained run iteratively with a fixed ancestor stack; `None` when
/// the run nests deeper than `MAX_NESTING_DEPTH`.
fn skip_subtree(tokens: &[Token], child: usize) -> Option<usize> {
  let root = tokens.get(child)?;
  let mut open = [0usize; MAX_NESTING_DEPTH];
  let mut depth = 0;
  let mut i = child + 1;
  while let Some(tok) = tokens.get(i) {
    if !root.contains(tok) {
      break;
    }
    while depth > 0 && !tokens[open[depth - 1]].contains(tok) {
      depth -= 1;
    }
    if depth == MAX_NESTING_DEPTH {
      return None;
    }
    open[depth] = i;
    depth += 1;
    i += 1;
  }
  Some(i)
}

/// Direct children of a container token, in document order.
#[derive(Debug, Clone)]
pub struct Children<'a> {
  tokens: &'a [Token],
  parent: usize,
  next: usize,
  aborted: bool,
}

impl Children<'_> {
  /// True once the walk hit a subtree deeper than the nesting ceiling.
  pub fn aborted(&self) -> bool {
    self.aborted
  }
}

impl Iterator for Children<'_> {
  type Item = usize;

  fn next(&mut self) -> Option<usize> {
    if self.aborted {
      return None;
    }
    let parent = self.tokens.get(self.parent)?;
    let child = self.next;
    if !parent.contains(self.tokens.get(child)?) {
      return None;
    }
    match skip_subtree(self.tokens, child) {
      Some(after) => {
        self.next = after;
        Some(child)
      }
      None => {
        self.aborted = true;
        None
      }
    }
  }
}

fn kind_of(doc: &ParsedDocument, index: usize) -> Option<TokenKind> {
  doc.navigable().get(index).map(|t| t.kind)
}

/// Iterate the direct children of `index`. Empty unless it is an array or object.
pub fn children(doc: &ParsedDocument, index: usize) -> Children<'_> {
  let tokens = match kind_of(doc, index) {
    Some(TokenKind::Array | TokenKind::Object) => doc.navigable(),
    _ => &[],
  };
  Children {
    tokens,
    parent: index,
    next: index.saturating_add(1),
    aborted: false,
  }
}

/// Number of elements in an array, or of key/value pairs in an object.
pub fn element_count(doc: &ParsedDocument, index: usize) -> usize {
  let mut walk = children(doc, index);
  let n = walk.by_ref().count();
  if walk.aborted() {
    return 0;
  }
  match kind_of(doc, index) {
    Some(TokenKind::Object) => n.div_ceil(2),
    _ => n,
  }
}

pub fn array_element_count(doc: &ParsedDocument, array: usize) -> usize {
  match kind_of(doc, array) {
    Some(TokenKind::Array) => element_count(doc, array),
    _ => 0,
  }
}

pub fn object_element_count(doc: &ParsedDocument, object: usize) -> usize {
  match kind_of(doc, object) {
    Some(TokenKind::Object) => element_count(doc, object),
    _ => 0,
  }
}

/// The nth child, provided the whole child list walks cleanly.
fn nth_child(doc: &ParsedDocument, index: usize, n: usize) -> Option<usize> {
  let mut walk = children(doc, index);
  let found = walk.nth(n);
  walk.by_ref().for_each(drop);
  if walk.aborted() {
    return None;
  }
  found
}

/// Token index of the nth element. For objects this is the nth pair's key.
pub fn nth_element(doc: &ParsedDocument, index: usize, n: usize) -> Option<usize> {
  match kind_of(doc, index)? {
    TokenKind::Array => nth_child(doc, index, n),
    TokenKind::Object => nth_child(doc, index, n.checked_mul(2)?),
    _ => None,
  }
}

pub fn nth_key(doc: &ParsedDocument, object: usize, n: usize) -> Option<usize> {
  if kind_of(doc, object)? != TokenKind::Object {
    return None;
  }
  nth_child(doc, object, n.checked_mul(2)?)
}

pub fn nth_value(doc: &ParsedDocument, object: usize, n: usize) -> Option<usize> {
  if kind_of(doc, object)? != TokenKind::Object {
    return None;
  }
  nth_child(doc, object, n.checked_mul(2)?.checked_add(1)?)
}

/// Value paired with `key` among the object's direct keys.
///
/// Keys are compared byte for byte against the raw token span, without unescaping.
/// Nested objects are not searched.
pub fn value_for_key(doc: &ParsedDocument, src: &[u8], object: usize, key: &[u8]) -> Option<usize> {
  if kind_of(doc, object)? != TokenKind::Object {
    return None;
  }
  let tokens = doc.navigable();
  let mut walk = children(doc, object);
  let mut found = None;
  while let Some(k) = walk.next() {
    let v = walk.next()?;
    let tok = &tokens[k];
    if found.is_none() && tok.kind == TokenKind::String && tok.bytes(src) == Some(key) {
      found = Some(v);
    }
  }
  if walk.aborted() {
    return None;
  }
  found
}

/// Follow a chain of object keys starting at `object`.
pub fn value_at_path(
  doc: &ParsedDocument,
  src: &[u8],
  object: usize,
  path: &[&str],
) -> Option<usize> {
  path
    .iter()
    .try_fold(object, |at, key| value_for_key(doc, src, at, key.as_bytes()))
}
