use crate::token::Token;

/// Display geometry for one redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
  pub max_chars_per_line: usize,
  /// Horizontal offset into the value, in bytes.
  pub scroll_step: usize,
}

impl DisplayContext {
  pub fn new(max_chars_per_line: usize, scroll_step: usize) -> Self {
    Self {
      max_chars_per_line,
      scroll_step,
    }
  }

  /// Same geometry, scrolled to `scroll_step`.
  pub fn at(self, scroll_step: usize) -> Self {
    Self { scroll_step, ..self }
  }
}

/// Memory copy used for every write into a display buffer.
///
/// `dest` and `src` always have the same length when the core calls it.
pub trait ByteCopy {
  fn copy(&self, dest: &mut [u8], src: &[u8]);
}

impl<F: Fn(&mut [u8], &[u8])> ByteCopy for F {
  fn copy(&self, dest: &mut [u8], src: &[u8]) {
    self(dest, src)
  }
}

/// Plain `copy_from_slice`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceCopy;

impl ByteCopy for SliceCopy {
  fn copy(&self, dest: &mut [u8], src: &[u8]) {
    dest.copy_from_slice(src);
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered {
  /// Bytes written before the NUL terminator.
  pub written: usize,
  /// Full length of the value, for sizing the scroll indicator.
  pub total_size: usize,
}

/// Copy one line-sized window of the token, starting `ctx.scroll_step` bytes in.
///
/// Writes `min(max_chars_per_line, total - scroll_step)` bytes plus a NUL. When the
/// offset is at or past the end nothing is written and `written` is 0. `None` if
/// the token lies outside `src` or `dest` has no room for the terminator.
pub fn render_scrolled(
  src: &[u8],
  token: &Token,
  ctx: DisplayContext,
  dest: &mut [u8],
  copier: &impl ByteCopy,
) -> Option<Rendered> {
  let bytes = token.bytes(src)?;
  let total_size = bytes.len();
  if ctx.scroll_step >= total_size {
    return Some(Rendered {
      written: 0,
      total_size,
    });
  }
  let room = dest.len().checked_sub(1)?;
  let n = ctx
    .max_chars_per_line
    .min(total_size - ctx.scroll_step)
    .min(room);
  copier.copy(&mut dest[..n], &bytes[ctx.scroll_step..ctx.scroll_step + n]);
  dest[n] = 0;
  Some(Rendered {
    written: n,
    total_size,
  })
}

/// Copy the whole token. A value that does not fit `dest` (with its NUL) is refused.
pub fn render_fixed(
  src: &[u8],
  token: &Token,
  dest: &mut [u8],
  copier: &impl ByteCopy,
) -> Option<Rendered> {
  let bytes = token.bytes(src)?;
  write_terminated(bytes, dest, copier)?;
  Some(Rendered {
    written: bytes.len(),
    total_size: bytes.len(),
  })
}

pub(crate) fn write_terminated(bytes: &[u8], dest: &mut [u8], copier: &impl ByteCopy) -> Option<usize> {
  let n = bytes.len();
  if n >= dest.len() {
    return None;
  }
  copier.copy(&mut dest[..n], bytes);
  dest[n] = 0;
  Some(n)
}
