use serde::{Deserialize, Serialize};

use crate::{
  navigator::{array_element_count, children, value_at_path, value_for_key},
  token::{DocumentStatus, ParsedDocument, TokenKind, ROOT_TOKEN_INDEX},
};

pub const MAX_INPUTS: usize = 8;
pub const MAX_OUTPUTS: usize = 8;
pub const MAX_COINS: usize = 8;

/// What a display row shows. Labels come from this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
  InputAddress,
  OutputAddress,
  Coin,
  Amount,
}

impl FieldKind {
  pub fn label(self) -> &'static str {
    match self {
      FieldKind::InputAddress => "Input address",
      FieldKind::OutputAddress => "Output address",
      FieldKind::Coin => "Coin",
      FieldKind::Amount => "Amount",
    }
  }

  /// Addresses scroll horizontally; coin fields are shown whole.
  pub fn scrollable(self) -> bool {
    matches!(self, FieldKind::InputAddress | FieldKind::OutputAddress)
  }
}

/// One list of transfer parties (inputs or outputs).
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
  /// Object keys leading from the root object to the section array.
  pub path: &'static [&'static str],
  pub address_kind: FieldKind,
  pub address_key: &'static str,
  pub coins_key: &'static str,
  pub max_items: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CoinSpec {
  pub denom_key: &'static str,
  pub amount_key: &'static str,
  pub max_coins: usize,
}

/// Shape of a displayable transaction: sections in display order, each item an
/// address followed by its coins.
#[derive(Debug, Clone, Copy)]
pub struct TxSchema {
  pub sections: &'static [SectionSpec],
  pub coin: CoinSpec,
}

/// Bank send message: `{"inputs": [{"address", "coins": [{"denom", "amount"}]}], "outputs": [...]}`.
pub const MSG_SEND: TxSchema = TxSchema {
  sections: &[
    SectionSpec {
      path: &["inputs"],
      address_kind: FieldKind::InputAddress,
      address_key: "address",
      coins_key: "coins",
      max_items: MAX_INPUTS,
    },
    SectionSpec {
      path: &["outputs"],
      address_kind: FieldKind::OutputAddress,
      address_key: "address",
      coins_key: "coins",
      max_items: MAX_OUTPUTS,
    },
  ],
  coin: CoinSpec {
    denom_key: "denom",
    amount_key: "amount",
    max_coins: MAX_COINS,
  },
};

/// Why a document does not fit a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShapeError {
  /// Wrong token kinds where the schema expects an array or object.
  Mismatch,
  TooMany,
}

impl TxSchema {
  /// Section array token, `Ok(None)` when the section is absent.
  pub(crate) fn section_array(
    &self,
    doc: &ParsedDocument,
    src: &[u8],
    section: &SectionSpec,
  ) -> Result<Option<usize>, ShapeError> {
    let Some(array) = value_at_path(doc, src, ROOT_TOKEN_INDEX, section.path) else {
      return Ok(None);
    };
    if kind(doc, array) != Some(TokenKind::Array) {
      return Err(ShapeError::Mismatch);
    }
    if array_element_count(doc, array) > section.max_items {
      return Err(ShapeError::TooMany);
    }
    Ok(Some(array))
  }

  /// Coins array of one item, `Ok(None)` when the item lists no coins.
  pub(crate) fn coins_array(
    &self,
    doc: &ParsedDocument,
    src: &[u8],
    section: &SectionSpec,
    item: usize,
  ) -> Result<Option<usize>, ShapeError> {
    if kind(doc, item) != Some(TokenKind::Object) {
      return Err(ShapeError::Mismatch);
    }
    let Some(coins) = value_for_key(doc, src, item, section.coins_key.as_bytes()) else {
      return Ok(None);
    };
    if kind(doc, coins) != Some(TokenKind::Array) {
      return Err(ShapeError::Mismatch);
    }
    if array_element_count(doc, coins) > self.coin.max_coins {
      return Err(ShapeError::TooMany);
    }
    Ok(Some(coins))
  }

  /// Downgrade a valid document that lists more inputs, outputs or coins than the
  /// ceilings allow to `CapacityExceeded`. Returns the resulting status.
  ///
  /// Shape mismatches leave the status alone; the flattener reports those rows as
  /// not found.
  pub fn enforce(&self, doc: &mut ParsedDocument, src: &[u8]) -> DocumentStatus {
    if doc.is_valid() && self.check(doc, src) == Err(ShapeError::TooMany) {
      doc.set_status(DocumentStatus::CapacityExceeded);
    }
    doc.status()
  }

  fn check(&self, doc: &ParsedDocument, src: &[u8]) -> Result<(), ShapeError> {
    for section in self.sections {
      let Some(array) = self.section_array(doc, src, section)? else {
        continue;
      };
      for item in children(doc, array) {
        self.coins_array(doc, src, section, item)?;
      }
    }
    Ok(())
  }
}

fn kind(doc: &ParsedDocument, index: usize) -> Option<TokenKind> {
  doc.token(index).map(|t| t.kind)
}
