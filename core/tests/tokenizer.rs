use txview_core::{
  tokenize, DocumentStatus, InvalidReason, ParsedDocument, Token, TokenKind, TOKEN_CAPACITY,
};

fn parse(src: &str) -> ParsedDocument {
  let mut doc = ParsedDocument::new();
  doc.parse(src.as_bytes());
  doc
}

fn invalid(reason: InvalidReason) -> DocumentStatus {
  DocumentStatus::Invalid(reason)
}

#[test]
fn tokens_are_pre_order_with_string_contents() {
  let src = r#"{"a":[1,"x"],"b":{"c":null}}"#;
  let doc = parse(src);
  assert_eq!(doc.status(), DocumentStatus::Valid);
  assert_eq!(
    doc.tokens(),
    &[
      Token::new(TokenKind::Object, 0, 28),
      Token::new(TokenKind::String, 2, 3),
      Token::new(TokenKind::Array, 5, 12),
      Token::new(TokenKind::Primitive, 6, 7),
      Token::new(TokenKind::String, 9, 10),
      Token::new(TokenKind::String, 14, 15),
      Token::new(TokenKind::Object, 17, 27),
      Token::new(TokenKind::String, 19, 20),
      Token::new(TokenKind::Primitive, 22, 26),
    ]
  );
  assert_eq!(doc.token(8).unwrap().bytes(src.as_bytes()), Some(&b"null"[..]));
}

#[test]
fn whitespace_and_empty_containers() {
  let doc = parse(" {\n \"a\" : [ ] ,\t\"b\" : { } }\r\n");
  assert!(doc.is_valid());
  assert_eq!(doc.len(), 5);
}

#[test]
fn empty_input_is_invalid() {
  assert_eq!(parse("").status(), invalid(InvalidReason::Empty));
  assert_eq!(parse(" \n\t").status(), invalid(InvalidReason::Empty));
}

#[test]
fn root_must_be_an_object() {
  assert_eq!(parse("[1,2]").status(), invalid(InvalidReason::RootNotObject));
  assert_eq!(parse("\"text\"").status(), invalid(InvalidReason::RootNotObject));
  assert_eq!(parse("42").status(), invalid(InvalidReason::RootNotObject));
}

#[test]
fn truncated_input_is_reported() {
  for src in [r#"{"a":1"#, r#"{"a":"x"#, r#"{"a":[1,2"#, r#"{"a":"\"#, "{"] {
    assert_eq!(parse(src).status(), invalid(InvalidReason::Truncated), "{src}");
  }
}

#[test]
fn syntax_errors_are_malformed() {
  for src in [
    r#"{"a":[1,2}"#,
    r#"{"a" 1}"#,
    r#"{1:2}"#,
    r#"{"a":1,}"#,
    r#"{"a":tru}"#,
    r#"{"a":"\x"}"#,
    r#"{"a":"\u12g4"}"#,
    r#"{"a":1}}"#,
    r#"{"a":1} {"b":2}"#,
    r#"{"a"::1}"#,
    "{\"a\":\"line\nbreak\"}",
    r#"{"a":@}"#,
  ] {
    assert_eq!(parse(src).status(), invalid(InvalidReason::Malformed), "{src}");
  }
}

#[test]
fn escapes_and_numbers_are_accepted() {
  let doc = parse(r#"{"k":"a\"bé\\","n":-1.5e3,"t":true,"f":false}"#);
  assert!(doc.is_valid());
  // Escapes stay in the raw span.
  assert_eq!(doc.token(2).unwrap().len(), r#"a\"bé\\"#.len());
}

#[test]
fn number_grammar_is_enforced() {
  for n in ["0", "-0", "7", "-12", "3.25", "1e9", "1E+2", "-0.5e-3"] {
    let src = format!(r#"{{"n":{n}}}"#);
    assert!(parse(&src).is_valid(), "{n}");
  }
  for n in ["-", "--1", "1-2", "1e", "1e+", "01", "1.", ".5", "+1", "1.2.3", "0x10", "tru"] {
    let src = format!(r#"{{"n":{n}}}"#);
    assert_eq!(parse(&src).status(), invalid(InvalidReason::Malformed), "{n}");
  }
}

#[test]
fn scanning_stops_at_nul() {
  let mut doc = ParsedDocument::new();
  let status = doc.parse(b"{\"a\":1}\0{{{ garbage");
  assert_eq!(status, DocumentStatus::Valid);
  assert_eq!(doc.len(), 3);
}

#[test]
fn nesting_beyond_ceiling_is_too_deep() {
  let src = format!("{{\"a\":{}{}}}", "[".repeat(20), "]".repeat(20));
  assert_eq!(parse(&src).status(), invalid(InvalidReason::TooDeep));

  let src = format!("{{\"a\":{}{}}}", "[".repeat(10), "]".repeat(10));
  assert!(parse(&src).is_valid());
}

#[test]
fn token_overflow_mid_array_exceeds_capacity() {
  // Never closed: the buffer fills before the truncation is seen.
  let src = format!("{{\"a\":[{}", "1,".repeat(200));
  let doc = parse(&src);
  assert_eq!(doc.status(), DocumentStatus::CapacityExceeded);
  assert!(!doc.is_valid());
  assert_eq!(doc.len(), TOKEN_CAPACITY);
}

#[test]
fn reparse_overwrites_previous_document() {
  let mut doc = ParsedDocument::new();
  assert_eq!(doc.parse(br#"{"a":[1,2,3]}"#), DocumentStatus::Valid);
  assert_eq!(doc.len(), 6);

  assert_eq!(tokenize(b"{\"a\":", &mut doc), invalid(InvalidReason::Truncated));
  assert!(!doc.is_valid());

  assert_eq!(tokenize(br#"{"b":2}"#, &mut doc), DocumentStatus::Valid);
  assert_eq!(doc.len(), 3);
  assert_eq!(doc.token(1).unwrap(), &Token::new(TokenKind::String, 2, 3));
}

#[test]
fn hand_built_tokens_are_checked() {
  let ok = ParsedDocument::from_tokens(
    &[
      Token::new(TokenKind::Object, 0, 7),
      Token::new(TokenKind::String, 2, 3),
      Token::new(TokenKind::Primitive, 5, 6),
    ],
    7,
  );
  assert!(ok.is_valid());

  let oob = ParsedDocument::from_tokens(&[Token::new(TokenKind::Object, 0, 9)], 7);
  assert_eq!(oob.status(), invalid(InvalidReason::OutOfBounds));

  let reversed = ParsedDocument::from_tokens(&[Token::new(TokenKind::Object, 5, 2)], 7);
  assert_eq!(reversed.status(), invalid(InvalidReason::OutOfBounds));

  let untyped = ParsedDocument::from_tokens(
    &[Token::new(TokenKind::Object, 0, 7), Token::EMPTY],
    7,
  );
  assert_eq!(untyped.status(), invalid(InvalidReason::Malformed));

  let empty = ParsedDocument::from_tokens(&[], 0);
  assert_eq!(empty.status(), invalid(InvalidReason::Empty));

  let too_many = vec![Token::new(TokenKind::Primitive, 0, 1); TOKEN_CAPACITY + 1];
  let full = ParsedDocument::from_tokens(&too_many, 1);
  assert_eq!(full.status(), DocumentStatus::CapacityExceeded);
  assert_eq!(full.len(), TOKEN_CAPACITY);
}
