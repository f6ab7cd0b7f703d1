use txview_core::{CoreEngine, CoreOptions, MessageKind};

fn main() -> Result<(), String> {
  env_logger::init();
  let mut args = std::env::args().skip(1);
  let path = args.next().ok_or_else(|| {
    "usage: cargo run -p txview_core --example smoke_view -- <message.json> [signed]".to_string()
  })?;
  let kind = match args.next().as_deref() {
    Some("signed") => MessageKind::SignedMessage,
    _ => MessageKind::Transaction,
  };

  let eng = CoreEngine::new(CoreOptions::default());
  let session = eng.open_file(&path, kind).map_err(|e| e.to_string())?;
  println!("status={:?} rows={}", session.status, session.row_count);

  let mut cursor: Option<String> = None;
  loop {
    let view = eng
      .field(&session.session_id, cursor.as_deref())
      .map_err(|e| e.to_string())?;
    println!("[{}] {}: {} ({} bytes)", view.row, view.name, view.value, view.total_size);
    let mut next = view.next_scroll;
    while let Some(token) = next {
      let window = eng
        .field(&session.session_id, Some(&token))
        .map_err(|e| e.to_string())?;
      println!("      +{}: {}", window.scroll, window.value);
      next = window.next_scroll;
    }
    match view.next_row {
      Some(token) => cursor = Some(token),
      None => break,
    }
  }
  Ok(())
}
