#![allow(dead_code)]

use serde_json::{json, Value};

pub type Coins<'a> = &'a [(&'a str, &'a str)];

pub const ADDR_A: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
pub const ADDR_B: &str = "cosmos1v9jxgu33ta047h6lta047h6lta047h6lzvpmge";
pub const ADDR_C: &str = "cosmos1nynns8ex9fq6sjjfj8k79ymkdz4sqth06xexae";

fn section(items: &[(&str, Coins<'_>)]) -> Value {
  Value::Array(
    items
      .iter()
      .map(|(address, coins)| {
        let coins: Vec<Value> = coins
          .iter()
          .map(|(denom, amount)| json!({ "denom": denom, "amount": amount }))
          .collect();
        json!({ "address": address, "coins": coins })
      })
      .collect(),
  )
}

/// A send message with the given inputs and outputs.
pub fn tx_json(inputs: &[(&str, Coins<'_>)], outputs: &[(&str, Coins<'_>)]) -> String {
  serde_json::to_string(&json!({
    "inputs": section(inputs),
    "outputs": section(outputs),
  }))
  .unwrap()
}

/// Rows of a send message computed straight from the JSON value: (label, text).
pub fn reference_rows(json: &str) -> Vec<(&'static str, String)> {
  let v: Value = serde_json::from_str(json).unwrap();
  let text = |v: &Value| match v {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  };
  let mut rows = Vec::new();
  for (key, label) in [("inputs", "Input address"), ("outputs", "Output address")] {
    let Some(items) = v.get(key).and_then(|s| s.as_array()) else {
      continue;
    };
    for item in items {
      rows.push((label, text(&item["address"])));
      for coin in item["coins"].as_array().into_iter().flatten() {
        rows.push(("Coin", text(&coin["denom"])));
        rows.push(("Amount", text(&coin["amount"])));
      }
    }
  }
  rows
}

pub fn c_str(buf: &[u8]) -> &str {
  let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
  std::str::from_utf8(&buf[..end]).unwrap()
}
