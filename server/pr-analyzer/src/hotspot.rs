//! Directory hotspots: churn summed per top-level directory.

use std::collections::HashMap;

use crate::types::{FileChange, Hotspot};

/// Key for files that live at the repository root.
pub const ROOT_DIR: &str = "(root)";

/// First two "/"-separated segments of a path: "src/auth/login.ts" -> "src/auth",
/// "src/main.rs" -> "src/main.rs". Paths without a "/" map to `ROOT_DIR`.
pub fn directory_key(filename: &str) -> String {
  let parts: Vec<&str> = filename.split('/').collect();
  if parts.len() < 2 {
    return ROOT_DIR.to_string();
  }
  parts[..2].join("/")
}

/// Top `n` directories by summed `changes`, descending.
/// Ties keep the order in which the directory was first seen.
pub fn compute_hotspots(files: &[FileChange], n: usize) -> Vec<Hotspot> {
  let mut order: Vec<Hotspot> = Vec::new();
  let mut index: HashMap<String, usize> = HashMap::new();

  for file in files {
    let key = directory_key(&file.filename);
    match index.get(&key) {
      Some(&i) => order[i].churn = order[i].churn.saturating_add(file.changes),
      None => {
        index.insert(key.clone(), order.len());
        order.push(Hotspot {
          dir: key,
          churn: file.changes,
        });
      }
    }
  }

  // sort_by is stable
  order.sort_by(|a, b| b.churn.cmp(&a.churn));
  order.truncate(n);
  order
}
