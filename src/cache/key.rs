use std::collections::HashMap;

/// Maps a raw client command line to its canonical cache key.
///
/// Pure function. Guarantees that two `SEARCH` commands are cache-equivalent
/// exactly when they carry the same `city` and `max_price` values, regardless
/// of field order, extra whitespace, verb casing or unrecognized fields.
///
/// - Empty or whitespace-only input yields the empty key, which is never
///   stored and never matches.
/// - `LIST` canonicalizes to the constant `"LIST"`; trailing tokens are
///   ignored since the session loop ignores them too.
/// - `QUIT` canonicalizes to `"QUIT"` (never cached, defined for
///   completeness).
/// - `SEARCH` extracts `city`/`max_price` with case-insensitive keys and
///   verbatim values, absent fields included as empty.
/// - Any other verb keeps its tokens space-joined; such commands are rejected
///   before the cache is consulted, so these keys are rarely reached.
pub fn canonical_cache_key(command_line: &str) -> String {
    let cmd = command_line.trim();
    if cmd.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = cmd.split_whitespace().collect();
    let head = parts[0].to_uppercase();

    match head.as_str() {
        "LIST" => "LIST".to_string(),
        "QUIT" => "QUIT".to_string(),
        "SEARCH" => {
            let mut fields: HashMap<String, &str> = HashMap::new();
            for token in &parts[1..] {
                if let Some((key, value)) = token.split_once('=') {
                    fields.insert(key.trim().to_lowercase(), value.trim());
                }
            }
            let city = fields.get("city").copied().unwrap_or("");
            let max_price = fields.get("max_price").copied().unwrap_or("");
            format!("SEARCH city={} max_price={}", city, max_price)
        }
        _ => {
            if parts.len() > 1 {
                format!("{} {}", head, parts[1..].join(" "))
            } else {
                head
            }
        }
    }
}
