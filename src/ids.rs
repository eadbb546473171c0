use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// Bump when the hashed layout changes; old ids stop matching on purpose.
const STABLE_ID_VERSION: &str = "v1";
const SEPARATOR: u8 = 0x1f;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StableId(String);

impl StableId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SHA-256 over version, namespace and parts (unit-separator delimited),
/// truncated to 16 bytes of lowercase hex.
pub fn stable_id<S: AsRef<str>>(namespace: &str, parts: &[S]) -> StableId {
    let mut hasher = Sha256::new();
    hasher.update(STABLE_ID_VERSION.as_bytes());
    hasher.update([SEPARATOR]);
    hasher.update(namespace.as_bytes());
    for part in parts {
        hasher.update([SEPARATOR]);
        hasher.update(part.as_ref().as_bytes());
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(32);
    for byte in &digest[..16] {
        out.push_str(&format!("{byte:02x}"));
    }
    StableId(out)
}

pub fn normalize_name(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut prev_us = false;
    for ch in lower.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            prev_us = false;
        } else if !prev_us && !out.is_empty() {
            out.push('_');
            prev_us = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// External id when the source provided one, normalized name otherwise.
pub fn entity_id(namespace: &str, exid: Option<&str>, name: &str) -> StableId {
    match exid.map(str::trim).filter(|v| !v.is_empty()) {
        Some(exid) => stable_id(namespace, &["exid", exid]),
        None => stable_id(namespace, &["name", normalize_name(name).as_str()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_same_id() {
        let a = stable_id("team", &["HERO JAIRIS"]);
        let b = stable_id("team", &["HERO JAIRIS"]);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn namespace_and_part_boundaries_matter() {
        assert_ne!(stable_id("team", &["x"]), stable_id("player", &["x"]));
        assert_ne!(stable_id("game", &["ab", "c"]), stable_id("game", &["a", "bc"]));
    }

    #[test]
    fn normalize_basic() {
        assert_eq!(normalize_name("  HERO   JAIRIS "), "hero_jairis");
        assert_eq!(normalize_name("MUÑOZ, J.A."), "muñoz_j_a");
        assert_eq!(normalize_name("---"), "");
    }

    #[test]
    fn entity_id_prefers_exid() {
        let by_exid = entity_id("player", Some("123"), "Pérez, Juan");
        assert_eq!(by_exid, entity_id("player", Some(" 123 "), "PEREZ JUAN"));
        let by_name = entity_id("player", Some(""), "Pérez,  Juan");
        assert_eq!(by_name, entity_id("player", None, "pérez juan"));
        assert_ne!(by_exid, by_name);
    }
}
