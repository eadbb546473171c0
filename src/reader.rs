use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::assemble::parse_boxscores;
use crate::config::ParserConfig;
use crate::entities::League;
use crate::error::StatsError;

/// UTF-8 when valid, otherwise Latin-1 (older pages are served as ISO-8859-1).
pub fn decode_document(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

pub fn read_document_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(decode_document(&bytes))
}

/// `*.html` files directly under `dir`, sorted by path.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("list {}", dir.display()))?
            .path();
        let is_html = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if is_html && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn parse_boxscores_dir(dir: &Path, config: &ParserConfig) -> Result<League> {
    let paths = list_documents(dir)?;
    let league = parse_boxscores(&paths, |path| read_document_file(path), config)
        .with_context(|| format!("parse boxscores in {}", dir.display()))?;
    Ok(league)
}

pub fn parse_boxscores_bytes(
    documents: &[Vec<u8>],
    config: &ParserConfig,
) -> Result<League, StatsError> {
    parse_boxscores(documents, |bytes| Ok(decode_document(bytes)), config)
}
