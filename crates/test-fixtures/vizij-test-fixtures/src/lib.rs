use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "curve-sets")]
    curve_sets: HashMap<String, String>,
    tokens: HashMap<String, TokenEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        payload: Option<String>,
    },
}

impl TokenEntry {
    fn as_path(&self) -> &str {
        match self {
            TokenEntry::Path(path) => path,
            TokenEntry::Detailed { path, .. } => path,
        }
    }

    fn payload(&self) -> Option<&str> {
        match self {
            TokenEntry::Path(_) => None,
            TokenEntry::Detailed { payload, .. } => payload.as_deref(),
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Curve sets stored as expanded (or compact) JSON documents.
pub mod curve_sets {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.curve_sets.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.curve_sets, "curve set", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.curve_sets, "curve set", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.curve_sets, "curve set", name)?;
        Ok(resolve_path(rel))
    }
}

/// Share tokens, optionally paired with the JSON payload they encode.
pub mod tokens {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.tokens.keys().cloned().collect()
    }

    /// Token text with surrounding whitespace removed.
    pub fn token(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.tokens, "token", name)?;
        read_to_string(entry.as_path()).map(|s| s.trim().to_string())
    }

    pub fn payload_json(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.tokens, "token", name)?;
        match entry.payload() {
            Some(rel) => read_to_string(rel).map(Some),
            None => Ok(None),
        }
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.tokens, "token", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}
