//! core::store
//!
//! Ordered, read-only index over a dotted-path data-model dump.
//!
//! # Format
//!
//! One entry per line: `<root>.<dotted.path>=<value>`. The path ends at the
//! first `=`. Double quotes around the value are stripped. Every other line
//! (comments, blanks, truncated output from older firmware) is skipped.
//!
//! # Attribute lookup
//!
//! Some dumps double the separator in front of attributes of multi-instance
//! objects (`Device.X.1..Status`). [`Store::get_attr`] tries the single form
//! first, then the doubled form, so callers never see the difference.
//!
//! # Example
//!
//! ```
//! use dmviz::core::store::Store;
//!
//! let store = Store::parse(
//!     "Device.IP.Interface.1.Name=\"wan\"\nDevice.IP.Interface.1..Status=Up\n",
//!     "Device",
//! );
//! assert_eq!(store.get_attr("Device.IP.Interface.1.", "Name"), Some("wan"));
//! assert_eq!(store.get_attr("Device.IP.Interface.1", "Status"), Some("Up"));
//! ```

use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a dump.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read data model dump '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid root token '{0}'")]
    InvalidRootToken(String),
}

/// Separator between path components.
pub const SEPARATOR: char = '.';

/// Parsed data-model dump.
///
/// Entries keep the order in which their paths first appeared. A path seen
/// twice keeps its first position and takes the later value.
#[derive(Debug, Clone)]
pub struct Store {
    root_token: String,
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Store {
    /// Parse dump text.
    ///
    /// Lines that do not start with `<root_token>.` and contain `=` are
    /// ignored; parsing never fails.
    pub fn parse(source: &str, root_token: &str) -> Self {
        let mut store = Store {
            root_token: root_token.to_string(),
            entries: Vec::new(),
            index: HashMap::new(),
        };

        let pattern = line_pattern(root_token);
        for line in source.lines() {
            let Some(caps) = pattern.captures(line.trim()) else {
                continue;
            };
            let (Some(path), Some(value)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            store.insert(path.as_str(), value.as_str().trim_matches('"'));
        }

        store
    }

    /// Read and parse a dump file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file cannot be read, and
    /// `StoreError::InvalidRootToken` for an empty token.
    pub fn load(path: &Path, root_token: &str) -> Result<Self, StoreError> {
        if root_token.trim().is_empty() {
            return Err(StoreError::InvalidRootToken(root_token.to_string()));
        }
        let contents = fs::read_to_string(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::parse(&contents, root_token))
    }

    fn insert(&mut self, path: &str, value: &str) {
        match self.index.get(path) {
            Some(&slot) => self.entries[slot].1 = value.to_string(),
            None => {
                self.index.insert(path.to_string(), self.entries.len());
                self.entries.push((path.to_string(), value.to_string()));
            }
        }
    }

    /// The namespace token every path is rooted at.
    pub fn root_token(&self) -> &str {
        &self.root_token
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in dump order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Exact lookup.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.index
            .get(path)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Look up `attribute` under `object_path`.
    ///
    /// Tries `<object>.<attribute>`, then `<object>..<attribute>`. A trailing
    /// separator on `object_path` is ignored.
    pub fn get_attr(&self, object_path: &str, attribute: &str) -> Option<&str> {
        let object = trim_object_path(object_path);
        self.get(&format!("{object}.{attribute}"))
            .or_else(|| self.get(&format!("{object}..{attribute}")))
    }

    /// Instance numbers of a multi-instance collection.
    ///
    /// Returns every `i` for which `<collection>.<i>.<key_attribute>` exists
    /// (either separator form), ascending and without duplicates.
    pub fn instances(&self, collection: &str, key_attribute: &str) -> Vec<u32> {
        let prefix = format!("{}.", trim_object_path(collection));
        let mut ids: Vec<u32> = self
            .entries
            .iter()
            .filter_map(|(path, _)| {
                let rest = path.strip_prefix(&prefix)?;
                let (index, attr) = rest.split_once(SEPARATOR)?;
                let attr = attr.strip_prefix(SEPARATOR).unwrap_or(attr);
                if attr != key_attribute {
                    return None;
                }
                index.parse::<u32>().ok()
            })
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Display form of a path: root token and trailing separators removed.
    ///
    /// Paths outside the root are only trimmed.
    pub fn shorten(&self, path: &str) -> String {
        let path = trim_object_path(path);
        path.strip_prefix(&self.root_token)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .unwrap_or(path)
            .to_string()
    }

    /// Join the root token with a relative object path.
    pub fn object(&self, relative: &str) -> String {
        format!("{}.{}", self.root_token, relative)
    }
}

/// Strip trailing separators and surrounding whitespace from an object path.
pub fn trim_object_path(path: &str) -> &str {
    path.trim().trim_end_matches(SEPARATOR)
}

fn line_pattern(root_token: &str) -> Regex {
    Regex::new(&format!(r"^({}\..+?)=(.*)$", regex::escape(root_token)))
        .expect("escaped root token is a valid pattern")
}
