/// Credentials file loading.
///
/// The file is INI with one section per API client. Keys are lowercased on
/// load so `Client_Token` and `client_token` are the same key. Values are
/// taken literally: no quote stripping, no escape processing.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

use super::errors::ConfigError;

/// Maximum number of section names suggested when a section is missing.
const MAX_CANDIDATES: usize = 5;

/// Key/value pairs of one section.
pub type Section = BTreeMap<String, String>;

/// A parsed credentials file.
#[derive(Debug, Clone, Default)]
pub struct Edgerc {
    sections: BTreeMap<String, Section>,
}

impl Edgerc {
    /// Read and parse the credentials file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` on I/O failure and `ConfigError::Parse`
    /// on malformed INI.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse credentials file contents.
    ///
    /// # Errors
    ///
    /// Returns the parser's message on malformed INI.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(contents, opt).map_err(|e| e.to_string())?;

        let mut sections: BTreeMap<String, Section> = BTreeMap::new();
        for (name, properties) in &ini {
            // Keys before the first header have no section and are ignored.
            let Some(name) = name else { continue };
            let section = sections.entry(name.to_owned()).or_default();
            for (key, value) in properties.iter() {
                section.insert(key.trim().to_lowercase(), value.trim().to_owned());
            }
        }
        Ok(Self { sections })
    }

    /// Look up a section by exact name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// All section names, sorted.
    #[must_use]
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Rank existing section names by fuzzy similarity to `requested`.
///
/// Falls back to every section (in file order) when nothing matches, so the
/// user always sees what is available.
#[must_use]
pub fn similar_sections<'a>(
    requested: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let available: Vec<&str> = available.into_iter().collect();

    let pattern = Pattern::parse(requested, CaseMatching::Ignore, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    let mut scored: Vec<(&str, u32)> = available
        .iter()
        .filter_map(|name| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(name, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| (*name, score))
        })
        .collect();

    if scored.is_empty() {
        return available
            .into_iter()
            .take(MAX_CANDIDATES)
            .map(str::to_owned)
            .collect();
    }

    // Sort by score descending.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(MAX_CANDIDATES)
        .map(|(name, _)| name.to_owned())
        .collect()
}
