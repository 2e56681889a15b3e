use std::fmt;

use url::Url;

/// Week number a lesson page belongs to, parsed from the page location.
///
/// The location path is scanned for a `week<digits>` token; pages without one
/// fall back to week 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Week(u32);

impl Week {
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the underlying week number.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.0
    }

    /// Extracts the week from a page location, defaulting to week 1.
    #[must_use]
    pub fn from_location(location: &Url) -> Self {
        Self::from_path(location.path()).unwrap_or_default()
    }

    /// Scans a path for the first `week` token followed by digits.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        for (pos, _) in path.match_indices("week") {
            let rest = &path[pos + 4..];
            let digits: &str = rest
                .split(|c: char| !c.is_ascii_digit())
                .next()
                .unwrap_or("");
            if digits.is_empty() {
                continue;
            }
            if let Ok(number) = digits.parse::<u32>() {
                return Some(Self(number));
            }
        }
        None
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage namespace for one week of one module: `{prefix}_week{N}_...`.
///
/// Every persisted record key is built through this type so instances never
/// collide across weeks or modules sharing a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
    week: Week,
}

impl Namespace {
    #[must_use]
    pub fn new(prefix: impl Into<String>, week: Week) -> Self {
        Self {
            prefix: prefix.into(),
            week,
        }
    }

    /// Builds the namespace for a page location.
    #[must_use]
    pub fn from_location(prefix: impl Into<String>, location: &Url) -> Self {
        Self::new(prefix, Week::from_location(location))
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn week(&self) -> Week {
        self.week
    }

    /// Storage key for one widget instance.
    #[must_use]
    pub fn key(&self, instance_id: &str) -> String {
        format!("{}_week{}_{}", self.prefix, self.week, instance_id)
    }

    /// Key of the single progress summary record.
    #[must_use]
    pub fn progress_key(&self) -> String {
        self.key("progress")
    }

    /// Key of the page-global task list record.
    #[must_use]
    pub fn tasks_key(&self) -> String {
        self.key("tasks")
    }

    /// Prefix that export and reset match keys against.
    ///
    /// Deliberately has no trailing separator: week 1 of a module with double
    /// digit weeks also matches week 10+. Existing stores rely on this
    /// matching, so it is kept as-is.
    #[must_use]
    pub fn key_prefix(&self) -> String {
        format!("{}_week{}", self.prefix, self.week)
    }

    /// Download name for the exported progress document.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        format!("{}_progress.json", self.key_prefix())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_prefix())
    }
}
