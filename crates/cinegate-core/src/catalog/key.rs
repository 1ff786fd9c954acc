//! Cache key layout and the per-kind TTL table.

use std::fmt;
use std::time::Duration;

/// Lists change with what is trending; minutes-scale freshness.
const LIST_TTL: Duration = Duration::from_secs(30 * 60);
/// Details rarely change once published.
const DETAILS_TTL: Duration = Duration::from_secs(60 * 60);

const KEY_PREFIX: &str = "catalog";

/// Logical read shape. Partitions both cache keys and TTL policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Popular,
    NowPlaying,
    Search,
    Details,
}

impl ResourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Popular => "popular",
            ResourceKind::NowPlaying => "now-playing",
            ResourceKind::Search => "search",
            ResourceKind::Details => "details",
        }
    }

    /// Fixed expiry for entries of this kind.
    pub const fn ttl(self) -> Duration {
        match self {
            ResourceKind::Popular | ResourceKind::NowPlaying | ResourceKind::Search => LIST_TTL,
            ResourceKind::Details => DETAILS_TTL,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(kind, identifier-or-query, language)`.
///
/// Keys differing only in language are distinct; there is no fallback between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: ResourceKind,
    param: Option<String>,
    language: String,
}

impl CacheKey {
    pub fn popular(language: impl Into<String>) -> Self {
        Self::new(ResourceKind::Popular, None, language)
    }

    pub fn now_playing(language: impl Into<String>) -> Self {
        Self::new(ResourceKind::NowPlaying, None, language)
    }

    pub fn search(query: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(ResourceKind::Search, Some(query.into()), language)
    }

    pub fn details(id: u64, language: impl Into<String>) -> Self {
        Self::new(ResourceKind::Details, Some(id.to_string()), language)
    }

    fn new(kind: ResourceKind, param: Option<String>, language: impl Into<String>) -> Self {
        Self {
            kind,
            param,
            language: language.into(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn ttl(&self) -> Duration {
        self.kind.ttl()
    }
}

/// Escape the segment separator so free-text queries cannot collide with other keys.
fn escape(segment: &str) -> String {
    segment.replace('%', "%25").replace(':', "%3A")
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KEY_PREFIX}:{}:{}", self.kind, escape(&self.language))?;
        if let Some(param) = &self.param {
            write!(f, ":{}", escape(param))?;
        }
        Ok(())
    }
}
