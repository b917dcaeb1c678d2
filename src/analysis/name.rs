use std::fmt;

use serde::{Deserialize, Deserializer};

pub const SEGMENT_DELIMITER: char = '.';

/// A dot-delimited module name with its segment boundaries parsed once.
///
/// Capping to a depth is a prefix slice of the full name, so it never
/// re-splits or allocates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleName {
    full: String,
    // Byte offset where each segment ends (exclusive).
    segment_ends: Vec<usize>,
}

impl ModuleName {
    pub fn parse(full: impl Into<String>) -> Self {
        let full = full.into();
        let mut segment_ends = full
            .match_indices(SEGMENT_DELIMITER)
            .map(|(offset, _)| offset)
            .collect::<Vec<_>>();
        segment_ends.push(full.len());

        Self { full, segment_ends }
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    pub fn segment_count(&self) -> usize {
        self.segment_ends.len()
    }

    /// First `min(depth, segment_count)` segments joined by the delimiter.
    pub fn capped(&self, depth: usize) -> &str {
        if depth == 0 {
            return "";
        }

        let kept = depth.min(self.segment_ends.len());
        &self.full[..self.segment_ends[kept - 1]]
    }

    pub fn cap(&self, depth: usize) -> Self {
        if depth == 0 {
            return Self::parse(String::new());
        }
        if depth >= self.segment_count() {
            return self.clone();
        }

        Self {
            full: self.capped(depth).to_owned(),
            segment_ends: self.segment_ends[..depth].to_vec(),
        }
    }
}

/// Caps a name that was not parsed ahead of time, e.g. an edge endpoint.
pub fn cap_str(name: &str, depth: usize) -> &str {
    if depth == 0 {
        return "";
    }

    match name.match_indices(SEGMENT_DELIMITER).nth(depth - 1) {
        Some((offset, _)) => &name[..offset],
        None => name,
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl<'de> Deserialize<'de> for ModuleName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_keeps_leading_segments() {
        let name = ModuleName::parse("scrapy.core.engine");
        assert_eq!(name.segment_count(), 3);
        assert_eq!(name.capped(1), "scrapy");
        assert_eq!(name.capped(2), "scrapy.core");
        assert_eq!(name.capped(3), "scrapy.core.engine");
    }

    #[test]
    fn capping_beyond_depth_is_a_no_op() {
        let name = ModuleName::parse("a.b");
        assert_eq!(name.capped(7), "a.b");
        assert_eq!(name.cap(7), name);
    }

    #[test]
    fn zero_depth_collapses_to_empty_name() {
        assert_eq!(ModuleName::parse("a.b.c").capped(0), "");
        assert_eq!(cap_str("a.b.c", 0), "");
    }

    #[test]
    fn zero_depth_cap_can_be_capped_again() {
        let collapsed = ModuleName::parse("a.b.c").cap(0);
        assert_eq!(collapsed, ModuleName::parse(""));
        assert_eq!(collapsed.segment_count(), 1);
        assert_eq!(collapsed.capped(1), "");
        assert_eq!(collapsed.cap(3).as_str(), "");
    }

    #[test]
    fn cap_matches_segment_count_rule() {
        for raw in ["a", "a.b", "a.b.c.d", "a..b", ".lead", ""] {
            let name = ModuleName::parse(raw);
            let segments = raw.split(SEGMENT_DELIMITER).collect::<Vec<_>>();
            for depth in 1..6 {
                let expected = segments[..depth.min(segments.len())].join(".");
                assert_eq!(name.capped(depth), expected, "{raw} at depth {depth}");
                assert_eq!(cap_str(raw, depth), expected, "{raw} at depth {depth}");
                assert_eq!(name.cap(depth).as_str(), expected);
                assert_eq!(
                    name.cap(depth).segment_count(),
                    depth.min(segments.len())
                );
            }
        }
    }
}
