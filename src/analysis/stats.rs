// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Line counts for a unified diff.

/// Statistics about a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of lines added.
    pub added: usize,
    /// Number of lines removed.
    pub removed: usize,
}

impl DiffStats {
    /// Compact `+added/-removed` form used in summaries and prompts.
    pub fn shorthand(&self) -> String {
        format!("+{}/-{}", self.added, self.removed)
    }
}

/// Count added and removed content lines, ignoring `+++`/`---` file headers.
pub fn summarize_diff(diff: &str) -> DiffStats {
    diff.lines().fold(DiffStats::default(), |mut stats, line| {
        if line.starts_with('+') && !line.starts_with("+++") {
            stats.added += 1;
        } else if line.starts_with('-') && !line.starts_with("---") {
            stats.removed += 1;
        }
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_exclude_file_headers() {
        let diff = "diff --git a/src/lib.rs b/src/lib.rs\n\
                    --- a/src/lib.rs\n\
                    +++ b/src/lib.rs\n\
                    @@ -1,2 +1,4 @@\n\
                    -old line\n\
                    +new line\n\
                    +another\n\
                    +third\n \
                    context\n";
        let stats = summarize_diff(diff);
        assert_eq!(stats, DiffStats { added: 3, removed: 1 });
        assert_eq!(stats.shorthand(), "+3/-1");
    }

    #[test]
    fn test_empty_diff() {
        assert_eq!(summarize_diff(""), DiffStats::default());
    }
}
