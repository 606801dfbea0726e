//! Markdown rendering of a change summary
//!
//! An entry looks like:
//!
//! ~~~text
//! ## 2025-01-31 17:05 — App (main)
//!
//! - Repo: app
//! - Range: 0123456..89abcde
//!
//! ### Commits
//! - 89abcde Add export button
//!
//! ### Files
//! - M src/export.rs
//!
//! ### Stats
//! ```
//! 1 file changed, 12 insertions(+)
//! ```
//! ~~~
//!
//! Sections without content are left out, and the block always ends with
//! exactly one newline so consecutive entries stack cleanly in a note.

use chrono::NaiveDateTime;
use std::fmt;

use crate::config::Config;
use crate::models::{ChangeSummary, CommitId};

/// Header fields of an entry
#[derive(Debug, Clone)]
pub struct EntryHeader<'a> {
    pub timestamp: NaiveDateTime,
    /// Repository directory name
    pub repo_name: &'a str,
    /// Display label; falls back to `repo_name`
    pub project_name: Option<&'a str>,
    pub branch: &'a str,
    pub start: &'a CommitId,
    pub end: &'a CommitId,
}

/// List bounds for the Commits and Files sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_commits: usize,
    pub max_files: usize,
}

impl From<&Config> for Limits {
    fn from(config: &Config) -> Self {
        Self {
            max_commits: config.max_commits,
            max_files: config.max_files,
        }
    }
}

/// Split `items` into the first `bound` entries and the count left over
pub fn truncate_list<T>(items: &[T], bound: usize) -> (&[T], usize) {
    let shown = &items[..items.len().min(bound)];
    (shown, items.len() - shown.len())
}

/// Render one note entry
pub fn format_entry(header: &EntryHeader<'_>, summary: &ChangeSummary, limits: Limits) -> String {
    let title = header
        .project_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(header.repo_name);

    let mut lines: Vec<String> = vec![
        format!(
            "## {} — {} ({})",
            header.timestamp.format("%Y-%m-%d %H:%M"),
            title,
            header.branch
        ),
        String::new(),
        format!("- Repo: {}", header.repo_name),
        format!("- Range: {}..{}", header.start.short(), header.end.short()),
        String::new(),
    ];

    push_list(&mut lines, "Commits", &summary.commits, limits.max_commits);
    push_list(&mut lines, "Files", &summary.files, limits.max_files);

    if let Some(diffstat) = summary.diffstat.as_deref().filter(|s| !s.is_empty()) {
        lines.push("### Stats".to_string());
        lines.push("```".to_string());
        lines.push(diffstat.to_string());
        lines.push("```".to_string());
        lines.push(String::new());
    }

    if let Some(working_tree) = summary.working_tree.as_ref().filter(|wt| !wt.is_empty()) {
        lines.push("### Working tree (uncommitted)".to_string());
        lines.extend(working_tree.iter().map(|line| format!("- {}", line)));
        lines.push(String::new());
    }

    let mut entry = lines.join("\n").trim_end().to_string();
    entry.push('\n');
    entry
}

fn push_list<T: fmt::Display>(lines: &mut Vec<String>, title: &str, items: &[T], bound: usize) {
    if items.is_empty() {
        return;
    }

    lines.push(format!("### {}", title));
    let (shown, omitted) = truncate_list(items, bound);
    lines.extend(shown.iter().map(|item| format!("- {}", item)));
    if omitted > 0 {
        lines.push(format!("- …and {} more", omitted));
    }
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileChange;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 31)
            .unwrap()
            .and_hms_opt(17, 5, 42)
            .unwrap()
    }

    fn render(summary: &ChangeSummary, limits: Limits, project: Option<&str>) -> String {
        let start = CommitId::new("0123456789abcdef");
        let end = CommitId::new("89abcdef01234567");
        let header = EntryHeader {
            timestamp: timestamp(),
            repo_name: "app",
            project_name: project,
            branch: "main",
            start: &start,
            end: &end,
        };
        format_entry(&header, summary, limits)
    }

    fn defaults() -> Limits {
        Limits::from(&Config::default())
    }

    fn section<'a>(entry: &'a str, title: &str) -> Vec<&'a str> {
        let heading = format!("### {}", title);
        entry
            .lines()
            .skip_while(|line| *line != heading)
            .skip(1)
            .take_while(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn test_truncate_list() {
        let items = [1, 2, 3];
        assert_eq!(truncate_list(&items, 5), (&items[..], 0));
        assert_eq!(truncate_list(&items, 3), (&items[..], 0));
        assert_eq!(truncate_list(&items, 2), (&items[..2], 1));
        assert_eq!(truncate_list(&items, 0), (&items[..0], 3));

        let empty: [u8; 0] = [];
        assert_eq!(truncate_list(&empty, 0), (&empty[..], 0));
    }

    #[test]
    fn test_header() {
        let summary = ChangeSummary {
            commits: vec!["89abcde Add export".to_string()],
            ..Default::default()
        };

        let entry = render(&summary, defaults(), None);
        let mut lines = entry.lines();
        assert_eq!(lines.next(), Some("## 2025-01-31 17:05 — app (main)"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("- Repo: app"));
        assert_eq!(lines.next(), Some("- Range: 0123456..89abcde"));

        let entry = render(&summary, defaults(), Some("My App"));
        assert!(entry.starts_with("## 2025-01-31 17:05 — My App (main)\n"));
        assert!(entry.contains("- Repo: app\n"));
    }

    #[test]
    fn test_full_entry() {
        let summary = ChangeSummary {
            commits: vec![
                "1111111 First".to_string(),
                "2222222 Second".to_string(),
                "3333333 Third".to_string(),
            ],
            files: vec![
                FileChange::new("M", "src/lib.rs"),
                FileChange::moved("R100", "old.rs", "new.rs"),
            ],
            diffstat: Some("2 files changed, 10 insertions(+), 3 deletions(-)".to_string()),
            working_tree: None,
        };

        let entry = render(&summary, defaults(), None);
        assert_eq!(
            entry,
            "## 2025-01-31 17:05 — app (main)\n\
             \n\
             - Repo: app\n\
             - Range: 0123456..89abcde\n\
             \n\
             ### Commits\n\
             - 1111111 First\n\
             - 2222222 Second\n\
             - 3333333 Third\n\
             \n\
             ### Files\n\
             - M src/lib.rs\n\
             - R100 old.rs -> new.rs\n\
             \n\
             ### Stats\n\
             ```\n\
             2 files changed, 10 insertions(+), 3 deletions(-)\n\
             ```\n"
        );
        assert!(!entry.contains("Working tree"));
    }

    #[test]
    fn test_commit_overflow() {
        let commits: Vec<String> = (0..25).map(|i| format!("{:07} Commit {}", i, i)).collect();
        let summary = ChangeSummary {
            commits,
            ..Default::default()
        };

        let entry = render(&summary, defaults(), None);
        let lines = section(&entry, "Commits");
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], "- 0000000 Commit 0");
        assert_eq!(lines[19], "- 0000019 Commit 19");
        assert_eq!(lines[20], "- …and 5 more");
    }

    #[test]
    fn test_file_overflow() {
        let summary = ChangeSummary {
            files: vec![FileChange::new("M", "a.rs"), FileChange::new("A", "b.rs")],
            ..Default::default()
        };
        let limits = Limits {
            max_commits: 20,
            max_files: 1,
        };

        let entry = render(&summary, limits, None);
        assert_eq!(section(&entry, "Files"), vec!["- M a.rs", "- …and 1 more"]);
        assert!(!entry.contains("### Commits"));
    }

    #[test]
    fn test_zero_bound_shows_only_overflow() {
        let summary = ChangeSummary {
            commits: vec!["1111111 One".to_string(), "2222222 Two".to_string()],
            ..Default::default()
        };
        let limits = Limits {
            max_commits: 0,
            max_files: 50,
        };

        let entry = render(&summary, limits, None);
        assert_eq!(section(&entry, "Commits"), vec!["- …and 2 more"]);
    }

    #[test]
    fn test_working_tree_fallback() {
        let summary = ChangeSummary {
            working_tree: Some(vec![" M README.md".to_string(), "?? notes.txt".to_string()]),
            ..Default::default()
        };

        let entry = render(&summary, defaults(), None);
        assert_eq!(
            section(&entry, "Working tree (uncommitted)"),
            vec!["-  M README.md", "- ?? notes.txt"]
        );
        assert!(!entry.contains("### Commits"));
        assert!(!entry.contains("### Files"));
        assert!(!entry.contains("### Stats"));
    }

    #[test]
    fn test_empty_diffstat_is_omitted() {
        let summary = ChangeSummary {
            commits: vec!["1111111 One".to_string()],
            diffstat: Some(String::new()),
            ..Default::default()
        };

        let entry = render(&summary, defaults(), None);
        assert!(!entry.contains("### Stats"));
    }

    #[test]
    fn test_single_trailing_newline() {
        let variants = [
            ChangeSummary {
                commits: vec!["1111111 One".to_string()],
                ..Default::default()
            },
            ChangeSummary {
                files: vec![FileChange::new("D", "gone.rs")],
                diffstat: Some("1 file changed, 4 deletions(-)\n".to_string()),
                ..Default::default()
            },
            ChangeSummary {
                working_tree: Some(vec!["?? x".to_string()]),
                ..Default::default()
            },
        ];

        for summary in &variants {
            let entry = render(summary, defaults(), None);
            assert!(entry.ends_with('\n'));
            assert!(!entry.ends_with("\n\n"), "double newline in {:?}", entry);
        }
    }
}
