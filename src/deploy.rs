//! Deploy-note extraction and commit-range resolution
//!
//! Two narrow text conventions are implemented here and nowhere else:
//!
//! - commit messages reference work items as `[#NNNN]` with a 4-5 digit
//!   number;
//! - PR bodies carry an operational summary on the line after the literal
//!   `**Deploy Note:**` marker.
//!
//! Both are intentionally rigid; do not widen them.

use crate::github::{GitHubClient, Issue, PullRequest};
use crate::http::HttpClient;
use anyhow::Result;
use log::info;
use regex::Regex;
use std::sync::OnceLock;

/// Literal marker that opens a deploy note in a PR body
pub const DEPLOY_NOTE_MARKER: &str = "**Deploy Note:**";

/// Header line of the deploy-notes report
pub const REPORT_HEADER: &str = "Deploy Notes:";

fn issue_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[#(\d{4,5})\]").expect("issue ref pattern is valid"))
}

/// Extract work-item numbers referenced as `[#NNNN]` from commit messages.
///
/// Numbers must be 4 or 5 digits; shorter or longer bracketed numbers are
/// ignored. Duplicates collapse to their first occurrence, so the result
/// preserves the order work items first appear in the range.
pub fn referenced_numbers<'a>(messages: impl IntoIterator<Item = &'a str>) -> Vec<u64> {
    let mut numbers = Vec::new();

    for message in messages {
        for capture in issue_ref_pattern().captures_iter(message) {
            let number: u64 = capture[1].parse().expect("capture is all digits");
            if !numbers.contains(&number) {
                numbers.push(number);
            }
        }
    }

    numbers
}

/// A work item resolved from a commit-range reference
///
/// Normally a pull request; when the referenced number turns out not to be a
/// PR, the resolver degrades to the plain issue record, which simply has no
/// deploy note and takes the "missing" path downstream.
#[derive(Debug, Clone)]
pub enum ChangeRecord {
    Pull(PullRequest),
    Issue(Issue),
}

impl ChangeRecord {
    pub fn number(&self) -> u64 {
        match self {
            ChangeRecord::Pull(pr) => pr.number,
            ChangeRecord::Issue(issue) => issue.number,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChangeRecord::Pull(pr) => &pr.title,
            ChangeRecord::Issue(issue) => &issue.title,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            ChangeRecord::Pull(pr) => pr.body.as_deref(),
            ChangeRecord::Issue(issue) => issue.body.as_deref(),
        }
    }
}

/// Resolve every work item referenced between two refs.
///
/// Fetches the commit comparison, extracts `[#NNNN]` references and looks
/// each one up as a pull request, one at a time in first-occurrence order.
/// A 404 falls back to the issue endpoint; any other failure aborts.
pub fn resolve_commit_range<H: HttpClient>(
    client: &GitHubClient<H>,
    from: &str,
    to: &str,
) -> Result<Vec<ChangeRecord>> {
    let commits = client.compare(from, to)?;
    let numbers = referenced_numbers(commits.iter().map(|c| c.commit.message.as_str()));

    let mut records = Vec::with_capacity(numbers.len());
    for number in numbers {
        match client.get_pull_request(number) {
            Ok(pr) => records.push(ChangeRecord::Pull(pr)),
            Err(err) if crate::errors::is_not_found(&err) => {
                info!("#{number} is not a pull request, falling back to the issue record");
                records.push(ChangeRecord::Issue(client.get_issue(number)?));
            }
            Err(err) => return Err(err),
        }
    }

    Ok(records)
}

/// Render the deploy-note line for one record.
///
/// The note is the text between the marker and the next line break. A missing
/// marker and an empty note are both reported as a missing deploy note; the
/// placeholder names the record so the gap is actionable.
pub fn deploy_note_line(title: &str, body: Option<&str>) -> String {
    let note = body
        .and_then(|b| b.split_once(DEPLOY_NOTE_MARKER))
        .map(|(_, rest)| rest.lines().next().unwrap_or("").trim());

    match note {
        Some(note) if !note.is_empty() => format!("- {note}"),
        _ => format!("Missing deploy note: {title}"),
    }
}

/// Build the full deploy-notes report for a resolved commit range
pub fn deploy_notes_report(records: &[ChangeRecord]) -> String {
    let mut report = String::from(REPORT_HEADER);
    for record in records {
        report.push('\n');
        report.push_str(&deploy_note_line(record.title(), record.body()));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_numbers_basic() {
        let numbers = referenced_numbers(["fix thing [#1234]"]);
        assert_eq!(numbers, vec![1234]);
    }

    #[test]
    fn test_referenced_numbers_digit_bounds() {
        // Too short and too long are not work-item references.
        let numbers = referenced_numbers(["a [#12] b [#123456] c [#12345]"]);
        assert_eq!(numbers, vec![12345]);
    }

    #[test]
    fn test_referenced_numbers_dedup_keeps_first_position() {
        let numbers = referenced_numbers(["[#2000] then [#1000]", "[#2000] again", "[#3000]"]);
        assert_eq!(numbers, vec![2000, 1000, 3000]);
    }

    #[test]
    fn test_referenced_numbers_requires_brackets() {
        let numbers = referenced_numbers(["#1234 without brackets", "[1234] without hash"]);
        assert!(numbers.is_empty());
    }

    #[test]
    fn test_referenced_numbers_multiple_per_message() {
        let numbers = referenced_numbers(["merge [#1111] and [#2222]"]);
        assert_eq!(numbers, vec![1111, 2222]);
    }

    #[test]
    fn test_deploy_note_line_present() {
        let body = "desc\n**Deploy Note:** Rolls out X\nmore text";
        assert_eq!(deploy_note_line("Title", Some(body)), "- Rolls out X");
    }

    #[test]
    fn test_deploy_note_line_missing_marker() {
        assert_eq!(
            deploy_note_line("Add widget", Some("just a description")),
            "Missing deploy note: Add widget"
        );
    }

    #[test]
    fn test_deploy_note_line_no_body() {
        assert_eq!(
            deploy_note_line("Add widget", None),
            "Missing deploy note: Add widget"
        );
    }

    #[test]
    fn test_deploy_note_line_empty_note() {
        // Marker followed directly by a newline counts as missing.
        let body = "desc\n**Deploy Note:**\nmore text";
        assert_eq!(
            deploy_note_line("Add widget", Some(body)),
            "Missing deploy note: Add widget"
        );
    }

    #[test]
    fn test_deploy_note_line_marker_at_end() {
        let body = "desc\n**Deploy Note:**   ";
        assert_eq!(
            deploy_note_line("Add widget", Some(body)),
            "Missing deploy note: Add widget"
        );
    }

    #[test]
    fn test_report_order_and_header() {
        let records = vec![
            ChangeRecord::Pull(pr(1234, "First", Some("**Deploy Note:** Ship A"))),
            ChangeRecord::Issue(issue(2345, "Second")),
        ];

        let report = deploy_notes_report(&records);
        assert_eq!(
            report,
            "Deploy Notes:\n- Ship A\nMissing deploy note: Second"
        );
    }

    fn pr(number: u64, title: &str, body: Option<&str>) -> PullRequest {
        serde_json::from_value(serde_json::json!({
            "number": number,
            "title": title,
            "body": body,
            "html_url": format!("https://github.com/test/repo/pull/{number}"),
            "head": {"ref": format!("{number}_branch")},
            "base": {"ref": "main"}
        }))
        .unwrap()
    }

    fn issue(number: u64, title: &str) -> Issue {
        serde_json::from_value(serde_json::json!({
            "number": number,
            "title": title,
            "body": null,
            "html_url": format!("https://github.com/test/repo/issues/{number}")
        }))
        .unwrap()
    }
}
