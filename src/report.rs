//! Plain-text views over a parsed diff, for terminal display.

use crate::diff::split::{QueryError, SplitDiff};

/// One line per section in document order: kind, span and a short summary.
pub fn outline(diff: &SplitDiff<'_>) -> String {
    let mut entries: Vec<(usize, String)> = Vec::new();

    for commit in &diff.commits {
        let span = commit.span();
        entries.push((
            span.start,
            format!(
                "commit [{}..{}) {}",
                span.start,
                span.end,
                commit.commit_hash().unwrap_or("?")
            ),
        ));
    }
    for header in &diff.headers {
        let span = header.span();
        entries.push((
            span.start,
            format!(
                "file [{}..{}) {}",
                span.start,
                span.end,
                header.path().unwrap_or_else(|| header.first_line())
            ),
        ));
    }
    for hunk in &diff.hunks {
        let span = hunk.span();
        entries.push((
            span.start,
            format!(
                "hunk [{}..{}) {}",
                span.start,
                span.end,
                hunk.header().text().trim_end()
            ),
        ));
    }

    entries.sort_by_key(|&(start, _)| start);
    let lines: Vec<String> = entries.into_iter().map(|(_, line)| line).collect();
    lines.join("\n")
}

/// Describe what sits at `offset`: the owning commit (when the input is a
/// log), the file, the hunk, and the target-side line the hunk applies to.
///
/// # Errors
///
/// [`QueryError::OrphanHunk`] when the hunk at `offset` has no file header
/// anywhere before it.
pub fn locate(diff: &SplitDiff<'_>, offset: usize) -> Result<String, QueryError> {
    let Some((header, hunk)) = diff.header_and_hunk_at(offset)? else {
        return Ok(format!("no hunk at offset {offset}"));
    };

    let mut lines = Vec::new();
    if let Some(commit) = diff.commit_for_hunk(hunk) {
        lines.push(format!("commit {}", commit.commit_hash().unwrap_or("?")));
    }
    lines.push(format!(
        "file {}",
        header.path().unwrap_or_else(|| header.first_line())
    ));

    let hunk_header = hunk.header();
    lines.push(format!("hunk {}", hunk_header.text().trim_end()));

    // Combined hunks fail the strict parse; the tolerant reading still
    // recovers the target-side start.
    let target = match hunk_header.parse() {
        Ok(ranges) => Some(ranges.new_start),
        Err(_) => hunk_header.new_start(),
    };
    if let Some(line) = target {
        lines.push(format!("line {line}"));
    }

    Ok(lines.join("\n"))
}

/// Each file with the number of hunks it carries.
pub fn files(diff: &SplitDiff<'_>) -> String {
    let lines: Vec<String> = diff
        .headers
        .iter()
        .map(|header| {
            format!(
                "{}: {} hunks",
                header.path().unwrap_or_else(|| header.first_line()),
                diff.hunks_for_header(header).count()
            )
        })
        .collect();
    lines.join("\n")
}
