//! Pure formatting functions for UI output.
//!
//! Table and report builders return strings so they can be tested; the
//! `display_*` functions print them.

use console::style;

use crate::domain::{DeletionPhase, DeletionReport, DeletionScope, TagRecord};

const RULE_WIDTH: usize = 60;
const TABLE_PADDING: usize = 20;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning before a destructive step.
pub fn display_warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Print a section heading such as "PUSH CHANGES TO REMOTE".
pub fn display_heading(title: &str) {
    println!("\n{}", style(title).bold());
    println!("{}", "-".repeat(40));
}

pub fn display_banner() {
    println!("{}", style("Git Manager").bold());
    println!("Interactive mode - no command line arguments needed!");
}

pub fn display_goodbye() {
    println!("\nGoodbye!");
}

/// Main menu text.
pub fn format_menu() -> String {
    let rule = "=".repeat(RULE_WIDTH);
    [
        String::new(),
        rule.clone(),
        "GIT MANAGER".to_string(),
        rule.clone(),
        "1. Push changes to remote".to_string(),
        "2. List recent tags".to_string(),
        "3. Delete tags (local and remote)".to_string(),
        "4. Exit".to_string(),
        rule,
    ]
    .join("\n")
}

pub fn display_menu() {
    println!("{}", format_menu());
}

/// Fixed-width table of tags, numbered from 1.
///
/// Subjects are cut to `subject_width` characters; names are padded to
/// `name_width` but never shortened.
pub fn format_tag_table(tags: &[TagRecord], name_width: usize, subject_width: usize) -> String {
    let width = name_width + subject_width + TABLE_PADDING;
    let rule = "-".repeat(width);

    let mut lines = vec![
        format!("Last {} tags:", tags.len()),
        rule.clone(),
        format!(
            "{:<3} {:<name_width$} {:<12} {:<subject_width$}",
            "#", "Tag", "Date", "Description"
        ),
        rule.clone(),
    ];

    for (i, tag) in tags.iter().enumerate() {
        let line = format!(
            "{:<3} {:<name_width$} {:<12} {:<subject_width$}",
            i + 1,
            tag.name,
            tag.created_date,
            tag.display_subject(subject_width)
        );
        lines.push(line.trim_end().to_string());
    }

    lines.push(rule);
    lines.join("\n")
}

/// Print the tag table, or a notice when there are no tags.
pub fn display_tag_table(tags: &[TagRecord], name_width: usize, subject_width: usize) {
    if tags.is_empty() {
        display_status("No tags found in repository");
        return;
    }
    println!("\n{}", format_tag_table(tags, name_width, subject_width));
}

/// The exact list of tags about to be deleted and where.
pub fn format_deletion_preview(tags: &[String], scope: DeletionScope) -> String {
    let mut lines = vec![format!("This will delete {} tags:", tags.len())];
    for (i, tag) in tags.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, tag));
    }
    lines.push(String::new());
    lines.push(format!("Tags will be deleted: {}", scope.describe()));
    lines.join("\n")
}

pub fn display_deletion_preview(tags: &[String], scope: DeletionScope) {
    println!();
    display_warning(&format_deletion_preview(tags, scope));
}

/// One line per tag and phase, in the order deletions ran.
pub fn format_deletion_report(report: &DeletionReport) -> String {
    report
        .outcomes
        .iter()
        .map(|outcome| {
            let location = match outcome.phase {
                DeletionPhase::Local => "local",
                DeletionPhase::Remote => "remote",
            };
            match &outcome.error {
                None => format!("  ✓ Deleted {} tag: {}", location, outcome.tag),
                Some(error) => format!(
                    "  ✗ Failed to delete {} tag {}: {}",
                    location, outcome.tag, error
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn display_deletion_report(report: &DeletionReport) {
    if !report.outcomes.is_empty() {
        println!("{}", format_deletion_report(report));
    }
}
