//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tagmark_domain::{Bookmark, BookmarkId};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of bookmarks.
    pub fn format_bookmarks(&self, bookmarks: &[Bookmark]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(bookmarks)?),
            OutputFormat::Table => Ok(self.format_bookmarks_table(bookmarks)),
            OutputFormat::Quiet => Ok(format_ids(bookmarks)),
        }
    }

    /// Format a single bookmark.
    ///
    /// JSON output is a bare object rather than a one-element array.
    pub fn format_bookmark(&self, bookmark: &Bookmark) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(bookmark)?),
            _ => self.format_bookmarks(std::slice::from_ref(bookmark)),
        }
    }

    fn format_bookmarks_table(&self, bookmarks: &[Bookmark]) -> String {
        if bookmarks.is_empty() {
            return self.colorize("No bookmarks found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "URL", "Tags", "Expires"]);

        for bookmark in bookmarks {
            let expires = bookmark
                .expiration_date
                .map(|at| at.to_string())
                .unwrap_or_else(|| "-".to_string());
            builder.push_record([
                bookmark.id.to_string(),
                bookmark.title.clone(),
                bookmark.url.clone(),
                bookmark.tags.encode(),
                expires,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Report a created bookmark.
    pub fn bookmark_created(&self, bookmark: &Bookmark) -> Result<String> {
        self.with_status(bookmark, &format!("Bookmark created: {}", bookmark.id))
    }

    /// Report an updated bookmark.
    pub fn bookmark_updated(&self, bookmark: &Bookmark) -> Result<String> {
        self.with_status(bookmark, &format!("Bookmark updated: {}", bookmark.id))
    }

    /// Report a deleted bookmark.
    pub fn bookmark_deleted(&self, id: BookmarkId) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({ "deleted": id }).to_string(),
            OutputFormat::Quiet => id.to_string(),
            OutputFormat::Table => self.success(&format!("Bookmark deleted: {}", id)),
        }
    }

    /// Report the outcome of a classification run.
    pub fn classified(&self, bookmarks: &[Bookmark]) -> Result<String> {
        if self.format != OutputFormat::Table {
            return self.format_bookmarks(bookmarks);
        }
        if bookmarks.is_empty() {
            return Ok(self.warning("Classifier returned no bookmarks"));
        }

        Ok(format!(
            "{}\n{}",
            self.success(&format!("Classified {} bookmark(s)", bookmarks.len())),
            self.format_bookmarks_table(bookmarks)
        ))
    }

    /// Table output gets a status line above the record.
    fn with_status(&self, bookmark: &Bookmark, message: &str) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                self.success(message),
                self.format_bookmarks_table(std::slice::from_ref(bookmark))
            )),
            _ => self.format_bookmark(bookmark),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn format_ids(bookmarks: &[Bookmark]) -> String {
    let ids: Vec<String> = bookmarks.iter().map(|b| b.id.to_string()).collect();
    ids.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagmark_domain::TagSet;

    fn create_test_bookmark() -> Bookmark {
        Bookmark {
            id: BookmarkId::from_value(7),
            title: "Go Docs".to_string(),
            url: "https://go.dev".to_string(),
            tags: TagSet::parse("programming, go"),
            expiration_date: Some(1_900_000_000),
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_bookmarks(&[create_test_bookmark()]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["id"], 7);
        assert_eq!(value[0]["tags"], "go, programming");
        assert_eq!(value[0]["expiration_date"], 1_900_000_000u64);
    }

    #[test]
    fn test_single_bookmark_json_is_object() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_bookmark(&create_test_bookmark()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["url"], "https://go.dev");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let mut second = create_test_bookmark();
        second.id = BookmarkId::from_value(8);

        let output = formatter
            .format_bookmarks(&[create_test_bookmark(), second])
            .unwrap();
        assert_eq!(output, "7\n8");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_bookmarks(&[create_test_bookmark()]).unwrap();
        assert!(output.contains("Title"));
        assert!(output.contains("https://go.dev"));
        assert!(output.contains("go, programming"));
    }

    #[test]
    fn test_empty_bookmarks() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_bookmarks(&[]).unwrap();
        assert!(output.contains("No bookmarks found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }

    #[test]
    fn test_deleted_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.bookmark_deleted(BookmarkId::from_value(3));
        assert_eq!(output, r#"{"deleted":3}"#);
    }
}
