/// Separator between the fields of one line of tag listing output
pub const TAG_FIELD_SEPARATOR: char = '|';

/// Placeholder for a date or subject git did not report
pub const MISSING_FIELD: &str = "N/A";

/// One tag as reported by the tag listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Full tag name, preserved exactly for later deletion
    pub name: String,
    /// Creation date as `YYYY-MM-DD`, or `N/A`
    pub created_date: String,
    /// Subject line of the tag message or tagged commit, or `N/A`
    pub subject: String,
}

fn field_or_missing(field: Option<&str>) -> String {
    match field.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => MISSING_FIELD.to_string(),
    }
}

impl TagRecord {
    pub fn new(
        name: impl Into<String>,
        created_date: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        TagRecord {
            name: name.into(),
            created_date: created_date.into(),
            subject: subject.into(),
        }
    }

    /// Parse one `name|date|subject` line.
    ///
    /// Splits into at most three fields, so a subject may itself contain the
    /// separator. Missing or blank date and subject become `N/A`. Returns
    /// `None` for a line without a tag name.
    pub fn parse_line(line: &str) -> Option<TagRecord> {
        let mut fields = line.splitn(3, TAG_FIELD_SEPARATOR);

        let name = fields.next()?.trim();
        if name.is_empty() {
            return None;
        }

        Some(TagRecord {
            name: name.to_string(),
            created_date: field_or_missing(fields.next()),
            subject: field_or_missing(fields.next()),
        })
    }

    /// Subject cut to at most `width` characters, for table display only
    pub fn display_subject(&self, width: usize) -> String {
        self.subject.chars().take(width).collect()
    }
}
