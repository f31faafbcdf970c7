//! Partitioned document data types.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Broad document format, used to route a document to a partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Portable Document Format.
    Pdf,
    /// Word document.
    Docx,
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// HTML page.
    Html,
    /// Excel workbook.
    Xlsx,
    /// Scanned image (PNG, JPEG, TIFF, ...).
    Image,
    /// Plain text.
    Text,
    /// Anything else.
    Unknown,
}

impl DocumentKind {
    /// Detects the kind from the filename extension, falling back to the
    /// declared MIME type.
    #[must_use]
    pub fn detect(filename: &str, content_type: Option<&str>) -> Self {
        let by_extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unknown, Self::from_extension);

        if by_extension != Self::Unknown {
            return by_extension;
        }

        content_type.map_or(Self::Unknown, Self::from_mime)
    }

    fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" | "doc" => Self::Docx,
            "csv" => Self::Csv,
            "tsv" | "tab" => Self::Tsv,
            "html" | "htm" => Self::Html,
            "xlsx" | "xls" => Self::Xlsx,
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "heic" => Self::Image,
            "txt" | "text" => Self::Text,
            _ => Self::Unknown,
        }
    }

    fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Self::Pdf,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/msword" => Self::Docx,
            "text/csv" | "application/csv" => Self::Csv,
            "text/tab-separated-values" => Self::Tsv,
            "text/html" => Self::Html,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel" => Self::Xlsx,
            "text/plain" => Self::Text,
            m if m.starts_with("image/") => Self::Image,
            _ => Self::Unknown,
        }
    }

    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Html => "html",
            Self::Xlsx => "xlsx",
            Self::Image => "image",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded source document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Original filename.
    pub filename: String,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Bytes,
}

impl SourceDocument {
    /// Creates a new source document.
    #[must_use]
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    /// Detected document kind.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::detect(&self.filename, self.content_type.as_deref())
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A table recovered from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows. Rows may be shorter or longer than `headers`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from headers and rows.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Returns a trimmed, non-blank cell value.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Element category assigned by the partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// A table.
    Table,
    /// A heading.
    Title,
    /// Running text.
    NarrativeText,
    /// Bullet or numbered list entry.
    ListItem,
    /// Page header.
    Header,
    /// Page footer.
    Footer,
    /// Anything else.
    Other,
}

impl ElementKind {
    /// Maps a partitioner type name (e.g. `"NarrativeText"`) to a kind.
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Table" => Self::Table,
            "Title" => Self::Title,
            "NarrativeText" => Self::NarrativeText,
            "ListItem" => Self::ListItem,
            "Header" => Self::Header,
            "Footer" => Self::Footer,
            _ => Self::Other,
        }
    }
}

/// A typed piece of a partitioned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element category.
    pub kind: ElementKind,
    /// Plain text content.
    pub text: String,
    /// Parsed table structure. `None` for table elements whose markup could
    /// not be read.
    pub table: Option<Table>,
    /// 1-based page number when known.
    pub page_number: Option<u32>,
}

impl Element {
    /// Creates a table element.
    #[must_use]
    pub fn table(text: impl Into<String>, table: Option<Table>, page_number: Option<u32>) -> Self {
        Self {
            kind: ElementKind::Table,
            text: text.into(),
            table,
            page_number,
        }
    }

    /// Creates a non-table element.
    #[must_use]
    pub fn text(kind: ElementKind, text: impl Into<String>, page_number: Option<u32>) -> Self {
        Self {
            kind,
            text: text.into(),
            table: None,
            page_number,
        }
    }

    /// Returns `true` for table elements.
    #[must_use]
    pub fn is_table(&self) -> bool {
        self.kind == ElementKind::Table
    }
}
