//! In-process partitioning for delimited text and HTML documents.

use bytes::Bytes;
use sentinel_core::document::{
    DocumentKind, DocumentPartitioner, Element, PartitionError, SourceDocument, Table,
};
use tracing::debug;

use crate::html;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses CSV, TSV and HTML documents without leaving the process.
///
/// Every other format is rejected with `PartitionError::UnsupportedFormat`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPartitioner;

impl LocalPartitioner {
    /// Returns `true` for formats this partitioner can read.
    #[must_use]
    pub const fn supports(kind: DocumentKind) -> bool {
        matches!(kind, DocumentKind::Csv | DocumentKind::Tsv | DocumentKind::Html)
    }

    /// Synchronous partitioning, run on the blocking pool by
    /// [`DocumentPartitioner::partition`].
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for other formats and `Malformed` for
    /// unreadable delimited text.
    pub fn partition_bytes(kind: DocumentKind, bytes: &[u8]) -> Result<Vec<Element>, PartitionError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match kind {
            DocumentKind::Csv => read_delimited(bytes, b','),
            DocumentKind::Tsv => read_delimited(bytes, b'\t'),
            DocumentKind::Html => Ok(read_html(bytes)),
            other => Err(PartitionError::UnsupportedFormat(other)),
        }
    }
}

impl DocumentPartitioner for LocalPartitioner {
    async fn partition(&self, document: &SourceDocument) -> Result<Vec<Element>, PartitionError> {
        let kind = document.kind();
        if !Self::supports(kind) {
            return Err(PartitionError::UnsupportedFormat(kind));
        }

        let bytes: Bytes = document.bytes.clone();
        let elements = tokio::task::spawn_blocking(move || Self::partition_bytes(kind, &bytes))
            .await
            .map_err(|e| PartitionError::malformed(format!("parser task failed: {e}")))??;

        debug!(
            filename = %document.filename,
            kind = %kind,
            elements = elements.len(),
            "Partitioned document locally"
        );
        Ok(elements)
    }
}

fn read_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Element>, PartitionError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PartitionError::malformed(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PartitionError::malformed(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let text = String::from_utf8_lossy(bytes).trim().to_string();
    Ok(vec![Element::table(text, Some(Table::new(headers, rows)), None)])
}

fn read_html(bytes: &[u8]) -> Vec<Element> {
    let markup = String::from_utf8_lossy(bytes);
    html::read_tables(&markup)
        .into_iter()
        .map(|table| {
            let text = std::iter::once(&table.headers)
                .chain(&table.rows)
                .map(|row| row.join(" "))
                .collect::<Vec<_>>()
                .join("\n");
            Element::table(text, Some(table), None)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn doc(filename: &str, bytes: &'static [u8]) -> SourceDocument {
        SourceDocument::new(filename, None, Bytes::from_static(bytes))
    }

    #[tokio::test]
    async fn test_csv_with_bom_and_ragged_rows() {
        let document = doc(
            "budget.csv",
            b"\xEF\xBB\xBFWBS Code,Description,Unit Cost,Quantity\n1,\"Design, phase 1\",\"1,200\",2\n2,Build\n",
        );

        let elements = LocalPartitioner.partition(&document).await.unwrap();

        assert_eq!(elements.len(), 1);
        let table = elements[0].table.as_ref().unwrap();
        assert_eq!(table.headers[0], "WBS Code");
        assert_eq!(table.rows[0], vec!["1", "Design, phase 1", "1,200", "2"]);
        assert_eq!(table.rows[1], vec!["2", "Build"]);
        assert_eq!(table.cell(1, 2), None);
    }

    #[tokio::test]
    async fn test_tsv() {
        let document = doc("budget.tsv", b"WBS\tQty\n1.1\t3\n");

        let elements = LocalPartitioner.partition(&document).await.unwrap();

        let table = elements[0].table.as_ref().unwrap();
        assert_eq!(table.headers, vec!["WBS", "Qty"]);
        assert_eq!(table.rows, vec![vec!["1.1".to_string(), "3".to_string()]]);
    }

    #[tokio::test]
    async fn test_html_yields_one_element_per_table() {
        let document = doc(
            "budget.html",
            b"<html><body><h1>Budget</h1>\
              <table><tr><th>WBS</th></tr><tr><td>1</td></tr></table>\
              <table><tr><th>Other</th></tr></table></body></html>",
        );

        let elements = LocalPartitioner.partition(&document).await.unwrap();

        assert_eq!(elements.len(), 2);
        assert!(elements.iter().all(Element::is_table));
        assert_eq!(elements[0].text, "WBS\n1");
    }

    #[tokio::test]
    async fn test_blank_csv_has_no_elements() {
        let elements = LocalPartitioner.partition(&doc("blank.csv", b"\n")).await.unwrap();
        assert!(elements.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_utf8_csv_is_malformed() {
        let err = LocalPartitioner
            .partition(&doc("bad.csv", b"WBS,Qty\n1,\xFF\xFE\n"))
            .await
            .unwrap_err();
        assert!(matches!(err, PartitionError::Malformed(_)));
    }

    #[rstest]
    #[case("scan.pdf", DocumentKind::Pdf)]
    #[case("plan.docx", DocumentKind::Docx)]
    #[case("sheet.xlsx", DocumentKind::Xlsx)]
    #[case("photo.png", DocumentKind::Image)]
    #[tokio::test]
    async fn test_unsupported_formats(#[case] filename: &str, #[case] kind: DocumentKind) {
        let err = LocalPartitioner
            .partition(&doc(filename, b"data"))
            .await
            .unwrap_err();
        assert!(matches!(err, PartitionError::UnsupportedFormat(k) if k == kind));
    }
}
