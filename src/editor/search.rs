// src/editor/search.rs
use super::row::{RenderIdx, Row};

/// One occurrence of the query, in render coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub row: usize,
    pub col: RenderIdx,
}

/// Where a search will resume. It holds no borrow of the rows, so a document can keep one
/// between key presses and feed it the rows on each step.
#[derive(Debug, Clone)]
pub struct SearchCursor {
    query: Vec<u8>,
    row: usize,
    from: usize,
}

impl SearchCursor {
    pub fn new(query: impl Into<Vec<u8>>) -> Self {
        SearchCursor { query: query.into(), row: 0, from: 0 }
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    /// Next match in (row, column) order. Matches never overlap: scanning resumes after the end of
    /// the previous one.
    pub fn next_in(&mut self, rows: &[Row]) -> Option<SearchResult> {
        if self.query.is_empty() {
            return None;
        }
        while let Some(row) = rows.get(self.row) {
            if let Some(col) = row.find(&self.query, RenderIdx(self.from)) {
                self.from = col.0 + self.query.len();
                return Some(SearchResult { row: self.row, col });
            }
            self.row += 1;
            self.from = 0;
        }
        None
    }
}

/// Lazily yields every match of a query. Rows after the last pulled match are never scanned.
pub struct SearchRows<'a> {
    rows: &'a [Row],
    cursor: SearchCursor,
}

impl Iterator for SearchRows<'_> {
    type Item = SearchResult;

    fn next(&mut self) -> Option<SearchResult> {
        self.cursor.next_in(self.rows)
    }
}

pub fn search<'a>(rows: &'a [Row], query: &str) -> SearchRows<'a> {
    SearchRows { rows, cursor: SearchCursor::new(query.as_bytes()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<Row> {
        lines.iter().map(|l| Row::from(*l)).collect()
    }

    #[test]
    fn test_search_rows_in_order() {
        let doc = rows(&["Hello, world!", "Go is awesome", "Hello, Go", "Goodbye, world!"]);
        let results: Vec<_> = search(&doc, "Go").collect();
        assert_eq!(
            results,
            vec![
                SearchResult { row: 1, col: RenderIdx(0) },
                SearchResult { row: 2, col: RenderIdx(7) },
                SearchResult { row: 3, col: RenderIdx(0) },
            ]
        );
    }

    #[test]
    fn test_multiple_matches_per_row_do_not_overlap() {
        let doc = rows(&["aaaaa"]);
        let cols: Vec<_> = search(&doc, "aa").map(|r| r.col.0).collect();
        assert_eq!(cols, vec![0, 2]);
    }

    #[test]
    fn test_columns_are_render_columns() {
        let doc = rows(&["\tneedle"]);
        assert_eq!(search(&doc, "needle").next(), Some(SearchResult { row: 0, col: RenderIdx(4) }));
    }

    #[test]
    fn test_consumer_can_stop_early() {
        let doc = rows(&["x", "x", "x"]);
        let mut results = search(&doc, "x");
        assert_eq!(results.next().map(|r| r.row), Some(0));
        drop(results);

        let mut cursor = SearchCursor::new("x");
        assert_eq!(cursor.next_in(&doc).map(|r| r.row), Some(0));
        assert_eq!(cursor.next_in(&doc).map(|r| r.row), Some(1));
    }

    #[test]
    fn test_empty_query_and_no_match() {
        let doc = rows(&["abc"]);
        assert_eq!(search(&doc, "").count(), 0);
        assert_eq!(search(&doc, "zzz").count(), 0);
        assert_eq!(search(&[], "abc").count(), 0);
    }
}
