use crate::cleaning::error::CleaningError;
use scraper::{ElementRef, Html, Selector};

/// An unstructured table pulled out of the page. Cell values are raw text,
/// whitespace-normalized but otherwise untouched.
#[derive(Debug, Clone)]
pub(crate) struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Extracts the resort comparison table from the page HTML.
///
/// When `table_index` is `None` the first `wikitable` whose header mentions
/// a resort column is used; the explicit index override exists for pages
/// where that heuristic picks the wrong table.
pub(crate) fn resort_table(
    html: &str,
    table_index: Option<usize>,
    url: &str,
) -> Result<RawTable, CleaningError> {
    let tables = extract_tables(html);
    if tables.is_empty() {
        return Err(CleaningError::TableNotFound(url.to_string()));
    }

    match table_index {
        Some(index) => {
            let available = tables.len();
            tables
                .into_iter()
                .nth(index)
                .ok_or(CleaningError::TableIndexOutOfRange {
                    url: url.to_string(),
                    index,
                    available,
                })
        }
        None => tables
            .into_iter()
            .find(looks_like_resort_table)
            .ok_or_else(|| CleaningError::TableNotFound(url.to_string())),
    }
}

/// Parses every `wikitable` on the page into a [`RawTable`]. The first row
/// is treated as the header row.
pub(crate) fn extract_tables(html: &str) -> Vec<RawTable> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table.wikitable").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut tables = Vec::new();
    for table in document.select(&table_selector) {
        let mut rows = table.select(&row_selector);
        let Some(header_row) = rows.next() else {
            continue;
        };
        let headers = cell_texts(&header_row, &cell_selector);
        let rows: Vec<Vec<String>> = rows
            .map(|row| cell_texts(&row, &cell_selector))
            .filter(|cells| !cells.is_empty())
            .collect();
        tables.push(RawTable { headers, rows });
    }
    tables
}

fn cell_texts(row: &ElementRef, cell_selector: &Selector) -> Vec<String> {
    row.select(cell_selector)
        .map(|cell| {
            cell.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn looks_like_resort_table(table: &RawTable) -> bool {
    table
        .headers
        .iter()
        .any(|h| h.to_lowercase().contains("resort"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="wikitable">
            <tr><th>Rank</th><th>Country</th></tr>
            <tr><td>1</td><td>Canada</td></tr>
        </table>
        <table class="wikitable">
            <tr>
                <th>Resort name</th><th>Nearest city</th><th>State/Province</th>
            </tr>
            <tr><td>Alta</td><td>Salt Lake City</td><td>Utah</td></tr>
            <tr><td>Alyeska
                Resort</td><td>Girdwood</td><td>Alaska</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn extracts_all_wikitables() {
        let tables = extract_tables(PAGE);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].headers, vec!["Rank", "Country"]);
        assert_eq!(tables[1].rows.len(), 2);
    }

    #[test]
    fn auto_detects_resort_table_by_header() {
        let table = resort_table(PAGE, None, "http://test").unwrap();
        assert_eq!(table.headers[0], "Resort name");
        assert_eq!(table.rows[0][0], "Alta");
    }

    #[test]
    fn collapses_whitespace_in_cells() {
        let table = resort_table(PAGE, None, "http://test").unwrap();
        assert_eq!(table.rows[1][0], "Alyeska Resort");
    }

    #[test]
    fn explicit_index_selects_table() {
        let table = resort_table(PAGE, Some(0), "http://test").unwrap();
        assert_eq!(table.headers, vec!["Rank", "Country"]);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let err = resort_table(PAGE, Some(5), "http://test").unwrap_err();
        assert!(matches!(
            err,
            CleaningError::TableIndexOutOfRange {
                index: 5,
                available: 2,
                ..
            }
        ));
    }

    #[test]
    fn page_without_tables_is_an_error() {
        let err = resort_table("<html><p>nothing here</p></html>", None, "http://test")
            .unwrap_err();
        assert!(matches!(err, CleaningError::TableNotFound(_)));
    }
}
