//! Timetable table parser
//!
//! The timetable publishes no schema, so the positions of the interesting
//! cells are fixed here and nowhere else.

use scraper::{ElementRef, Html, Selector};

use crate::types::{MatchResult, Query, TimetableRow};

/// Index of the course-code cell among a row's `<td>` elements
pub const CODE_CELL: usize = 0;
/// Index of the course-name cell
pub const NAME_CELL: usize = 2;
/// Index of the exam-time cell
pub const TIME_CELL: usize = 4;

/// Parse every `<tr>` of a document, in document order.
///
/// Cells are the row's `<td>` descendants. A cell that does not exist reads
/// as an empty string. Cell text is the concatenation of all descendant text
/// nodes, untrimmed, so matching stays literal.
///
/// # Examples
/// ```
/// use examtime_core::parser::parse_rows;
///
/// let rows = parse_rows("<table><tr><td>CS101</td><td>x</td><td>Intro</td><td>y</td><td>10:00</td></tr></table>");
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].code, "CS101");
/// assert_eq!(rows[0].time, "10:00");
/// ```
pub fn parse_rows(html: &str) -> Vec<TimetableRow> {
    let document = Html::parse_document(html);

    // Both selectors are static and known to be valid
    let (Ok(row_selector), Ok(cell_selector)) = (Selector::parse("tr"), Selector::parse("td"))
    else {
        return Vec::new();
    };

    document
        .select(&row_selector)
        .map(|row| row_to_fields(&row, &cell_selector))
        .collect()
}

/// Map one row element to its code/name/time cells.
fn row_to_fields(row: &ElementRef, cell_selector: &Selector) -> TimetableRow {
    let cells: Vec<ElementRef> = row.select(cell_selector).collect();
    let text_at = |index: usize| {
        cells
            .get(index)
            .map(|cell| cell.text().collect::<String>())
            .unwrap_or_default()
    };

    TimetableRow {
        code: text_at(CODE_CELL),
        name: text_at(NAME_CELL),
        time: text_at(TIME_CELL),
    }
}

/// Return the name/time pair of every row satisfying `query`, in row order.
///
/// Duplicates are kept: a subject listed twice yields two results.
pub fn extract_matches(rows: Vec<TimetableRow>, query: &Query) -> Vec<MatchResult> {
    rows.into_iter()
        .filter(|row| query.matches(row))
        .map(MatchResult::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueryKind;
    use proptest::prelude::*;

    fn table(rows: &[(&str, &str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(code, name, time)| {
                format!(
                    "<tr><td>{}</td><td>1</td><td>{}</td><td>Hall A</td><td>{}</td></tr>",
                    code, name, time
                )
            })
            .collect();
        format!(
            "<html><body><table><tr><th>Code</th><th>#</th><th>Name</th><th>Room</th><th>Time</th></tr>{}</table></body></html>",
            body
        )
    }

    fn matches_in(html: &str, query: &Query) -> Vec<MatchResult> {
        extract_matches(parse_rows(html), query)
    }

    fn query(kind: QueryKind, terms: &[&str]) -> Query {
        Query::new(kind, terms.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_parse_empty_html() {
        assert!(parse_rows("<html><body></body></html>").is_empty());
    }

    #[test]
    fn test_header_row_has_no_td_cells() {
        let rows = parse_rows(&table(&[]));
        assert_eq!(rows, vec![TimetableRow::default()]);
    }

    #[test]
    fn test_short_row_yields_empty_cells() {
        let rows = parse_rows("<table><tr><td>CS101</td><td>1</td><td>Intro to CS</td></tr></table>");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "CS101");
        assert_eq!(rows[0].name, "Intro to CS");
        assert_eq!(rows[0].time, "");
    }

    #[test]
    fn test_cell_text_includes_nested_elements_untrimmed() {
        let rows = parse_rows(
            "<table><tr><td><b>CS</b>101</td><td></td><td> Intro </td><td></td><td>10:00</td></tr></table>",
        );
        assert_eq!(rows[0].code, "CS101");
        assert_eq!(rows[0].name, " Intro ");
    }

    #[test]
    fn test_code_scenario() {
        let html = table(&[("MA201", "Calculus", "09:00"), ("CS101", "Intro to CS", "10:00")]);
        let results = matches_in(&html, &query(QueryKind::Code, &["CS101"]));
        assert_eq!(
            results,
            vec![MatchResult {
                name: "Intro to CS".to_string(),
                time: "10:00".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_names_are_kept_in_order() {
        let html = table(&[
            ("CS101", "Intro to CS", "10:00"),
            ("MA201", "Calculus", "09:00"),
            ("CS101B", "Intro to CS", "14:00"),
        ]);
        let results = matches_in(&html, &query(QueryKind::Name, &["Intro to CS"]));
        let times: Vec<&str> = results.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, vec!["10:00", "14:00"]);
    }

    #[test]
    fn test_results_follow_document_not_term_order() {
        let html = table(&[("A1", "Alpha", "1"), ("B2", "Beta", "2"), ("C3", "Gamma", "3")]);
        let results = matches_in(&html, &query(QueryKind::Code, &["C3", "A1"]));
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_extract_matches_over_parsed_rows() {
        let row = |code: &str, name: &str, time: &str| TimetableRow {
            code: code.to_string(),
            name: name.to_string(),
            time: time.to_string(),
        };
        let rows = vec![
            row("CS101", "Intro to CS", "10:00"),
            TimetableRow::default(),
            row("CS101", "Intro to CS", "14:00"),
        ];
        let results = extract_matches(rows, &query(QueryKind::Code, &["CS101"]));
        let times: Vec<&str> = results.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, vec!["10:00", "14:00"]);
    }

    #[test]
    fn test_rows_missing_time_are_skipped() {
        let html = table(&[("CS101", "Intro to CS", "")]);
        assert!(matches_in(&html, &query(QueryKind::Code, &["CS101"])).is_empty());
    }

    #[test]
    fn test_no_match() {
        let html = table(&[("MA201", "Calculus", "09:00")]);
        assert!(matches_in(&html, &query(QueryKind::Code, &["CS101"])).is_empty());
    }

    fn cell_text() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["", "CS101", "MA201", "PH150", "Intro", "Calculus", "10:00"])
            .prop_map(|s| s.to_string())
    }

    proptest! {
        #[test]
        fn prop_results_are_ordered_subset_of_matching_rows(
            rows in prop::collection::vec((cell_text(), cell_text(), cell_text()), 0..12),
            terms in prop::collection::vec(cell_text(), 1..4),
            by_name in any::<bool>(),
        ) {
            let borrowed: Vec<(&str, &str, &str)> = rows
                .iter()
                .map(|(c, n, t)| (c.as_str(), n.as_str(), t.as_str()))
                .collect();
            let html = table(&borrowed);
            let kind = if by_name { QueryKind::Name } else { QueryKind::Code };
            let query = Query::new(kind, terms.clone()).unwrap();

            let expected: Vec<MatchResult> = rows
                .iter()
                .filter(|(c, n, t)| {
                    let key = if by_name { n } else { c };
                    !key.is_empty() && !n.is_empty() && !t.is_empty() && terms.contains(key)
                })
                .map(|(_, n, t)| MatchResult { name: n.clone(), time: t.clone() })
                .collect();

            prop_assert_eq!(matches_in(&html, &query), expected);
        }

        #[test]
        fn prop_extraction_is_idempotent(
            rows in prop::collection::vec((cell_text(), cell_text(), cell_text()), 0..8),
            terms in prop::collection::vec(cell_text(), 1..3),
        ) {
            let borrowed: Vec<(&str, &str, &str)> = rows
                .iter()
                .map(|(c, n, t)| (c.as_str(), n.as_str(), t.as_str()))
                .collect();
            let html = table(&borrowed);
            let query = Query::new(QueryKind::Code, terms).unwrap();
            prop_assert_eq!(matches_in(&html, &query), matches_in(&html, &query));
        }
    }
}
