//! PubMed search expression builder.
//!
//! Produces E-utilities term syntax, e.g.
//! `(Smith J[Author] OR Doe A[Author]) AND (cancer[Title/Abstract]) AND ("2023/01/01"[Date - Create] : "2023/12/31"[Date - Create])`.

use chrono::NaiveDate;

/// Field qualifier for author terms.
pub const AUTHOR_FIELD: &str = "Author";

/// Field qualifier for topic terms.
pub const TOPIC_FIELD: &str = "Title/Abstract";

/// Field the date range filters on.
pub const DATE_FIELD: &str = "Date - Create";

/// Date format E-utilities expects inside the range clause.
const DATE_FORMAT: &str = "%Y/%m/%d";

/// Build the search expression for authors and topics within a creation-date range.
///
/// Entries are trimmed and blank ones dropped; each non-empty list becomes one
/// OR-group. Groups and the date clause are AND-joined.
#[must_use]
pub fn build_query<A, T>(authors: &[A], topics: &[T], start: NaiveDate, end: NaiveDate) -> String
where
    A: AsRef<str>,
    T: AsRef<str>,
{
    let mut clauses: Vec<String> = [or_group(authors, AUTHOR_FIELD), or_group(topics, TOPIC_FIELD)]
        .into_iter()
        .flatten()
        .collect();
    clauses.push(date_range(start, end));
    clauses.join(" AND ")
}

/// `("YYYY/MM/DD"[Date - Create] : "YYYY/MM/DD"[Date - Create])`
#[must_use]
pub fn date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "(\"{}\"[{DATE_FIELD}] : \"{}\"[{DATE_FIELD}])",
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    )
}

fn or_group<S: AsRef<str>>(terms: &[S], field: &str) -> Option<String> {
    let terms: Vec<String> = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(|t| format!("{t}[{field}]"))
        .collect();

    if terms.is_empty() { None } else { Some(format!("({})", terms.join(" OR "))) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_format() {
        assert_eq!(
            date_range(date(2023, 1, 5), date(2023, 12, 31)),
            r#"("2023/01/05"[Date - Create] : "2023/12/31"[Date - Create])"#
        );
    }

    #[test]
    fn test_authors_and_topics() {
        let query = build_query(
            &["Smith J", " Doe A "],
            &["cancer", "immunotherapy"],
            date(2023, 1, 1),
            date(2023, 12, 31),
        );
        assert_eq!(
            query,
            "(Smith J[Author] OR Doe A[Author]) AND \
             (cancer[Title/Abstract] OR immunotherapy[Title/Abstract]) AND \
             (\"2023/01/01\"[Date - Create] : \"2023/12/31\"[Date - Create])"
        );
    }

    #[test]
    fn test_only_date_clause_when_lists_empty() {
        let empty: [&str; 0] = [];
        let query = build_query(&empty, &["   "], date(2024, 2, 1), date(2024, 2, 29));
        assert!(!query.contains("AND"));
        assert!(query.starts_with("(\"2024/02/01\""));
    }
}
