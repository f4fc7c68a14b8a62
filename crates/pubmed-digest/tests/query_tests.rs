//! Query builder tests.

use chrono::NaiveDate;
use proptest::prelude::*;

use pubmed_digest::{SearchCriteria, build_query};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const DATE_CLAUSE_2023: &str = r#"("2023/01/01"[Date - Create] : "2023/12/31"[Date - Create])"#;

#[test]
fn test_single_author_no_topics() {
    let criteria = SearchCriteria::new(
        vec!["Smith J".to_string()],
        vec![],
        date(2023, 1, 1),
        date(2023, 12, 31),
        "me@example.org",
    );

    let query = criteria.query();
    assert!(query.contains("(Smith J[Author])"));
    assert!(query.contains(DATE_CLAUSE_2023));
    assert!(!query.contains("[Title/Abstract]"));
    assert_eq!(query, format!("(Smith J[Author]) AND {DATE_CLAUSE_2023}"));
}

#[test]
fn test_topics_only() {
    let empty: Vec<String> = vec![];
    let query = build_query(&empty, &["CRISPR", "gene therapy"], date(2023, 1, 1), date(2023, 12, 31));
    assert_eq!(
        query,
        format!("(CRISPR[Title/Abstract] OR gene therapy[Title/Abstract]) AND {DATE_CLAUSE_2023}")
    );
    assert!(!query.contains("[Author]"));
}

#[test]
fn test_names_are_passed_through() {
    let query = build_query(&["O'Brien \"K\""], &["α-synuclein"], date(2020, 5, 6), date(2021, 7, 8));
    assert!(query.starts_with("(O'Brien \"K\"[Author]) AND (α-synuclein[Title/Abstract])"));
    assert!(query.ends_with(r#"("2020/05/06"[Date - Create] : "2021/07/08"[Date - Create])"#));
}

fn terms() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[A-Za-z][A-Za-z ]{0,15}[A-Za-z]", 0..5)
}

fn dates() -> impl Strategy<Value = NaiveDate> {
    (1950i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
}

proptest! {
    /// One OR-group per non-empty list, plus exactly one date clause.
    #[test]
    fn query_has_one_group_per_list(authors in terms(), topics in terms(), start in dates(), end in dates()) {
        let query = build_query(&authors, &topics, start, end);

        let author_group = (!authors.is_empty()).then(|| format!(
            "({})",
            authors.iter().map(|a| format!("{}[Author]", a.trim())).collect::<Vec<_>>().join(" OR ")
        ));
        let topic_group = (!topics.is_empty()).then(|| format!(
            "({})",
            topics.iter().map(|t| format!("{}[Title/Abstract]", t.trim())).collect::<Vec<_>>().join(" OR ")
        ));
        let date_clause = format!(
            "(\"{}\"[Date - Create] : \"{}\"[Date - Create])",
            start.format("%Y/%m/%d"),
            end.format("%Y/%m/%d")
        );

        let expected: Vec<String> = [author_group, topic_group, Some(date_clause.clone())]
            .into_iter()
            .flatten()
            .collect();
        prop_assert_eq!(&query, &expected.join(" AND "));
        prop_assert_eq!(query.matches("[Date - Create] :").count(), 1);
        prop_assert!(query.ends_with(&date_clause));
        prop_assert_eq!(query.contains("[Author]"), !authors.is_empty());
        prop_assert_eq!(query.contains("[Title/Abstract]"), !topics.is_empty());
    }
}
