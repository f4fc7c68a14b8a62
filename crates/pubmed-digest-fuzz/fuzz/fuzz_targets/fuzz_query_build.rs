#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use pubmed_digest::build_query;
use pubmed_digest::models::split_lines;

fuzz_target!(|data: (String, String)| {
    let (authors, topics) = data;
    let Some(day) = NaiveDate::from_ymd_opt(2024, 1, 1) else {
        return;
    };
    let query = build_query(&split_lines(&authors), &split_lines(&topics), day, day);
    assert!(query.ends_with(r#""2024/01/01"[Date - Create])"#));
});
