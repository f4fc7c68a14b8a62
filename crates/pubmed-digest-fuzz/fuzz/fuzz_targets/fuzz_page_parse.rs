#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_digest::Pmcid;
use pubmed_digest::client::parse_article_page;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let content = parse_article_page(&html, &Pmcid::new("PMC1"), "https://pubmed.ncbi.nlm.nih.gov");
    assert!(!content.title.is_empty());
    assert!(!content.journal.is_empty());
    assert!(!content.authors.is_empty());
});
