#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_digest::Pmid;
use pubmed_digest::client::parse_pubmed_article;

fuzz_target!(|data: &[u8]| {
    // Malformed XML must come back as an error, never a panic
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = parse_pubmed_article(xml, &Pmid::new("1"));
    }
});
