#![no_main]

use hbs_xgettext::config::default_helper_roles;
use hbs_xgettext::{Extractor, HandlebarsExtractor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let lines = text.lines().count().max(1);
    // Err(_) can happen for malformed templates and it's fine.
    if let Ok(extraction) = HandlebarsExtractor.extract(text, &default_helper_roles()) {
        for (_, record) in extraction.iter() {
            assert!(!record.line_numbers.is_empty());
            assert!(record.line_numbers.iter().all(|&lineno| lineno <= lines + 1));
        }
    }
});
