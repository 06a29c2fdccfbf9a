#![no_main]

use hbs_xgettext::escape::escape_quotes;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|text: String| {
    let escaped = escape_quotes(&text);
    // Escaping twice must not change anything.
    assert_eq!(escape_quotes(&escaped), escaped);
    // Only backslashes are ever added.
    assert_eq!(escaped.replace('\\', ""), text.replace('\\', ""));
});
