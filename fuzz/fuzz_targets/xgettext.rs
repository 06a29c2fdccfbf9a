#![no_main]

use hbs_xgettext::pot::header;
use hbs_xgettext::{create_catalog, Config, HandlebarsExtractor};
use hbs_xgettext_fuzz::{create_inputs, Template};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|templates: Vec<Template>| {
    let config = Config::default();
    let inputs = create_inputs(templates);
    if let Ok(output) = create_catalog(&config, &HandlebarsExtractor, inputs) {
        let header = header(&config, 0);
        let header_lines = header.lines().count();
        assert!(output.artifact.contents.lines().count() >= header_lines);
        assert!(output.artifact.contents.ends_with("\n\n"));
    }
});
