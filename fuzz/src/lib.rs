use arbitrary::Arbitrary;
use hbs_xgettext::SourceInput;

/// Wrapper struct for generating arbitrary templates.
#[derive(Arbitrary, Debug)]
pub struct Template {
    pub path: String,
    pub content: String,
}

/// Generate the inputs of a catalog run for fuzzing.
pub fn create_inputs(templates: Vec<Template>) -> Vec<SourceInput> {
    templates
        .into_iter()
        .map(|template| SourceInput::buffer(template.path, template.content))
        .collect()
}
