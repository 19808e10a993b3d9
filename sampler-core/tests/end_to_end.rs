//! Whole-pipeline scenarios: raw text in, rendered lines out

use sampler_core::sampler::rendering::{render, LineNumberMode, RenderOptions, RenderedLine};
use sampler_core::sampler::scanning::{scan, DelimiterKind, Line};
use sampler_core::sampler::testing::{assert_rendered, assert_sample};
use sampler_core::sampler::{ElementAttributes, Sample, SampleRequest, SamplerDefaults};

const GREET: &str = "// sample(greet)\nconsole.log(\"hi\");\n// end-sample\ndone();\n";

#[test]
fn test_named_sample_renders_single_line() {
    let file = scan(GREET);
    let sample = Sample::from_selector(&file, Some("greet"));

    assert_eq!(
        sample.lines(),
        &[&Line::new(2, "console.log(\"hi\");", DelimiterKind::None)]
    );

    let options = RenderOptions {
        remove_indentation: false,
        line_numbers: LineNumberMode::Off,
        ..Default::default()
    };
    assert_eq!(
        render(&sample, &options),
        vec![RenderedLine {
            number: None,
            marked: false,
            text: "console.log(\"hi\");".to_string(),
        }]
    );
}

#[test]
fn test_whole_file_without_delimiters() {
    let file = scan(GREET);
    let sample = Sample::from_selector(&file, None);
    let options = RenderOptions {
        skip_delimiters: true,
        line_numbers: LineNumberMode::Original,
        ..Default::default()
    };

    assert_rendered(&render(&sample, &options))
        .texts(&["console.log(\"hi\");", "done();"])
        .numbers(&[Some("2"), Some("4")]);
}

#[test]
fn test_assembly_is_deterministic() {
    let file = scan(GREET);
    let first = Sample::from_selector(&file, Some("greet, 1-4, greet"));
    let second = Sample::from_selector(&file, Some("greet, 1-4, greet"));

    assert_eq!(first, second);
    assert_sample(&first).numbers(&[2, 1, 2, 3, 4, 2]);
}

#[test]
fn test_misspelled_name_is_an_error() {
    let file = scan(GREET);
    let request = SampleRequest::parse("demo.js#gret", ElementAttributes::default());
    let error = request
        .render(&file, &SamplerDefaults::default())
        .unwrap_err();

    assert!(error.is_empty_sample());
    assert_eq!(
        error.to_string(),
        "no lines selected from 'demo.js' by selector 'gret'"
    );
}

#[test]
fn test_skip_tagged_only_selection_is_an_error() {
    let file = scan("a\nb // skip-sample\n");
    let request = SampleRequest::parse("a.txt#2", ElementAttributes::default());

    assert!(request
        .render(&file, &SamplerDefaults::default())
        .unwrap_err()
        .is_empty_sample());
}
