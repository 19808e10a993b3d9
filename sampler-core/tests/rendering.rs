//! Rendering tests: indentation, numbering, marks and output formats

use sampler_core::sampler::formats::{serialize, OutputFormat};
use sampler_core::sampler::options::{ElementAttributes, IndentMode, SamplerDefaults};
use sampler_core::sampler::rendering::{render, LineNumberMode, RenderOptions};
use sampler_core::sampler::scanning::scan;
use sampler_core::sampler::selection::expand_to_offsets;
use sampler_core::sampler::testing::{assert_rendered, Fixture};
use sampler_core::sampler::{Sample, SampleRequest};

fn request(slug: &str, attributes: ElementAttributes) -> SampleRequest {
    SampleRequest::parse(slug, attributes)
}

#[test]
fn test_annotated_original_numbers() {
    let file = Fixture::Greeter.scan();
    let attributes = ElementAttributes {
        line_numbers: Some("original".to_string()),
        ..Default::default()
    };
    let rendered = request("greeter.js#greet,main", attributes)
        .render(&file, &SamplerDefaults::default())
        .unwrap();

    let output = serialize(&rendered, OutputFormat::Annotated).unwrap();
    insta::assert_snapshot!(output, @r#"
       3: function greet(name) {
       4:     console.log("Hello, " + name);
       5: }
       9: greet("world");
    > 11: greet("again");
    "#);
}

#[test]
fn test_plain_whole_file_without_delimiters() {
    let file = Fixture::Greeter.scan();
    let defaults = SamplerDefaults {
        skip: "delimiters".to_string(),
        ..Default::default()
    };
    let rendered = request("greeter.js", ElementAttributes::default())
        .render(&file, &defaults)
        .unwrap();

    let output = serialize(&rendered, OutputFormat::Plain).unwrap();
    insta::assert_snapshot!(output, @r#"
    // Greeter demo
    function greet(name) {
        console.log("Hello, " + name);
    }

    greet("world");
    greet("again");
    done();
    "#);
}

#[test]
fn test_json_output() {
    let file = Fixture::Greeter.scan();
    let attributes = ElementAttributes {
        line_numbers: Some("original".to_string()),
        ..Default::default()
    };
    let rendered = request("greeter.js#1", attributes)
        .render(&file, &SamplerDefaults::default())
        .unwrap();

    let output = serialize(&rendered, OutputFormat::Json).unwrap();
    insta::assert_snapshot!(output, @r#"
    {
      "lines": [
        {
          "number": " 1",
          "marked": false,
          "text": "// Greeter demo"
        }
      ],
      "content_type": "js"
    }
    "#);
}

#[test]
fn test_markup_indentation_and_marks() {
    let file = Fixture::Markup.scan();
    let attributes = ElementAttributes {
        mark: Some("4".to_string()),
        indent: Some(IndentMode::Remove),
        line_numbers: Some("yes".to_string()),
        ..Default::default()
    };
    let rendered = request("markup.html#2-6", attributes)
        .render(&file, &SamplerDefaults::default())
        .unwrap();

    assert_rendered(&rendered.lines)
        .texts(&["<li>one</li>", "<li>two</li>", "", "<li>three</li>"])
        .marked(&[1, 3])
        .numbers(&[Some("1"), Some("2"), Some("3"), Some("4")]);
    assert_eq!(rendered.language_class().as_deref(), Some("language-html"));
}

#[test]
fn test_indentation_stripping_with_blank_line() {
    let file = scan("    a\n      b\n");
    let sample = Sample::from_selector(&file, None);
    let options = RenderOptions {
        remove_indentation: true,
        ..Default::default()
    };
    assert_rendered(&render(&sample, &options)).texts(&["a", "  b"]);

    let file = scan("    a\n      b\n\n    c");
    let sample = Sample::from_selector(&file, None);
    assert_rendered(&render(&sample, &options)).texts(&["a", "  b", "", "c"]);
}

#[test]
fn test_sequential_numbers_start_where_asked() {
    let file = Fixture::Numbered.scan();
    let sample = Sample::from_selector(&file, Some("5-7"));
    let options = RenderOptions {
        line_numbers: LineNumberMode::SequentialFrom(9),
        ..Default::default()
    };
    assert_rendered(&render(&sample, &options))
        .texts(&["line 5", "line 6", "line 7"])
        .numbers(&[Some(" 9"), Some("10"), Some("11")]);
}

#[test]
fn test_skip_and_mark_offsets_address_the_assembled_sample() {
    let file = Fixture::Nested.scan();
    // 2-11 is ten lines, six of them delimiters
    let sample = Sample::from_selector(&file, Some("2-11"));
    let options = RenderOptions {
        skip_delimiters: true,
        skip: expand_to_offsets("8"),
        marked: expand_to_offsets("4"),
        ..Default::default()
    };
    assert_rendered(&render(&sample, &options))
        .texts(&["def outer():", "    value = 1", "    other = 2"])
        .marked(&[1]);
}

#[test]
fn test_original_numbers_survive_region_selection() {
    let file = Fixture::Nested.scan();
    let sample = Sample::from_selector(&file, Some("inner"));
    let options = RenderOptions {
        line_numbers: LineNumberMode::Original,
        ..Default::default()
    };
    assert_rendered(&render(&sample, &options)).numbers(&[Some(" 5"), Some(" 7"), Some(" 9")]);
}
