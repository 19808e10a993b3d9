//! Command-line interface for sampler
//! Prints samples of source files, selected by slug, the way a slide would show them.
//!
//! Usage:
//!   sampler `<file>#<selector>`...  [--mark `<sel>`] [--skip `<sel>`] [--indent remove|keep]
//!                                  [--line-numbers `<mode>`] [--format annotated|plain|json]
//!                                  [--proxy-url `<prefix>`] [--config `<file>`]
//!
//! Settings are layered: built-in defaults, then `sampler.toml` in the working directory if
//! present, then `--config`, then flags.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches, Command};
use sampler_config::{Loader, SamplerConfig, LOCAL_CONFIG_FILE};
use sampler_core::sampler::formats::{serialize, OutputFormat};
use sampler_core::sampler::{
    ElementAttributes, FileFetcher, IndentMode, RenderedSample, SampleError, SampleFiles,
    SampleRequest,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sampler=warn".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(2);
    });

    let slugs: Vec<String> = matches
        .get_many::<String>("slug")
        .map(|slugs| slugs.cloned().collect())
        .unwrap_or_default();
    let attributes = element_attributes(&matches);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Failed to start runtime: {}", e);
            std::process::exit(2);
        });
    let results = runtime.block_on(render_all(&slugs, attributes, &config));

    print_results(&slugs, results, config.output.format)
}

fn command() -> Command {
    Command::new("sampler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract and render code samples from source files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("slug")
                .help("File path with an optional selector, e.g. 'src/app.js#main,12-14'")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append)
                .index(1),
        )
        .arg(
            Arg::new("mark")
                .long("mark")
                .short('m')
                .help("Highlight sample lines by position, e.g. '1,3-4'"),
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .short('s')
                .help("Hide sample lines by position; the word 'delimiters' hides region markers"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Whether to remove the indentation shared by all lines")
                .value_parser(["remove", "keep"]),
        )
        .arg(
            Arg::new("line-numbers")
                .long("line-numbers")
                .short('n')
                .help("Line numbers: 'original', 'true' (from 1), a starting number, or 'off'"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(OutputFormat::ALL.map(|format| format.name())),
        )
        .arg(
            Arg::new("proxy-url")
                .long("proxy-url")
                .help("Prefix prepended to every file path before it is read"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
}

fn load_config(matches: &ArgMatches) -> Result<SamplerConfig, sampler_config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        tracing::debug!(%path, "layering configuration file");
        loader = loader.with_file(path);
    }
    if let Some(proxy_url) = matches.get_one::<String>("proxy-url") {
        loader = loader.set_override("sampler.proxy_url", proxy_url.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    loader.build()
}

fn element_attributes(matches: &ArgMatches) -> ElementAttributes {
    ElementAttributes {
        mark: matches.get_one::<String>("mark").cloned(),
        indent: matches
            .get_one::<String>("indent")
            .and_then(|indent| IndentMode::parse(indent)),
        skip: matches.get_one::<String>("skip").cloned(),
        line_numbers: matches.get_one::<String>("line-numbers").cloned(),
    }
}

/// Render every slug against one shared file service, keeping the input order.
async fn render_all(
    slugs: &[String],
    attributes: ElementAttributes,
    config: &SamplerConfig,
) -> Vec<Result<RenderedSample, SampleError>> {
    let files = Arc::new(SampleFiles::new(FileFetcher::new()));
    let defaults = Arc::new(config.sampler.clone());

    let handles: Vec<_> = slugs
        .iter()
        .map(|slug| {
            let request = SampleRequest::parse(slug, attributes.clone());
            let files = Arc::clone(&files);
            let defaults = Arc::clone(&defaults);
            tokio::spawn(async move { files.render_request(&request, &defaults).await })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("Sample task failed: {}", e);
                std::process::exit(2);
            }
        }
    }
    results
}

fn print_results(
    slugs: &[String],
    results: Vec<Result<RenderedSample, SampleError>>,
    format: OutputFormat,
) -> ExitCode {
    let with_headers = slugs.len() > 1;
    let mut failed = false;

    for (index, (slug, result)) in slugs.iter().zip(results).enumerate() {
        if with_headers {
            if index > 0 {
                println!();
            }
            println!("==> {} <==", slug);
        }

        let output = result
            .map_err(|e| e.to_string())
            .and_then(|sample| serialize(&sample, format).map_err(|e| e.to_string()));
        match output {
            Ok(text) => println!("{}", text),
            Err(message) => {
                eprintln!("Error in '{}': {}", slug, message);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
