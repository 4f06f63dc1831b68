//! Command execution logic.
//!
//! [`run_convert`] merges CLI flags over the loaded configuration, converts
//! one input to stdout or a file, or many inputs into an output directory in
//! parallel. [`run_rules`] renders the rule table.

use std::{fs::create_dir_all, path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use super::{
    convert::resolve_format,
    helpers::{
        calculate_exit_code, create_output_options, merge_disabled, output_targets,
        read_sql_input, write_output
    },
    types::{CommandOutput, ConvertParams}
};
use crate::{
    config::{Config, RulesConfig},
    converter::{ConversionResult, Converter},
    error::{AppResult, config_error, file_write_error},
    output::{
        OutputFormat, OutputOptions, format_notices, format_result, format_rule_catalog,
        format_summary
    },
    rules::RuleSet
};

/// Executes the convert command.
///
/// 1. **Settings**: CLI flags are merged over the config file and environment
/// 2. **Conversion**: each input is read and converted
/// 3. **Output**: results go to stdout, `--output`, or one file per input in
///    `--out-dir`; notices and summaries go to stderr
///
/// # Errors
///
/// Returns an error if:
/// - A disabled rule ID or configured format is unknown
/// - Several inputs are given without `--out-dir`
/// - An input cannot be read or an output cannot be written
///
/// # Example
///
/// ```no_run
/// use tsql2snow::{
///     app::{ConvertParams, run_convert},
///     config::Config
/// };
///
/// let params = ConvertParams {
///     inputs: vec!["legacy.sql".to_string()],
///     ..ConvertParams::default()
/// };
/// let output = run_convert(params, Config::default()).unwrap();
/// println!("{}", output.stdout.join("\n"));
/// ```
pub fn run_convert(params: ConvertParams, config: Config) -> AppResult<CommandOutput> {
    let disabled = merge_disabled(&config.rules.disabled, &params.disabled)?;
    let converter = Converter::with_config(&RulesConfig {
        disabled
    })
    .validating(params.validate || config.output.validate);

    let format = resolve_format(params.format, &config.output)?;
    let opts = create_output_options(format, params.no_color, config.output.color, params.verbose);

    if let Some(out_dir) = &params.out_dir {
        return convert_many(&converter, &params.inputs, out_dir, &opts, params.strict);
    }

    let input = match params.inputs.as_slice() {
        [] => "-",
        [single] => single.as_str(),
        _ => return Err(config_error("Multiple inputs require --out-dir"))
    };

    let sql = read_sql_input(input)?;
    let result = converter.convert(&sql);
    let rendered = format_result(&result, &opts);

    let mut output = CommandOutput {
        exit_code: calculate_exit_code(std::slice::from_ref(&result), params.strict),
        stdout:    Vec::new(),
        stderr:    report(&result, &opts)
    };

    match &params.output {
        Some(path) => write_output(path, &rendered)?,
        None => output.stdout.push(rendered)
    }
    Ok(output)
}

/// Renders the rule table, marking rules disabled in the config.
pub fn run_rules(no_color: bool, verbose: bool, config: &Config) -> CommandOutput {
    let opts = create_output_options(OutputFormat::Text, no_color, config.output.color, verbose);
    CommandOutput {
        exit_code: 0,
        stdout:    vec![format_rule_catalog(
            &RuleSet::catalog(),
            &config.rules.disabled,
            &opts
        )],
        stderr:    Vec::new()
    }
}

fn convert_many(
    converter: &Converter,
    inputs: &[String],
    out_dir: &Path,
    opts: &OutputOptions,
    strict: bool
) -> AppResult<CommandOutput> {
    if inputs.iter().any(|i| i == "-") {
        return Err(config_error("stdin cannot be combined with --out-dir"));
    }
    let targets = output_targets(out_dir, inputs, opts.format)?;
    create_dir_all(out_dir).map_err(|e| file_write_error(&out_dir.display().to_string(), e))?;

    let pb = ProgressBar::new(inputs.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}");
    if let Ok(style) = style {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));

    let converted: Vec<(String, ConversionResult)> = inputs
        .par_iter()
        .zip(&targets)
        .map(|(input, target)| {
            let sql = read_sql_input(input)?;
            let result = converter.convert(&sql);
            write_output(target, &format_result(&result, opts))?;
            pb.set_message(input.clone());
            pb.inc(1);
            Ok((target.display().to_string(), result))
        })
        .collect::<AppResult<_>>()?;
    pb.finish_and_clear();

    let mut output = CommandOutput::default();
    let mut results = Vec::with_capacity(converted.len());
    for (input, (target, result)) in inputs.iter().zip(converted) {
        output.stdout.push(format!("{} -> {}", input, target));
        let notes = report(&result, opts);
        if !notes.is_empty() {
            output.stderr.push(format!("{}:", input));
            output.stderr.extend(notes);
        }
        results.push(result);
    }

    info!(files = results.len(), dir = %out_dir.display(), "conversion complete");
    output.exit_code = calculate_exit_code(&results, strict);
    Ok(output)
}

/// Stderr blocks for one result: notices, then the summary when verbose.
fn report(result: &ConversionResult, opts: &OutputOptions) -> Vec<String> {
    let mut blocks = Vec::new();
    // json/yaml carry notices in the document itself
    if opts.format.reports_separately() && result.has_notices() {
        blocks.push(format_notices(&result.notices, opts));
    }
    if opts.verbose {
        blocks.push(format_summary(result, opts));
    }
    blocks
}
