use std::process;

use clap::Parser;
use tsql2snow::{
    app::{CommandOutput, ConvertParams, init_logging, run_convert, run_rules},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let config = Config::load()?;

    let output = match cli.command {
        Commands::Convert {
            inputs,
            output,
            out_dir,
            format,
            validate,
            disabled,
            strict,
            no_color
        } => run_convert(
            ConvertParams {
                inputs,
                output,
                out_dir,
                format,
                validate,
                disabled,
                strict,
                verbose: cli.verbose,
                no_color
            },
            config
        )?,
        Commands::Rules {
            no_color
        } => run_rules(no_color, cli.verbose, &config)
    };

    print_output(&output);
    Ok(output.exit_code)
}

fn print_output(output: &CommandOutput) {
    for block in &output.stderr {
        if block.ends_with('\n') {
            eprint!("{}", block);
        } else {
            eprintln!("{}", block);
        }
    }
    for block in &output.stdout {
        if block.ends_with('\n') {
            print!("{}", block);
        } else {
            println!("{}", block);
        }
    }
}
