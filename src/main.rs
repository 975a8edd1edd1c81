use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use solidscript::{
    config::{BindingMode, EvalConfig, UndefinedArgPolicy},
    render_file, render_source,
};
use tracing_subscriber::EnvFilter;

/// solidscript parses an OpenSCAD-style model description and prints the CSG
/// tree it evaluates to.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to render.
    #[arg(required_unless_present = "eval", conflicts_with = "eval")]
    file: Option<PathBuf>,

    /// Renders the given source text instead of a file. Relative `include`
    /// and `use` targets resolve against the current directory.
    #[arg(short, long, value_name = "SOURCE")]
    eval: Option<String>,

    /// Assigns declarations when their statement executes instead of when
    /// their block is entered.
    #[arg(long)]
    dynamic: bool,

    /// Which callees have Undefined positional arguments dropped.
    #[arg(long, value_enum, default_value_t = UndefinedArgPolicy::default())]
    undefined_args: UndefinedArgPolicy,

    /// Raises the log level: `-v` for debug, `-vv` for trace. `RUST_LOG`
    /// takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = EvalConfig { binding:        if args.dynamic {
                                                  BindingMode::Dynamic
                                              } else {
                                                  BindingMode::Static
                                              },
                              undefined_args: args.undefined_args, };

    let result = if let Some(source) = &args.eval {
        render_source(source, Path::new("."), &config)
    } else if let Some(path) = &args.file {
        render_file(path, &config)
    } else {
        eprintln!("No input given.");
        return ExitCode::FAILURE;
    };

    match result {
        Ok(Some(csg)) => {
            println!("{csg}");
            ExitCode::SUCCESS
        },
        Ok(None) => {
            println!("No geometry produced.");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
