use std::process::ExitCode;

use cfgbind::{help, Config, Field, Options};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ApplicationOptions {
    source_file: String,
    destination_file: String,
    verbose: bool,
    threads: i64,
    include: Vec<String>,
}

impl Default for ApplicationOptions {
    fn default() -> Self {
        Self {
            source_file: String::new(),
            destination_file: String::new(),
            verbose: false,
            threads: 1,
            include: Vec::new(),
        }
    }
}

impl Options for ApplicationOptions {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("source_file", |o: &mut Self| (&mut o.source_file).into())
                .position(0)
                .required()
                .description("Source file path"),
            Field::new("destination_file", |o: &mut Self| (&mut o.destination_file).into())
                .position(1)
                .description("Destination file path"),
            Field::new("verbose", |o: &mut Self| (&mut o.verbose).into())
                .short('v')
                .long("verbose")
                .description("Enable verbose output"),
            Field::new("threads", |o: &mut Self| (&mut o.threads).into())
                .short('t')
                .long("threads")
                .env("APP_THREADS")
                .description("Number of threads (default: 1)"),
            Field::new("include", |o: &mut Self| (&mut o.include).into())
                .short('i')
                .long("include")
                .description("Include files matching pattern"),
        ]
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options: ApplicationOptions = match Config::builder()
        .with_file("app.json", false)
        .with_args(std::env::args().skip(1))
        .build()
    {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            eprint!("{}", help::usage::<ApplicationOptions>("app"));
            return ExitCode::FAILURE;
        }
    };

    if options.verbose {
        println!("Processing file: {}", options.source_file);
        println!("Thread count: {}", options.threads);
        if !options.include.is_empty() {
            println!("Include patterns: {}", options.include.join(", "));
        }
    }

    println!("Processing {}...", options.source_file);
    if !options.destination_file.is_empty() {
        println!("Writing {}", options.destination_file);
    }

    ExitCode::SUCCESS
}
