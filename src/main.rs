// loxtree: parser and tree printer for a small C-like scripting language

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::{ArgAction, Parser as CliParser, Subcommand};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use tracing_subscriber::EnvFilter;

use loxtree::parser::lexer::Lexer;
use loxtree::parser::parse::{Parser, ParserConfig};
use loxtree::printer::AstPrinter;

/// Exit status when the input has lexical or syntax errors
const EXIT_SYNTAX_ERROR: u8 = 65;

/// Tokenize or parse script source and print the result
#[derive(Debug, CliParser)]
#[command(name = "loxtree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token stream, one token per line
    Tokenize {
        /// Source file, or `-` for stdin
        path: String,
    },

    /// Parse and print the syntax tree in parenthesized form
    Parse {
        /// Source file, or `-` for stdin
        path: String,

        /// Parse a single expression instead of a program
        #[arg(long)]
        expression: bool,

        /// Drop expression statements that are missing their `;`
        #[arg(long)]
        strict_semicolons: bool,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let status = match cli.command {
        Command::Tokenize { path } => tokenize(&read_source(&path)?),
        Command::Parse {
            path,
            expression,
            strict_semicolons,
        } => {
            let config = if strict_semicolons {
                ParserConfig::strict()
            } else {
                ParserConfig::default()
            };
            parse(&read_source(&path)?, expression, config)
        }
    };

    Ok(status)
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(io::stderr)
        .init();
}

fn read_source(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    if path == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }

    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path, e).into())
}

fn tokenize(source: &str) -> ExitCode {
    match Lexer::new(source).tokenize() {
        Ok(tokens) => {
            for token in &tokens {
                println!("{}", token);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::from(EXIT_SYNTAX_ERROR)
        }
    }
}

fn parse(source: &str, expression: bool, config: ParserConfig) -> ExitCode {
    let tokens = match Lexer::new(source).tokenize() {
        Ok(tokens) => tokens,
        Err(err) => {
            report(&err);
            return ExitCode::from(EXIT_SYNTAX_ERROR);
        }
    };

    let mut parser = Parser::with_config(tokens, config);
    let mut printer = AstPrinter::new();

    let rendered = if expression {
        parser
            .parse_expression()
            .map(|expr| printer.print(expr.as_ref()))
    } else {
        parser
            .parse_program()
            .map(|statements| printer.print_program(&statements))
    };

    println!("{}", rendered.value);
    for error in &rendered.errors {
        report(error);
    }

    if rendered.has_errors() {
        ExitCode::from(EXIT_SYNTAX_ERROR)
    } else {
        ExitCode::SUCCESS
    }
}

/// Print a diagnostic to stderr, colored when stderr is a terminal
fn report(error: &impl fmt::Display) {
    if io::stderr().is_tty() {
        eprintln!("{} {}", "error:".red().bold(), error);
    } else {
        eprintln!("error: {}", error);
    }
}
