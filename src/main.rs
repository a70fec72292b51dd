use clap::{Parser, Subcommand};
use std::io::{self, Read};

#[derive(Debug, Parser)]
#[command(arg_required_else_help(true), version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check an input for parse errors
    Check {
        /// The input source
        #[arg(default_value = None)]
        input: Option<String>,
    },
    /// Print the token stream for an input
    Tokens {
        /// The input source
        #[arg(default_value = None)]
        input: Option<String>,
    },
    /// Print the parse tree for an input
    Dump {
        /// The input source
        #[arg(default_value = None)]
        input: Option<String>,
    },
}

/// Read the given file, or stdin when no path was passed. The label feeds
/// the `(file: .. line: .. column: ..)` suffix of error messages.
fn read_input(input: &Option<String>) -> io::Result<(String, String)> {
    match input {
        Some(path) => Ok((std::fs::read_to_string(path)?, path.clone())),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok((buffer, "<stdin>".to_string()))
        }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match &cli.command {
        Some(Commands::Check { input }) => {
            let (content, file) = read_input(input)?;
            match syntax::parse_source(&content, &file) {
                Ok(_) => println!("Syntax OK"),
                Err(err) => {
                    eprintln!("Error: {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Some(Commands::Tokens { input }) => {
            let (content, file) = read_input(input)?;
            match syntax::tokenize(&content, &file) {
                Ok(tokens) => {
                    for token in tokens {
                        println!("{} {} {}", token.location, token.describe(), token.text);
                    }
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Some(Commands::Dump { input }) => {
            let (content, file) = read_input(input)?;
            match syntax::parse_source(&content, &file) {
                Ok(tree) => print!("{}", tree.get_diagnostic_string()),
                Err(err) => {
                    eprintln!("Error: {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        _ => {
            println!("Unrecognized command!");
            std::process::exit(1);
        }
    }
}
