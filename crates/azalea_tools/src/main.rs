//! Azalea Tools CLI
//!
//! Command-line tools for tokenizing files and inspecting automata.

use azalea::automaton::{Dfa, Nfa, dfa_table, nfa_table, subset_construction_with_limit};
use azalea::lang;
use azalea::lexer::{ErrorMode, LexerConfig, MatchEngine, ScanOutput, TokenTable};
use azalea::regex::{self, parser::postfix_string};
use azalea::syntax::SyntaxKind;
use azalea_tools::cli::{Cli, Commands, Engine, GraphFormat, OutputFormat};
use azalea_tools::tokens::{render_json, render_text};
use azalea_tools::visualize::{dfa_dot, dfa_json, nfa_dot, nfa_json};
use clap::Parser;
use std::fs;
use std::path::Path;

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens {
            input,
            table,
            engine,
            recover,
            format,
        } => {
            let source = fs::read_to_string(&input)?;
            let config = LexerConfig {
                engine: match engine {
                    Engine::Nfa => MatchEngine::Nfa,
                    Engine::Dfa => MatchEngine::Dfa,
                },
                error_mode: if recover { ErrorMode::Recover } else { ErrorMode::Abort },
                ..lang::config()
            };

            if let Some(table) = table {
                let table: TokenTable = serde_json::from_str(&fs::read_to_string(&table)?)?;
                let lexer = table.compile(&config)?;
                log::info!("compiled {} rules from table", lexer.rules().len());
                let output = lexer.scan(&source);
                emit(&output, format, |kind| table.name(kind).unwrap_or("?").to_owned())?;
            } else {
                let lexer = lang::lexer_with_config(config)?;
                let output = lexer.scan(&source);
                emit(&output, format, |kind| kind.as_str().to_owned())?;
            }
        }

        Commands::Postfix { pattern } => {
            println!("{}", postfix_string(&regex::parse(&pattern)?));
        }

        Commands::Table { pattern, dfa } => {
            let nfa = regex::compile(&pattern)?;
            if dfa {
                print!("{}", dfa_table(&determinize(&nfa)?));
            } else {
                print!("{}", nfa_table(&nfa));
            }
        }

        Commands::Graph {
            pattern,
            dfa,
            output,
            format,
        } => {
            let nfa = regex::compile(&pattern)?;
            let content = match (format, dfa) {
                (GraphFormat::Dot, false) => nfa_dot(&nfa, Some(&pattern)),
                (GraphFormat::Dot, true) => dfa_dot(&determinize(&nfa)?, Some(&pattern)),
                (GraphFormat::Json, false) => serde_json::to_string_pretty(&nfa_json(&nfa))?,
                (GraphFormat::Json, true) => serde_json::to_string_pretty(&dfa_json(&determinize(&nfa)?))?,
            };
            write_output(output.as_deref(), &content)?;
        }
    }

    Ok(())
}

fn determinize(nfa: &Nfa) -> CliResult<Dfa> {
    let limit = LexerConfig::default().limits.max_dfa_states;
    Ok(subset_construction_with_limit(nfa, limit)?)
}

/// Print a scan result; lexical errors go to stderr and fail the command.
fn emit<K: SyntaxKind>(output: &ScanOutput<K>, format: OutputFormat, name: impl Fn(K) -> String) -> CliResult {
    match format {
        OutputFormat::Text => {
            print!("{}", render_text(output, name));
            for error in &output.errors {
                eprintln!("error: {error}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&render_json(output, name))?),
    }

    if output.errors.is_empty() {
        Ok(())
    } else {
        Err(format!("{} lexical error(s)", output.errors.len()).into())
    }
}

fn write_output(path: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = path {
        fs::write(path, content)?;
        println!("Wrote graph to {}", path.display());
    } else {
        print!("{content}");
    }
    Ok(())
}
