//! CLI interface for azalea-tools

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "azalea")]
#[command(about = "Tokenize files and inspect the automata behind token patterns")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenize a file with the reference grammar or a JSON token table
    Tokens {
        /// Input file
        input: PathBuf,

        /// JSON token table to use instead of the reference grammar
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Matching engine
        #[arg(short, long, default_value = "dfa")]
        engine: Engine,

        /// Skip unexpected characters instead of stopping at the first
        #[arg(short, long)]
        recover: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the postfix form of a pattern
    Postfix {
        pattern: String,
    },

    /// Print the transition table of a pattern's automaton
    Table {
        pattern: String,

        /// Determinize before printing
        #[arg(short, long)]
        dfa: bool,
    },

    /// Render a pattern's automaton as Graphviz DOT or JSON
    Graph {
        pattern: String,

        /// Determinize before rendering
        #[arg(short, long)]
        dfa: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "dot")]
        format: GraphFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    Nfa,
    Dfa,
}

impl std::str::FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nfa" => Ok(Self::Nfa),
            "dfa" => Ok(Self::Dfa),
            _ => Err(format!("Unknown engine: {s}. Supported: nfa, dfa")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Supported: text, json")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
    Dot,
    Json,
}

impl std::str::FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Supported: dot, json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens_command() {
        let cli = Cli::try_parse_from(["azalea", "tokens", "input.txt", "--engine", "nfa", "--recover"]).unwrap();
        let Commands::Tokens { input, engine, recover, format, table } = cli.command else {
            panic!("expected tokens command");
        };
        assert_eq!(input, PathBuf::from("input.txt"));
        assert_eq!(engine, Engine::Nfa);
        assert!(recover);
        assert_eq!(format, OutputFormat::Text);
        assert!(table.is_none());
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        assert!(Cli::try_parse_from(["azalea", "tokens", "x", "--engine", "lr"]).is_err());
    }
}
