mod connection;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmdline::Verdict;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{EnvFilter, fmt};

use crate::connection::{Connection, connection_parser};

#[derive(Parser)]
#[command(name = "cmdline-demo")]
#[command(version, about = "Demo programs for the cmdline option parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the given arguments as a connection description
    Simple(SimpleArgs),

    /// Read command lines from stdin and parse each one
    Shell(ShellArgs),
}

#[derive(Parser)]
struct SimpleArgs {
    /// Print the parse report as JSON instead of the connection line
    #[arg(long)]
    json: bool,

    /// Arguments for the option parser (put them after `--`)
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Parser)]
struct ShellArgs {
    /// Prompt printed before each line
    #[arg(long, default_value = "> ")]
    prompt: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simple(args) => simple(args),
        Commands::Shell(args) => shell(args),
    }
}

fn simple(args: SimpleArgs) -> Result<()> {
    tracing::debug!("executing simple demo");

    let mut parser = connection_parser("simple")?;
    parser.add_flag("gzip", None, "gzip when transfer")?;

    let argv = std::iter::once("simple".to_string()).chain(args.args);
    let verdict = parser.parse_check(argv);

    let code = verdict.exit_code();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&parser.report())?);
    } else {
        match &verdict {
            Verdict::Proceed => {}
            Verdict::Help(usage) => print!("{usage}"),
            Verdict::Fail { error, usage } => {
                eprintln!("{error}");
                print!("{usage}");
            }
        }
    }
    match code {
        None if !args.json => {}
        None | Some(0) => return Ok(()),
        Some(code) => std::process::exit(code),
    }

    let conn = Connection::from_parser(&parser)?;
    println!("{}://{}:{}", conn.protocol, conn.host, conn.port);
    if parser.exists("gzip")? {
        println!("gzip");
    }
    Ok(())
}

fn shell(args: ShellArgs) -> Result<()> {
    tracing::debug!("executing shell demo");

    let mut parser = connection_parser("sh")?;
    parser.add_flag("quit", 'q', "quit")?;
    parser.add_flag("exit", None, "quit")?;
    parser.add_flag("help", 'h', "print this message")?;
    parser.footer("filename ...");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "{}", args.prompt)?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;
        // The first token stands in for the program name.
        let command_line = format!("{} {line}", parser.program_name());
        let ok = parser.parse_str(&command_line);

        if parser.exists("quit")? || parser.exists("exit")? {
            break;
        }
        if parser.exists("help")? {
            print!("{}", parser.usage());
            continue;
        }
        if !ok {
            eprintln!("{}", parser.error());
            print!("{}", parser.usage());
            continue;
        }

        let conn = Connection::from_parser(&parser)?;
        println!("{}:{}", conn.host, conn.port);
        for arg in parser.rest() {
            println!("- {arg}");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
