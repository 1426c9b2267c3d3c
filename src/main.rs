use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporpcli::{
    cli::{self, ReportView},
    config::{self, Config},
    error,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch top tracks of artists and store them
    Fetch(FetchOptions),

    /// Show the top tracks of one artist
    Lookup(LookupOptions),

    /// Render aggregate views of the stored table
    Report(ReportOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct FetchOptions {
    /// Artist names; the built-in list is used when none are given
    pub names: Vec<String>,

    /// Append to the table instead of replacing it
    #[clap(long)]
    pub append: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LookupOptions {
    /// Artist name, spelling does not have to be exact
    #[clap(num_args = 1.., required = true)]
    pub name: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ReportOptions {
    #[clap(value_enum)]
    pub view: ReportView,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    config::load_env();
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot load environment. Err: {}", e),
    };

    match cli.command {
        Command::Fetch(opt) => cli::fetch(&config, opt.names, opt.append),
        Command::Lookup(opt) => cli::lookup(&config, &opt.name.join(" ")),
        Command::Report(opt) => cli::report(&config, opt.view),
        Command::Completions(_) => {}
    }
}
