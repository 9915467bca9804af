use clap::Parser;

/// Amiko — an AI companion you chat with from the terminal.
#[derive(Parser, Debug)]
#[command(name = "amiko", version, about)]
pub struct Args {
    /// Send a single message and exit instead of starting the chat loop.
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Model name override (e.g. gemini-2.5-flash).
    #[arg(long)]
    pub model: Option<String>,

    /// Print replies in one piece instead of streaming them.
    #[arg(long)]
    pub no_stream: bool,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
