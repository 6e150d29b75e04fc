use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "selpg")]
#[command(about = "Select a contiguous range of pages from text input")]
#[command(version)]
pub struct Cli {
    /// First page to emit
    #[arg(short, long, alias = "start_page", allow_hyphen_values = true)]
    pub start_page: Option<String>,

    /// Last page to emit
    #[arg(short, long, alias = "end_page", allow_hyphen_values = true)]
    pub end_page: Option<String>,

    /// Lines per page (default 72)
    #[arg(short = 'l', long, alias = "page_length", allow_hyphen_values = true)]
    pub page_length: Option<String>,

    /// Pages are delimited by form feeds instead of line counts
    #[arg(short = 'f', long, alias = "page_type")]
    pub form_feed: bool,

    /// Send selected pages to this print destination instead of stdout
    #[arg(short = 'd', long, alias = "print_dest")]
    pub print_dest: Option<String>,

    /// Command receiving pages for a print destination, invoked as `<command> -d<dest>`
    #[arg(long, env = "SELPG_PRINT_COMMAND", default_value = "lp")]
    pub print_command: String,

    /// Do not echo the resolved configuration
    #[arg(short, long)]
    pub quiet: bool,

    /// Echo the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,

    /// Input file (reads stdin when absent)
    pub input: Option<PathBuf>,
}
