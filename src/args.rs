use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "minic", about = "Checks that a program is syntactically well formed")]
pub struct Args {
    /// Print every token before parsing
    #[structopt(long)]
    pub tokens: bool,

    /// Source file to check. Starts an interactive prompt when omitted.
    #[structopt(name = "FILE_NAME", parse(from_os_str))]
    pub file_name: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self::new()
    }
}

impl Args {
    pub fn new() -> Self {
        Self::from_args()
    }
}
