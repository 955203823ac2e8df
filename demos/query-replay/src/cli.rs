#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the logger configuration (JSON). Defaults apply when omitted.
    #[clap(short, long, env = "DB_QUERY_LOGGER_CONFIG", value_name = "PATH")]
    pub config: Option<std::path::PathBuf>,

    /// Connection name attached to every replayed query.
    #[clap(long, default_value = "replay")]
    pub connection: String,

    /// Tab-separated query file: `sql<TAB>bindings-json<TAB>ms`. Reads stdin when omitted.
    #[clap(value_name = "FILE")]
    pub input: Option<std::path::PathBuf>,

    /// Enable verbose informational messages.
    #[clap(long, default_value = "false")]
    pub verbose: bool,
}

impl Args {
    pub fn config(&self) -> Option<&std::path::Path> {
        self.config.as_deref()
    }

    pub fn input(&self) -> Option<&std::path::Path> {
        self.input.as_deref()
    }
}
