mod commands;
mod render;
mod store;
mod transport;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use resources::listing::ListError;
use resources::mutation::MutationFailure;
use resources::table::InvalidPageSize;
use resources::{ApiClient, ApiError, ResourceKind, SessionContext, SessionError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::store::FileStore;
use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
    #[error("{}", .0.message)]
    List(ListError),
    #[error("{}", describe_failure(.0))]
    Mutation(Box<MutationFailure>),
    #[error("invalid input:\n{0}")]
    Validation(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("not signed in; run `tourdesk login` first")]
    NotSignedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("--data must be a JSON object")]
    NotAnObject,
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write to stdout failed: {0}")]
    Stdout(#[source] std::io::Error),
    #[error(transparent)]
    PageSize(#[from] InvalidPageSize),
    #[error("invalid filter `{0}`; expected column=query")]
    InvalidFilter(String),
    #[error("{kind} has no column `{column}`")]
    UnknownColumn { kind: ResourceKind, column: String },
    #[error("{kind} cannot be sorted by `{column}`")]
    UnsortableColumn { kind: ResourceKind, column: String },
}

impl CliError {
    /// Route the web dashboard would navigate to; set when the backend
    /// rejected the session.
    fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::Api(err) => err.redirect(),
            Self::List(err) => err.redirect,
            Self::Mutation(failure) => failure.redirect,
            _ => None,
        }
    }
}

fn describe_failure(failure: &MutationFailure) -> String {
    let mut out = failure.toast.message.clone();
    for (field, message) in &failure.field_errors {
        out.push_str(&format!("\n  {field}: {message}"));
    }
    out
}

impl From<MutationFailure> for CliError {
    fn from(failure: MutationFailure) -> Self {
        Self::Mutation(Box::new(failure))
    }
}

#[derive(Parser, Debug)]
#[command(name = "tourdesk", about = "Tour operator admin dashboard on the command line")]
struct Cli {
    #[arg(long, env = "TOURDESK_API_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Where the signed-in session is kept between invocations.
    #[arg(long, env = "TOURDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "TOURDESK_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TOURDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a customer account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TOURDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    List(ListArgs),
    Get {
        resource: ResourceKind,
        id: i64,
        #[arg(long)]
        json: bool,
    },
    Create(WriteArgs),
    /// Merge `--data` over the stored record and save it.
    Update {
        resource: ResourceKind,
        id: i64,
        #[arg(long, default_value = "{}")]
        data: String,
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },
    /// Delete one or more records, then show what remains.
    Delete {
        resource: ResourceKind,
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },
    /// The signed-in customer's bookings, newest first.
    Bookings {
        #[arg(long)]
        json: bool,
    },
    /// Write the selected (or all filtered) rows as CSV.
    Export(ExportArgs),
    Asset(AssetCommand),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    pub resource: ResourceKind,
    /// `column=query`, or just `query` for the default search column.
    #[arg(long)]
    pub filter: Option<String>,
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// 1-based.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = resources::table::DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    /// Show details, text and assets under each row.
    #[arg(long)]
    pub expand: bool,
    #[arg(long, conflicts_with = "expand")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    pub resource: ResourceKind,
    /// JSON object, or `@path` to read it from a file.
    #[arg(long, default_value = "{}")]
    pub data: String,
    /// Files to attach once the record is saved.
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    pub resource: ResourceKind,
    #[arg(long)]
    pub filter: Option<String>,
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Export only these ids.
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<i64>,
    /// Defaults to stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AssetCommand {
    #[command(subcommand)]
    pub command: AssetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AssetSubcommand {
    Upload {
        resource: ResourceKind,
        id: i64,
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },
    /// Delete an asset by its file URL.
    Delete { url: String },
}

/// Everything a command needs: the API client and the stored session.
pub struct App {
    pub client: ApiClient<ReqwestTransport>,
    pub session: SessionContext<FileStore>,
}

impl App {
    pub fn base_url(&self) -> &str {
        self.client.transport().base_url()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let store = FileStore::new(cli.session_file.unwrap_or_else(FileStore::default_path));
    let session = SessionContext::restore(store);
    let client = ApiClient::new(ReqwestTransport::new(&cli.base_url)).with_token(session.token().map(ToOwned::to_owned));
    let mut app = App { client, session };

    match commands::run(&mut app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.redirect().is_some() && app.session.is_authenticated() {
                app.session.logout();
                tracing::warn!(path = %app.session.store().path().display(), "cleared rejected session");
            }
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
