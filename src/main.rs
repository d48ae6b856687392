//! Tickertape terminal client.
//!
//! Reads one message per line from stdin and streams each reply into the
//! terminal. Logs go to stderr; set `RUST_LOG` to see them.

use clap::Parser;
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tickertape::{
    FormatConfig, HttpConfig, HttpTransport, Messages, PacerConfig, SendGate, SessionConfig,
    SessionIdentity, StreamSession, TerminalConfig, TerminalSurface, Transport,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tickertape", version, about = "Stream chat replies into the terminal")]
struct Args {
    /// Chat endpoint URL.
    #[arg(long, env = "TICKERTAPE_URL", default_value = "http://127.0.0.1:8000/api/chat")]
    url: String,
    /// Milliseconds between reveal ticks. 0 reveals text as soon as it arrives.
    #[arg(long, default_value_t = 30)]
    tick_ms: u64,
    /// Grapheme clusters revealed per tick. 0 means no limit.
    #[arg(long, default_value_t = 3)]
    chars_per_tick: usize,
    /// Longest message sent, in characters.
    #[arg(long, default_value_t = 4000)]
    max_input_chars: usize,
    /// Give up on a reply after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Join fragments exactly as received.
    #[arg(long)]
    no_spacing: bool,
    /// Show `**` markers literally instead of as bold.
    #[arg(long)]
    no_format: bool,
    /// Language of user-facing messages (`en`, `ru`).
    #[arg(long, env = "TICKERTAPE_LANG", default_value = "en")]
    lang: String,
    /// Continue an existing dialog instead of starting a new one.
    #[arg(long)]
    dialog_id: Option<String>,
}

impl Args {
    fn http_config(&self) -> HttpConfig {
        HttpConfig {
            endpoint: self.url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..HttpConfig::default()
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            pacer: PacerConfig {
                tick: Duration::from_millis(self.tick_ms),
                graphemes_per_tick: self.chars_per_tick,
            },
            format: FormatConfig {
                emphasis: !self.no_format,
                ..FormatConfig::default()
            },
            spacing: !self.no_spacing,
            max_input_chars: self.max_input_chars,
            messages: Messages::for_language(&self.lang),
            ..SessionConfig::default()
        }
    }

    fn identity(&self) -> tickertape::Result<SessionIdentity> {
        match &self.dialog_id {
            Some(dialog_id) => SessionIdentity::for_dialog(dialog_id.as_str()),
            None => Ok(SessionIdentity::generate()),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> tickertape::Result<()> {
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(args.http_config())?);
    let identity = args.identity()?;
    let config = args.session_config();
    let gate = SendGate::new();
    info!(dialog_id = identity.dialog_id(), endpoint = %args.url, "starting");

    let mut surface = TerminalSurface::stdout(TerminalConfig::default());
    surface.line(&config.messages.greeting);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        surface.prompt();
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let session = StreamSession::new(
            identity.clone(),
            config.clone(),
            Arc::clone(&transport),
            gate.clone(),
        );
        let report = session.send(&line, &mut surface);
        debug!(
            state = %report.state,
            received = report.text.len(),
            ticks = report.ticks,
            "exchange finished"
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tickertape: {e}");
            ExitCode::FAILURE
        }
    }
}
