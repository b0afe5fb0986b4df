use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use captext::{ApiConfig, FetchOpts, Fetcher, Outcome, OutputType, TranscriptApiClient};

fn main() {
    captext::init_logging();
    let params = Params::parse();

    let output = params.output;
    let outcome = run(params.command);

    let stdout = io::stdout();
    let stderr = io::stderr();
    if let Err(err) = output.write(&outcome, &mut stdout.lock(), &mut stderr.lock()) {
        error!(error = %err, "failed to write result");
        std::process::exit(1);
    }

    std::process::exit(outcome.exit_code());
}

#[derive(Parser, Debug)]
#[command(name = "captext")]
#[command(about = "Extract plain-text transcripts from captions")]
struct Params {
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        global = true,
        default_value_t = OutputType::Json
    )]
    output: OutputType,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a WebVTT caption file into plain text.
    Vtt {
        /// Path to the `.vtt` file.
        path: PathBuf,
    },

    /// Fetch a transcript from the remote caption service.
    ///
    /// Reads `TRANSCRIPT_API_KEY` (and optionally `TRANSCRIPT_API_URL`) from the environment.
    Fetch {
        /// Video URL or bare video id.
        video: String,

        /// Preferred caption language; repeat for fallbacks.
        #[arg(short = 'l', long = "lang", default_value = "en")]
        languages: Vec<String>,

        /// Reject transcripts shorter than this many characters.
        #[arg(long = "min-chars", default_value_t = 0)]
        min_chars: usize,
    },
}

fn run(command: Command) -> Outcome {
    match command {
        Command::Vtt { path } => captext::clean_vtt_file(&path),
        Command::Fetch {
            video,
            languages,
            min_chars,
        } => {
            let opts = FetchOpts {
                languages,
                min_transcript_chars: min_chars,
            };
            match build_fetcher() {
                Ok(fetcher) => fetcher.fetch_outcome(&video, &opts),
                Err(err) => Outcome::failure(format!("{err:#}")),
            }
        }
    }
}

fn build_fetcher() -> Result<Fetcher<TranscriptApiClient>> {
    let config = ApiConfig::from_env()?;
    let client = TranscriptApiClient::new(config)?;
    Ok(Fetcher::new(client))
}
