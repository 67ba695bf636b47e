use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use meetscribe::config::AppConfig;
use meetscribe::pipeline::Pipeline;
use meetscribe::remote::{S3Store, TranscribeJobs};
use meetscribe::Error;

#[derive(Parser)]
#[command(name = "meetscribe")]
#[command(version)]
#[command(about = "Transcribe an audio file via S3 and Amazon Transcribe")]
struct Cli {
    /// Path to the input audio file (mp3, mp4, m4a, wav, flac, ogg, amr, webm).
    #[arg(short = 'f', long = "input")]
    input: PathBuf,

    /// Path to the output text file.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// S3 bucket used for the media upload and the job output.
    #[arg(short = 'b', long = "bucket")]
    bucket: String,

    /// AWS region.
    #[arg(short = 'r', long = "region", default_value = "us-east-1")]
    region: String,

    /// Language code for transcription.
    #[arg(short = 'l', long = "language", default_value = "en-US")]
    language: String,

    /// Enable speaker diarization.
    #[arg(short = 'd', long = "diarization")]
    diarization: bool,

    /// Maximum number of speakers for diarization.
    #[arg(short = 'm', long = "max-speakers", default_value_t = 10)]
    max_speakers: i32,

    /// Re-run transcription even if a job already exists for this file.
    #[arg(long)]
    force: bool,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        AppConfig {
            input_path: self.input,
            output_path: self.output,
            bucket: self.bucket,
            region: self.region,
            language_code: self.language,
            diarization: self.diarization,
            max_speakers: self.max_speakers,
            force: self.force,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Cli::parse().into_config();

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;

    let pipeline = Pipeline::new(
        S3Store::new(&sdk_config),
        TranscribeJobs::new(&sdk_config),
        config,
    );

    // Ctrl+C cancels the run; the poll loop reports it as a distinct outcome
    // instead of writing partial output.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received; cancelling");
            signal_cancel.cancel();
        }
    });

    match pipeline.run(&cancel).await {
        Ok(()) => Ok(()),
        Err(Error::Cancelled) => {
            info!("transcription cancelled");
            std::process::exit(130);
        }
        Err(e) => Err(e).context("could not transcribe audio"),
    }
}
