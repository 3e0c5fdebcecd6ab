use clap::Parser;
use log::info;
use skilltree_transcript::{
    ExportConfig, ExportError, FixtureSource, TranscriptExporter, TranscriptRequest, UserIdentity,
};
use std::path::PathBuf;

/// Export a user's progress transcript as a tagged PDF.
#[derive(Parser, Debug)]
#[command(name = "transcript", version, about)]
struct Args {
    /// JSON document with projectSummary, subjectSummaries and badgeSummaries
    #[arg(long)]
    data: PathBuf,

    /// Output file, or a directory to write "<project> - <user> - Transcript.pdf" into
    #[arg(long)]
    output: PathBuf,

    #[arg(long)]
    user_id: String,

    #[arg(long)]
    nickname: Option<String>,

    #[arg(long, default_value = "project")]
    project_id: String,

    /// Export configuration (JSON, camelCase keys)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), ExportError> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExportConfig::from_path(path)?,
        None => ExportConfig::default(),
    };
    let source = FixtureSource::load(&args.data).await?;

    let mut user = UserIdentity::new(&args.user_id);
    if let Some(nickname) = &args.nickname {
        user = user.with_nickname(nickname);
    }
    let request = TranscriptRequest::new(&args.project_id, user);

    info!("Exporting transcript for '{}' from {}", args.user_id, args.data.display());
    let pdf = TranscriptExporter::new(config)
        .export(&source, &request)
        .await?;
    let written = pdf.write_to(&args.output).await?;

    println!("Wrote {} pages to {}", pdf.page_count, written.display());
    Ok(())
}
