use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use speak_coach::{
    AnalysisRequestClient, Config, EndpointResolver, FeedbackView, InteractionParameters,
    NullOutput, PlaybackAgent, VoiceSession, WavFileDevice,
};
use tracing::info;

/// Run one speaking-practice interaction: capture a WAV file, upload it for
/// analysis and print the rendered feedback.
#[derive(Parser, Debug)]
#[command(name = "speak-coach")]
struct Args {
    /// WAV file standing in for the microphone capture
    audio: PathBuf,

    /// Tutor personality id
    #[arg(long, default_value = "friendly")]
    personality: String,

    /// Proficiency tier id
    #[arg(long, default_value = "intermediate")]
    level: String,

    /// Playback voice override id
    #[arg(long)]
    voice_id: Option<String>,

    /// Bearer token; omit for an anonymous request
    #[arg(long)]
    token: Option<String>,

    /// Config file path (without extension)
    #[arg(long, default_value = "config/speak-coach")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let cfg = Config::load(&args.config).context("Failed to load config")?;

    info!("{} starting", cfg.service.name);
    info!("Analysis endpoint: {}", cfg.base_url());

    let device = WavFileDevice::new(
        &args.audio,
        cfg.capture.sample_rate,
        cfg.capture.fragment_bytes,
    );
    let client = AnalysisRequestClient::new(Arc::new(cfg));
    let playback = PlaybackAgent::new(Box::new(NullOutput));

    let mut session = VoiceSession::new(Box::new(device), Arc::new(client), playback);

    let params = InteractionParameters {
        personality: args.personality,
        user_level: args.level,
        voice_id: args.voice_id,
        auth_token: args.token,
    };

    session.start().await?;
    session.stop(params).await?;

    if let Some(view) = session.feedback() {
        print_feedback(view);
    }

    Ok(())
}

fn print_feedback(view: &FeedbackView) {
    println!("You said: {}", view.transcript);

    if let Some(correction) = &view.correction {
        println!("Correction: {}", correction);
    }

    println!(
        "Pronunciation: {} ({:?})",
        view.score, view.tier
    );

    if !view.pronunciation_feedback.is_empty() {
        println!("  {}", view.pronunciation_feedback);
    }

    if view.shows_phonemes() {
        println!("  Practice these sounds: {}", view.phonemes.join(" "));
    }

    println!("Tip: {}", view.learning_tip);
    println!("Next: {}", view.follow_up_question);
}
