use std::path::PathBuf;
use std::process;

use clap::Parser;

use faceid_core::{FaceApiClient, FaceApiError, ImageSource, Region, Scheme};

/// Enrolls a person from face images, trains a group and identifies a query face.
#[derive(Parser)]
#[command(name = "faceid-demo")]
struct Cli {
    /// Face++ API key.
    key: String,

    /// Face++ API secret.
    secret: String,

    /// Name of the person to enroll.
    person: String,

    /// Use HTTPS instead of HTTP.
    #[arg(long)]
    https: bool,

    /// Use the mainland China endpoint.
    #[arg(long)]
    china: bool,

    /// Group to create, train and query.
    #[arg(long, default_value = "group_0")]
    group: String,

    /// Face image URL to attach (repeatable).
    #[arg(long = "face-url")]
    face_urls: Vec<String>,

    /// Face image file to attach (repeatable).
    #[arg(long = "face-file")]
    face_files: Vec<PathBuf>,

    /// Query image URL.
    #[arg(long, conflicts_with = "query_file")]
    query_url: Option<String>,

    /// Query image file.
    #[arg(long)]
    query_file: Option<PathBuf>,

    /// Minimum confidence (0.0-1.0) for a candidate to be reported.
    #[arg(long, default_value = "0.0")]
    threshold: f64,

    /// Keep the enrolled person and group after the run.
    #[arg(long)]
    keep: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.face_urls.is_empty() && cli.face_files.is_empty() {
        return Err("at least one --face-url or --face-file is required".into());
    }

    let client = FaceApiClient::builder(cli.key.as_str(), cli.secret.as_str())
        .region(if cli.china {
            Region::MainlandChina
        } else {
            Region::International
        })
        .scheme(if cli.https { Scheme::Https } else { Scheme::Http })
        .default_group(cli.group.as_str())
        .build()?;

    match client.create_group(None) {
        Ok(_) => log::info!("Created group {}", cli.group),
        Err(e) if e.remote_kind().is_some() => {
            log::warn!("Could not create group {} ({e}); reusing it", cli.group)
        }
        Err(e) => return Err(e.into()),
    }

    let person_id = client.enroll_person(&cli.person, None)?;
    log::info!("Enrolled {} as {person_id}", cli.person);

    let result = enroll_and_identify(&client, &cli, &person_id);

    if !cli.keep {
        cleanup(&client, &person_id);
    }
    result
}

fn enroll_and_identify(
    client: &FaceApiClient,
    cli: &Cli,
    person_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources = cli
        .face_urls
        .iter()
        .map(|url| ImageSource::Url(url))
        .chain(cli.face_files.iter().map(|path| ImageSource::File(path)));
    let faces = client.attach_faces_from_images(person_id, sources)?;
    log::info!("Attached {} face(s) to {person_id}", faces.len());

    let outcome = client.train_group(None)?;
    if !outcome.succeeded() {
        return Err(format!(
            "training session {} ended with {}",
            outcome.session_id, outcome.status
        )
        .into());
    }
    println!("Trained {} (session {})", cli.group, outcome.session_id);

    let query = match (&cli.query_url, &cli.query_file) {
        (Some(url), _) => ImageSource::Url(url),
        (None, Some(path)) => ImageSource::File(path),
        (None, None) => {
            log::info!("No query image given; skipping identification");
            return Ok(());
        }
    };

    match client.identify(None, query) {
        Ok(result) => {
            let mut reported = 0;
            for candidate in result.above(cli.threshold) {
                println!(
                    "{:>6.2}  {}  {}",
                    candidate.confidence,
                    candidate.person_id,
                    candidate.person_name.as_deref().unwrap_or("-")
                );
                reported += 1;
            }
            if reported == 0 {
                println!("No candidate above {:.2}", cli.threshold);
            }
            Ok(())
        }
        Err(FaceApiError::NoFaceDetected) => {
            println!("No face found in the query image");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cleanup(client: &FaceApiClient, person_id: &str) {
    if let Err(e) = client.delete_person(person_id) {
        log::warn!("Failed to delete person {person_id}: {e}");
    }
    if let Err(e) = client.delete_group(None) {
        log::warn!("Failed to delete group: {e}");
    }
}
