mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use imagevault::config::{self, Config};
use imagevault::coordinator::ImageService;
use imagevault::normalize::Normalizer;
use imagevault_blob::FsBlobStore;
use imagevault_common::ImageId;
use imagevault_db::pool::init_pool;
use imagevault_db::SqliteMetadataStore;

fn build_service(config: &Config) -> Result<ImageService> {
    std::fs::create_dir_all(&config.storage.data_dir).with_context(|| {
        format!(
            "Failed to create data directory: {:?}",
            config.storage.data_dir
        )
    })?;

    let db_path = config.storage.db_path();
    tracing::info!("Initializing database at {}", db_path.display());
    let pool = init_pool(&db_path.to_string_lossy())?;

    let blobs = Arc::new(FsBlobStore::new(config.storage.blob_root()));
    let metadata = Arc::new(SqliteMetadataStore::new(pool));
    let normalizer = Normalizer::new(
        config.normalize.width,
        config.normalize.height,
        config.normalize.format,
    );

    Ok(ImageService::new(blobs, metadata, normalizer))
}

/// Guess a content type from the file extension, for when none was declared.
fn guess_content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

async fn upload(
    config: &Config,
    file: &Path,
    name: Option<String>,
    content_type: Option<String>,
) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("Input file does not exist: {:?}", file);
    }

    let data = std::fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    let name = name.unwrap_or_else(|| {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string())
    });
    let content_type = content_type.unwrap_or_else(|| guess_content_type(file).to_string());

    let service = build_service(config)?;
    let id = service.upload(data, &name, &content_type).await?;
    println!("{}", id);
    Ok(())
}

/// Default output path for `get`: the recorded name is opaque and may contain
/// separators, so only its file-name component is used.
fn default_output_path(original_name: &str, id: ImageId) -> PathBuf {
    Path::new(original_name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(id.to_string()))
}

async fn get(config: &Config, id: &str, output: Option<&Path>) -> Result<()> {
    let id = ImageId::parse(id).with_context(|| format!("Invalid image id: {}", id))?;

    let service = build_service(config)?;
    let image = service.retrieve(id).await?;

    let out_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_path(&image.original_name, id));
    std::fs::write(&out_path, &image.data)
        .with_context(|| format!("Failed to write {:?}", out_path))?;

    println!("{} ({}) -> {:?}", image.original_name, image.content_type, out_path);
    Ok(())
}

async fn delete(config: &Config, id: &str) -> Result<()> {
    let id = ImageId::parse(id).with_context(|| format!("Invalid image id: {}", id))?;

    let service = build_service(config)?;
    service.delete(id).await?;
    println!("deleted {}", id);
    Ok(())
}

fn validate(path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(path)?;
    println!(
        "Config OK: data dir {:?}, normalize {}x{}",
        config.storage.data_dir, config.normalize.width, config.normalize.height
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_plain_name() {
        let id = ImageId::new();
        assert_eq!(
            default_output_path("cat.png", id),
            PathBuf::from("cat.png")
        );
    }

    #[test]
    fn test_default_output_path_strips_directories() {
        let id = ImageId::new();
        assert_eq!(
            default_output_path("../weird name 猫.png", id),
            PathBuf::from("weird name 猫.png")
        );
        assert_eq!(
            default_output_path("/etc/passwd", id),
            PathBuf::from("passwd")
        );
        assert_eq!(
            default_output_path("a/b/c.png", id),
            PathBuf::from("c.png")
        );
    }

    #[test]
    fn test_default_output_path_falls_back_to_id() {
        let id = ImageId::new();
        assert_eq!(default_output_path("..", id), PathBuf::from(id.to_string()));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("x.png")), "image/png");
        assert_eq!(guess_content_type(Path::new("x.JPG")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("x")), "application/octet-stream");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick a default based on the verbose
    // flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "imagevault=trace,imagevault_blob=debug,imagevault_db=debug".to_string()
        } else {
            "imagevault=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Upload {
            file,
            name,
            content_type,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            rt.block_on(upload(&config, &file, name, content_type))
        }
        Commands::Get { id, output } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            rt.block_on(get(&config, &id, output.as_deref()))
        }
        Commands::Delete { id } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            rt.block_on(delete(&config, &id))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate(path.as_deref())
        }
        Commands::Version => {
            println!("imagevault {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
