use clap::{Parser, Subcommand};
use forge_blobstore::LocalBlobStore;
use forge_core::{
    ContentService, CoreConfig, FileBody, FsRecordStore, Node, RepositoryRecord,
};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "Forge repository content CLI")]
struct Cli {
    /// Directory holding repository records and uploaded blobs
    #[arg(long, default_value = "forge-data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new repository
    Init {
        /// Repository name
        name: String,
        /// Repository description
        #[arg(long, default_value = "")]
        description: String,
        /// Mark the repository as private
        #[arg(long)]
        private: bool,
    },
    /// List all repositories
    List,
    /// Delete a repository
    RmRepo {
        /// Repository UUID
        repo: Uuid,
    },
    /// Add a file with optional inline content at the repository root
    AddFile {
        /// Repository UUID
        repo: Uuid,
        /// File name
        name: String,
        /// Inline text content
        #[arg(long)]
        content: Option<String>,
    },
    /// Add an empty folder at the repository root
    AddFolder {
        /// Repository UUID
        repo: Uuid,
        /// Folder name
        name: String,
    },
    /// Upload a local file into a folder path, creating folders as needed
    Upload {
        /// Repository UUID
        repo: Uuid,
        /// Local file to upload
        file: PathBuf,
        /// Target folder path inside the repository (empty for root)
        #[arg(long, default_value = "")]
        path: String,
        /// MIME type recorded with the blob
        #[arg(long, default_value = "application/octet-stream")]
        content_type: String,
    },
    /// List the entries of a folder
    Browse {
        /// Repository UUID
        repo: Uuid,
        /// Folder path (empty for root)
        #[arg(default_value = "")]
        path: String,
    },
    /// Print a file's inline content or its blob URL
    Cat {
        /// Repository UUID
        repo: Uuid,
        /// File path including the file name
        path: String,
    },
    /// Delete a file
    RmFile {
        /// Repository UUID
        repo: Uuid,
        /// File path including the file name
        path: String,
    },
    /// Delete a folder and everything inside it
    RmFolder {
        /// Repository UUID
        repo: Uuid,
        /// Folder path including the folder name
        path: String,
    },
}

fn print_record(record: &RepositoryRecord) {
    let visibility = if record.is_private { "private" } else { "public" };
    println!(
        "ID: {}, Name: {}, Visibility: {}, Version: {}",
        record.id, record.name, visibility, record.version
    );
}

fn print_nodes(nodes: &[Node]) {
    if nodes.is_empty() {
        println!("(empty)");
        return;
    }
    for node in nodes {
        match node {
            Node::Folder(folder) => println!(
                "{}/  ({} entries, {})",
                folder.name,
                folder.children.len(),
                folder.last_change
            ),
            Node::File(file) => {
                let body = match &file.body {
                    None => "empty".to_string(),
                    Some(FileBody::Inline { content }) => format!("{} bytes inline", content.len()),
                    Some(FileBody::Blob(blob)) => format!("{} bytes at {}", blob.size_bytes, blob.url),
                };
                println!("{}  ({body}, {})", file.name, file.last_change);
            }
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::new(cli.data_dir)?;
    let records = Arc::new(FsRecordStore::new(config.records_dir()));
    let blobs = Arc::new(LocalBlobStore::new(config.blobs_dir())?);
    let service = ContentService::new(records, blobs);

    match cli.command {
        Commands::Init {
            name,
            description,
            private,
        } => {
            let record = service.create_repository(&name, &description, private).await?;
            println!("Created repository {} with ID: {}", record.name, record.id);
        }
        Commands::List => {
            let repositories = service.list_repositories().await?;
            if repositories.is_empty() {
                println!("No repositories found.");
            } else {
                for record in &repositories {
                    print_record(record);
                }
            }
        }
        Commands::RmRepo { repo } => {
            service.delete_repository(repo).await?;
            println!("Deleted repository {repo}");
        }
        Commands::AddFile { repo, name, content } => {
            let files = service.add_file(repo, &name, content).await?;
            println!("Added file {name}");
            print_nodes(&files);
        }
        Commands::AddFolder { repo, name } => {
            let files = service.add_folder(repo, &name).await?;
            println!("Added folder {name}");
            print_nodes(&files);
        }
        Commands::Upload {
            repo,
            file,
            path,
            content_type,
        } => {
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or("upload source must be a named file")?
                .to_string();
            let bytes = tokio::fs::read(&file).await?;
            service
                .upload_file(repo, &path, &name, &bytes, &content_type)
                .await?;
            println!("Uploaded {name} ({} bytes) to '{path}'", bytes.len());
        }
        Commands::Browse { repo, path } => {
            let children = service.browse(repo, &path).await?;
            print_nodes(&children);
        }
        Commands::Cat { repo, path } => {
            let content = service.read_file(repo, &path).await?;
            if let Some(text) = content.content {
                println!("{text}");
            } else if let Some(url) = content.url {
                println!("{url}");
            }
        }
        Commands::RmFile { repo, path } => {
            service.delete_file(repo, &path).await?;
            println!("Deleted file {path}");
        }
        Commands::RmFolder { repo, path } => {
            service.delete_folder(repo, &path).await?;
            println!("Deleted folder {path}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    run(Cli::parse()).await
}
