//! quill CLI - serve a directory of Markdown as a personal blog.

mod output;

use std::path::PathBuf;

use clap::Parser;
use quill_server::{ServerConfig, SocialLink, run_server};
use tracing_subscriber::EnvFilter;

use output::Output;

/// Default display name when `--name` is not given.
const DEFAULT_NAME: &str = "quill";

/// quill - self-hosted Markdown blog server.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Content directory to serve.
    #[arg(short = 'd', long = "datadir", default_value = "contents")]
    datadir: PathBuf,

    /// Host address to bind to.
    #[arg(short = 'a', long = "address", default_value = "0.0.0.0")]
    address: String,

    /// Port to listen on.
    #[arg(short = 'p', long = "port", default_value_t = 8080)]
    port: u16,

    /// Display name shown on the blog (multiple words allowed).
    #[arg(short = 'n', long = "name", num_args = 1..)]
    name: Vec<String>,

    /// Path to the profile picture.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Social link in the form 'icon:url' (repeatable), e.g.
    /// --social fa-github:https://github.com/username
    #[arg(long = "social", value_parser = parse_social)]
    social: Vec<SocialLink>,

    /// Source repository URL linked from the sidebar.
    #[arg(long)]
    source: Option<String>,

    /// File stem to hide from listings and auto-titling (repeatable).
    #[arg(long = "ignore")]
    ignore: Vec<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let site_name = if self.name.is_empty() {
            DEFAULT_NAME.to_owned()
        } else {
            self.name.join(" ")
        };

        ServerConfig {
            host: self.address,
            port: self.port,
            data_dir: self.datadir,
            site_name,
            profile_image: self.image,
            social_links: self.social,
            source_repo: self.source,
            ignored_files: self.ignore,
        }
    }
}

/// Parse an `icon:url` social link argument.
fn parse_social(value: &str) -> Result<SocialLink, String> {
    match value.split_once(':') {
        Some((icon, url)) if !icon.is_empty() && !url.is_empty() => Ok(SocialLink {
            icon: icon.to_owned(),
            url: url.to_owned(),
        }),
        _ => Err(format!("invalid social link '{value}', expected 'icon:url'")),
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.into_config();

    output.info(&format!(
        "Serving {} on http://{}:{}",
        config.data_dir.display(),
        config.host,
        config.port
    ));
    if let Some(image) = &config.profile_image {
        output.info(&format!("Profile picture: {}", image.display()));
    }
    for link in &config.social_links {
        output.info(&format!("Social link: {} -> {}", link.icon, link.url));
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    if let Err(err) = rt.block_on(run_server(config)) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_social_valid() {
        let link = parse_social("fa-github:https://github.com/someone").unwrap();

        assert_eq!(link.icon, "fa-github");
        assert_eq!(link.url, "https://github.com/someone");
    }

    #[test]
    fn test_parse_social_invalid() {
        assert!(parse_social("no-separator").is_err());
        assert!(parse_social(":missing-icon").is_err());
        assert!(parse_social("missing-url:").is_err());
    }

    #[test]
    fn test_multi_word_name_is_joined() {
        let cli = Cli::parse_from(["quill", "--name", "Mike", "Wazowski"]);
        let config = cli.into_config();

        assert_eq!(config.site_name, "Mike Wazowski");
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["quill"]);
        let config = cli.into_config();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("contents"));
        assert_eq!(config.site_name, DEFAULT_NAME);
        assert!(config.social_links.is_empty());
    }

    #[test]
    fn test_repeated_social_links_keep_order() {
        let cli = Cli::parse_from([
            "quill",
            "--social",
            "fa-github:https://github.com/a",
            "--social",
            "fa-mastodon:https://example.social/@a",
        ]);
        let config = cli.into_config();

        assert_eq!(config.social_links.len(), 2);
        assert_eq!(config.social_links[0].icon, "fa-github");
        assert_eq!(config.social_links[1].icon, "fa-mastodon");
    }
}
