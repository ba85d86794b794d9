// src/fetch/web.rs
// =============================================================================
// Fetches RDF documents from the web or the local disk.
//
// How it works:
// 1. Work out where the URI points: http(s), file://, or a bare local path
// 2. Download the document (reqwest) or read it (tokio::fs)
// 3. Pick the syntax from the Content-Type header or the file extension
// 4. Parse it into triples
//
// Any failure along the way becomes a FetchError. Nothing here retries.
// =============================================================================

use crate::fetch::{FetchError, Fetcher};
use crate::rdf::{parse_document, RdfFormat, Triple};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct WebFetcherConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// How many redirects to follow before giving up
    pub max_redirects: usize,
    pub user_agent: String,
    /// Whether file:// URIs and bare paths may be read. Turn this off when
    /// walking from a remote document so it cannot point the walker at
    /// local files.
    pub local_files: bool,
}

impl Default for WebFetcherConfig {
    fn default() -> Self {
        WebFetcherConfig {
            timeout: Duration::from_secs(10),
            max_redirects: 5,
            user_agent: concat!("rdf-walker/", env!("CARGO_PKG_VERSION")).to_string(),
            local_files: true,
        }
    }
}

// Where a URI points to
#[derive(Debug, PartialEq)]
enum Location {
    Http(Url),
    File { path: PathBuf, base: String },
}

#[derive(Debug, Clone)]
pub struct WebFetcher {
    client: Client,
    local_files: bool,
}

impl WebFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(WebFetcherConfig::default())
    }

    pub fn with_config(config: WebFetcherConfig) -> Result<Self, FetchError> {
        // One client for the whole walk so connections get reused
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent)
            .build()?;

        Ok(WebFetcher {
            client,
            local_files: config.local_files,
        })
    }

    async fn fetch_http(&self, url: &Url) -> Result<Vec<Triple>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, RdfFormat::ACCEPT)
            .send()
            .await?;

        // 404, 500 and friends mean "no document here"
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        // Redirects may land us on a different document; relative IRIs
        // resolve against where we ended up.
        let base = response.url().to_string();
        // The server's Content-Type decides the syntax when it names one
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let format = RdfFormat::detect(content_type.as_deref(), &base);

        // Download the body, then hand it to the parser
        let body = response.text().await?;
        debug!(uri = %url, %format, bytes = body.len(), "downloaded document");

        Ok(parse_document(&body, format, &base)?)
    }

    async fn fetch_file(&self, path: &Path, base: &str) -> Result<Vec<Triple>, FetchError> {
        // Read the whole file; a missing or unreadable file is an Io error
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        // No headers on disk, so only the extension can tell us the syntax
        let format = RdfFormat::detect(None, base);
        debug!(path = %path.display(), %format, bytes = body.len(), "read document");

        Ok(parse_document(&body, format, base)?)
    }
}

impl Fetcher for WebFetcher {
    async fn fetch(&self, uri: &str) -> Result<Vec<Triple>, FetchError> {
        match locate(uri)? {
            Location::Http(url) => self.fetch_http(&url).await,
            // Refuse before touching the disk
            Location::File { .. } if !self.local_files => {
                Err(FetchError::LocalFilesDisabled(uri.to_string()))
            }
            Location::File { path, base } => self.fetch_file(&path, &base).await,
        }
    }
}

/// True when `uri` names a file:// document or a bare local path.
pub fn is_local(uri: &str) -> bool {
    matches!(locate(uri), Ok(Location::File { .. }))
}

fn locate(uri: &str) -> Result<Location, FetchError> {
    match Url::parse(uri) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(Location::Http(url)),
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| FetchError::UnsupportedScheme("file".to_string()))?;
                Ok(Location::File {
                    path,
                    base: url.to_string(),
                })
            }
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        },
        // No scheme at all: treat it as a path on disk
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = PathBuf::from(uri);
            let absolute = if path.is_absolute() {
                path.clone()
            } else {
                std::env::current_dir()
                    .map(|dir| dir.join(&path))
                    .unwrap_or_else(|_| path.clone())
            };
            let base = Url::from_file_path(&absolute)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| uri.to_string());
            Ok(Location::File { path, base })
        }
        Err(source) => Err(FetchError::InvalidUri {
            uri: uri.to_string(),
            source,
        }),
    }
}
