//! Username → directory record resolution.
//!
//! Pipeline for one identifier:
//!
//! ```text
//! finger name host ──▶ full name? ──▶ directory search (full name)
//!                                          │ empty
//!                                          ▼
//!                                  directory search (username)
//!                                          │
//!                       refine_by_name ◀───┴───▶ refine_by_identifier
//!                                          │
//!                                          ▼
//!                               record + full_name
//! ```
//!
//! Every network step can fail; a failure only means that step found
//! nothing. The only visible outcome besides a record is "not found".

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{Config, DirectoryBackend};
use crate::directory::Directory;
use crate::finger::{parse_full_name, FingerClient, FingerDirectory};
use crate::models::{local_part, CandidateRecord, ResolvedIdentity};
use crate::names::flip_full_name;
use crate::parse::ResponseFormat;
use crate::refine::{refine_by_identifier, refine_by_name};
use crate::transport::ProtocolLookup;
use crate::webdir::WebDirectory;

/// Resolves usernames against a name-lookup host and a directory.
pub struct Resolver {
    lookup: Box<dyn ProtocolLookup>,
    name_host: String,
    directory: Directory,
}

impl Resolver {
    pub fn new(
        lookup: Box<dyn ProtocolLookup>,
        name_host: impl Into<String>,
        directory: Directory,
    ) -> Self {
        Self {
            lookup,
            name_host: name_host.into(),
            directory,
        }
    }

    /// Builds the finger client and the configured directory backend.
    pub fn from_config(config: &Config) -> Result<Self> {
        let finger = FingerClient::new(config.finger.port, config.finger.timeout());

        let directory = match config.directory.backend {
            DirectoryBackend::Web => {
                let url = config.directory.endpoint()?;
                let web = WebDirectory::new(
                    url,
                    &config.directory.options,
                    &config.directory.user_agent,
                )
                .context("Failed to build HTTP client for the web directory")?;
                Directory::new(Box::new(web), ResponseFormat::Html)
            }
            DirectoryBackend::Finger => {
                let backend = FingerDirectory::new(finger.clone(), &config.directory.finger_host);
                Directory::new(Box::new(backend), ResponseFormat::Text)
            }
        };

        Ok(Self::new(Box::new(finger), &config.finger.host, directory))
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Looks up the full name registered for `user_name` on the name host.
    pub fn full_name(&self, user_name: &str) -> Option<String> {
        let user_name = user_name.to_lowercase();
        match self.lookup.lookup(&user_name, &self.name_host) {
            Ok(response) => parse_full_name(&response),
            Err(e) => {
                debug!(user = %user_name, host = %self.name_host, error = %e, "name lookup failed");
                None
            }
        }
    }

    /// Resolves `identifier` (a username or e-mail address) to one record.
    pub fn resolve(&self, identifier: &str) -> Option<ResolvedIdentity> {
        let user_name = identifier.to_lowercase();
        let full_name = self.full_name(&user_name);
        debug!(user = %user_name, full_name = ?full_name, "starting resolution");

        let mut candidates = match &full_name {
            Some(name) => self.directory.search(name),
            None => Vec::new(),
        };
        if candidates.is_empty() {
            candidates = self.directory.search(&user_name);
        }

        let resolved = self.refine(&candidates, full_name.as_deref(), local_part(&user_name));
        let Some(record) = resolved else {
            info!(user = %user_name, candidates = candidates.len(), "not found");
            return None;
        };

        let full_name = match full_name {
            Some(name) => name,
            None => flip_full_name(record.name().unwrap_or_default()),
        };
        info!(user = %user_name, full_name = %full_name, "resolved");
        Some(ResolvedIdentity::merge(record, full_name))
    }

    fn refine(
        &self,
        candidates: &[CandidateRecord],
        full_name: Option<&str>,
        local: &str,
    ) -> Option<CandidateRecord> {
        full_name
            .and_then(|name| refine_by_name(&self.directory, candidates, name))
            .or_else(|| refine_by_identifier(&self.directory, candidates, local))
    }
}

/// CLI entry point: resolve and print, exiting non-zero when not found.
pub fn run_resolve(config: &Config, identifier: &str, json: bool) -> Result<()> {
    let resolver = Resolver::from_config(config)?;
    match resolver.resolve(identifier) {
        Some(identity) => {
            print_record(identity.record(), json)?;
            Ok(())
        }
        None => {
            eprintln!("not found: {}", identifier);
            std::process::exit(1);
        }
    }
}

/// CLI entry point: print the full name registered for `user_name`.
pub fn run_name(config: &Config, user_name: &str) -> Result<()> {
    let resolver = Resolver::from_config(config)?;
    match resolver.full_name(user_name) {
        Some(name) => {
            println!("{}", name);
            Ok(())
        }
        None => {
            eprintln!("no full name for: {}", user_name);
            std::process::exit(1);
        }
    }
}

/// CLI entry point: print every candidate a raw directory search returns.
pub fn run_search(config: &Config, query: &str, json: bool) -> Result<()> {
    let resolver = Resolver::from_config(config)?;
    let candidates = resolver.directory().search(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }
    if candidates.is_empty() {
        println!("No results.");
        return Ok(());
    }
    for (i, candidate) in candidates.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_record(candidate, false)?;
    }
    Ok(())
}

/// CLI entry point: print a raw finger response.
pub fn run_finger(config: &Config, query: &str, host: Option<&str>) -> Result<()> {
    let client = FingerClient::new(config.finger.port, config.finger.timeout());
    let host = host.unwrap_or(&config.finger.host);
    let response = client
        .lookup(query, host)
        .with_context(|| format!("finger {}@{} failed", query, host))?;
    print!("{}", response);
    Ok(())
}

fn print_record(record: &CandidateRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }
    let width = record.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in record.iter() {
        println!("{:<width$}  {}", format!("{}:", key), value, width = width + 1);
    }
    Ok(())
}
