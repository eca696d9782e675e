// file: src/release.rs
// description: version bump, registry lookup, and publish orchestration
// reference: crates.io API and gh/git tooling

use crate::error::{Result, SdnError};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;
use tracing::{info, warn};

/// Env var that pins the release version, bypassing the bump computation.
pub const VERSION_ENV: &str = "OFAC_ADDRESSES_VERSION";

/// Env var selecting the bump type when no explicit version is given.
pub const BUMP_ENV: &str = "OFAC_ADDRESSES_BUMP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BumpType {
    Major,
    Minor,
    #[default]
    Patch,
}

impl FromStr for BumpType {
    type Err = SdnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(BumpType::Major),
            "minor" => Ok(BumpType::Minor),
            "patch" => Ok(BumpType::Patch),
            other => Err(SdnError::Config(format!("unknown bump type: {other}"))),
        }
    }
}

/// Three-component release version.
///
/// Parsing is deliberately lenient: missing or non-numeric components read as
/// zero, so a registry answering with an odd version string still bumps
/// sanely instead of aborting the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const ZERO: Version = Version { major: 0, minor: 0, patch: 0 };

    pub fn bump(self, bump: BumpType) -> Version {
        match bump {
            BumpType::Major => Version { major: self.major + 1, minor: 0, patch: 0 },
            BumpType::Minor => Version { major: self.major, minor: self.minor + 1, patch: 0 },
            BumpType::Patch => Version { patch: self.patch + 1, ..self },
        }
    }

    pub fn tag_name(&self) -> String {
        format!("v{self}")
    }
}

impl FromStr for Version {
    type Err = SdnError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('.').map(|p| p.trim().parse::<u64>().unwrap_or(0));
        Ok(Version {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Deserialize)]
struct RegistryCrateResponse {
    #[serde(rename = "crate")]
    krate: RegistryCrate,
}

#[derive(Debug, Deserialize)]
struct RegistryCrate {
    max_version: String,
}

/// Looks up the latest published version of `crate_name` on a crates.io-style
/// registry. An unpublished crate (404) reads as 0.0.0.
pub async fn latest_published_version(registry_url: &str, crate_name: &str) -> Result<Version> {
    let url = format!("{}/api/v1/crates/{}", registry_url.trim_end_matches('/'), crate_name);
    let client = Client::new();

    let response = client
        .get(&url)
        .header("User-Agent", concat!("ofac_addresses/", env!("CARGO_PKG_VERSION")))
        .send()
        .await?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        warn!("crate {} not yet published, starting from 0.0.0", crate_name);
        return Ok(Version::ZERO);
    }
    if !response.status().is_success() {
        return Err(SdnError::Status(response.status()));
    }

    let body: RegistryCrateResponse = response.json().await?;
    body.krate.max_version.parse()
}

/// Resolves the version for this release: an explicit override wins, otherwise
/// the latest published version is bumped.
pub async fn resolve_version(
    explicit: Option<Version>,
    registry_url: &str,
    crate_name: &str,
    bump: BumpType,
) -> Result<Version> {
    if let Some(version) = explicit {
        return Ok(version);
    }
    let current = latest_published_version(registry_url, crate_name).await?;
    Ok(current.bump(bump))
}

/// Release notes published alongside the tag.
pub fn release_notes(version: Version, address_count: usize) -> String {
    let date = chrono::Utc::now().format("%Y-%m-%d");
    format!(
        "## Release v{version} ({date})\n\n\
         ### Summary\n\
         - Updated OFAC sanctioned Bitcoin addresses\n\
         - Total addresses: **{address_count}**\n\
         - Data source: [OFAC SDN List](https://sanctionslistservice.ofac.treas.gov/)\n\n\
         ### Installation\n\
         ```bash\n\
         cargo add ofac_addresses@{version}\n\
         ```\n"
    )
}

lazy_static! {
    static ref MANIFEST_VERSION: Regex =
        Regex::new(r#"(?m)^version = "[^"]*"$"#).expect("MANIFEST_VERSION regex is valid");
}

/// Executes the commit/tag/publish flow against the working tree.
pub struct ReleasePipeline {
    remote: String,
    dry_run: bool,
    planned: RefCell<Vec<String>>,
}

impl ReleasePipeline {
    pub fn new(remote: impl Into<String>, dry_run: bool) -> Self {
        Self {
            remote: remote.into(),
            dry_run,
            planned: RefCell::new(Vec::new()),
        }
    }

    /// Steps a dry run would have executed, in order.
    pub fn planned_commands(&self) -> Vec<String> {
        self.planned.borrow().clone()
    }

    /// Rewrites the package version in the manifest at `path`.
    pub fn set_manifest_version(&self, path: &Path, version: Version) -> Result<()> {
        let manifest = std::fs::read_to_string(path)?;
        if !MANIFEST_VERSION.is_match(&manifest) {
            return Err(SdnError::Release(format!(
                "no version field found in {}",
                path.display()
            )));
        }
        let updated =
            MANIFEST_VERSION.replace(&manifest, format!(r#"version = "{version}""#));

        if self.dry_run {
            self.planned.borrow_mut().push(format!("set-version {version}"));
            info!("dry-run: would set {} to version {}", path.display(), version);
            return Ok(());
        }
        std::fs::write(path, updated.as_ref())?;
        info!("set {} to version {}", path.display(), version);
        Ok(())
    }

    /// Commits the manifest change, tags the release, and pushes both.
    pub fn commit_and_tag(&self, version: Version) -> Result<String> {
        let tag = version.tag_name();
        self.run("git", &["add", "Cargo.toml"])?;
        self.run("git", &["commit", "-m", &format!("chore: release {tag}")])?;
        self.run("git", &["tag", &tag])?;
        self.run("git", &["push", &self.remote, "HEAD", "--tags"])?;
        Ok(tag)
    }

    pub fn publish_crate(&self) -> Result<()> {
        self.run("cargo", &["publish"])
    }

    /// Creates the hosted release with generated notes.
    pub fn create_release(&self, version: Version, address_count: usize) -> Result<String> {
        let tag = version.tag_name();
        let notes = release_notes(version, address_count);
        self.run(
            "gh",
            &["release", "create", &tag, "--title", &tag, "--notes", &notes],
        )?;
        Ok(tag)
    }

    /// Full pipeline: persist the version, commit and tag, publish, release.
    ///
    /// The manifest change must be committed before `cargo publish`, which
    /// refuses a dirty working tree.
    pub fn run_all(&self, manifest: &Path, version: Version, address_count: usize) -> Result<()> {
        info!(
            "releasing v{} with {} snapshot addresses",
            version, address_count
        );
        self.set_manifest_version(manifest, version)?;
        let tag = self.commit_and_tag(version)?;
        self.publish_crate()?;
        self.create_release(version, address_count)?;
        info!("release {} complete", tag);
        Ok(())
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        if self.dry_run {
            self.planned
                .borrow_mut()
                .push(format!("{} {}", program, args.join(" ")));
            info!("dry-run: {} {}", program, args.join(" "));
            return Ok(());
        }

        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            return Err(SdnError::Release(format!(
                "{} {} failed: {}",
                program,
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}
