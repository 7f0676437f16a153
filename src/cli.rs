use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "relpush",
    version,
    about = "Publish built application artifacts to a self-hosted release server",
    long_about = None
)]
pub struct Args {
    /// Artifact files to upload (installers, archives)
    #[clap(required = true)]
    pub artifacts: Vec<PathBuf>,

    /// Version name for this release (e.g. 1.2.3 or 2.0.0-beta.1)
    #[clap(short = 'r', long)]
    pub release_version: String,

    /// Release server base URL
    #[clap(long, env = "RELPUSH_BASE_URL")]
    pub base_url: Option<String>,

    /// Account used to authenticate against the release server
    #[clap(long, env = "RELPUSH_USERNAME")]
    pub username: Option<String>,

    /// Password for the release server account
    #[clap(long, env = "RELPUSH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Release channel; inferred from the version string when omitted
    #[clap(long)]
    pub channel: Option<String>,

    /// Target platform identifier (darwin, linux, win32)
    /// Defaults to the running host
    #[clap(long, default_value = host_platform())]
    pub platform: String,

    /// Target CPU architecture identifier (x64, ia32, arm64)
    /// Defaults to the running host
    #[clap(long, default_value = host_arch())]
    pub arch: String,

    /// Configuration file path
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}

/// Platform identifier of the running host, in the release server's
/// inbound vocabulary (darwin, linux, win32).
pub fn host_platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        _ => std::env::consts::OS,
    }
}

/// Architecture identifier of the running host (x64, ia32, arm64).
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86" => "ia32",
        "x86_64" => "x64",
        "aarch64" => "arm64",
        _ => std::env::consts::ARCH,
    }
}
