use std::path::PathBuf;

use clap::Parser;
use relpush::cli::{host_arch, host_platform, Args};

#[test]
fn test_parse_minimal() {
    let args = Args::try_parse_from(["relpush", "dist/app.zip", "--release-version", "1.2.3"])
        .unwrap();

    assert_eq!(args.artifacts, vec![PathBuf::from("dist/app.zip")]);
    assert_eq!(args.release_version, "1.2.3");
    assert_eq!(args.platform, host_platform());
    assert_eq!(args.arch, host_arch());
    assert!(args.channel.is_none());
    assert!(!args.verbose);
}

#[test]
fn test_parse_multiple_artifacts() {
    let args = Args::try_parse_from([
        "relpush",
        "out/app.zip",
        "out/app.dmg",
        "out/app.AppImage",
        "--release-version",
        "2.0.0",
    ])
    .unwrap();

    assert_eq!(args.artifacts.len(), 3);
}

#[test]
fn test_parse_requires_artifacts() {
    assert!(Args::try_parse_from(["relpush", "--release-version", "1.0.0"]).is_err());
}

#[test]
fn test_parse_requires_release_version() {
    assert!(Args::try_parse_from(["relpush", "app.zip"]).is_err());
}

#[test]
fn test_parse_platform_and_arch_override() {
    let args = Args::try_parse_from([
        "relpush",
        "app-setup.exe",
        "--release-version",
        "1.0.0",
        "--platform",
        "win32",
        "--arch",
        "ia32",
    ])
    .unwrap();

    assert_eq!(args.platform, "win32");
    assert_eq!(args.arch, "ia32");
}

#[test]
fn test_parse_server_flags() {
    let args = Args::try_parse_from([
        "relpush",
        "app.zip",
        "--release-version",
        "1.0.0",
        "--base-url",
        "https://releases.example.com",
        "--username",
        "ci",
        "--password",
        "hunter2",
        "--channel",
        "beta",
    ])
    .unwrap();

    assert_eq!(args.base_url.as_deref(), Some("https://releases.example.com"));
    assert_eq!(args.username.as_deref(), Some("ci"));
    assert_eq!(args.password.as_deref(), Some("hunter2"));
    assert_eq!(args.channel.as_deref(), Some("beta"));
}

#[test]
fn test_host_identifiers_are_normalized() {
    // Whatever the build host, the values must already be in the server's
    // inbound vocabulary, never Rust's.
    assert!(!host_platform().is_empty());
    assert_ne!(host_platform(), "macos");
    assert_ne!(host_platform(), "windows");
    assert!(!host_arch().is_empty());
    assert_ne!(host_arch(), "x86_64");
    assert_ne!(host_arch(), "aarch64");
}
