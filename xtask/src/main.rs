use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "greeting_artifacts_lambda";
const LAMBDA_BINARY: &str = "greeting_runtime";
const DIST_DIR: &str = "dist/greeting_artifacts";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the greeting artifacts workspace",
    long_about = "A unified CLI for running tests, CI checks and Lambda packaging\n\
                  in the greeting artifacts workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test suites of every workspace crate
    Test,
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build the Lambda binary and package it as a `bootstrap` zip
    ServerlessPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Formatting, clippy, and tests
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_serverless_lambda(target: &str, profile: BuildProfile) {
    if let Some(installed) = installed_rust_targets() {
        if !installed.iter().any(|name| name == target) {
            eprintln!(
                "error: rust target `{target}` is missing; run `rustup target add {target}` first"
            );
            exit(1);
        }
    }

    step("Build greeting lambda binary");
    let mut cargo_args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--target",
        target,
        "--bin",
        LAMBDA_BINARY,
    ];
    cargo_args.extend(profile.as_cargo_flag());
    run_cargo(&cargo_args);

    step("Package bootstrap zip");
    let binary_path = lambda_binary_path(target, profile);
    let binary = fs::read(&binary_path).unwrap_or_else(|error| {
        eprintln!("error: cannot read {}: {error}", binary_path.display());
        exit(1);
    });

    fs::create_dir_all(DIST_DIR).expect("failed to create lambda dist directory");
    let zip_path = Path::new(DIST_DIR).join(format!("{LAMBDA_BINARY}.zip"));
    let file = fs::File::create(&zip_path).expect("failed to create lambda zip");
    write_bootstrap_zip(file, &binary).expect("failed to write lambda zip");

    eprintln!(
        "\nPackaged {} ({} byte bootstrap)",
        zip_path.display(),
        binary.len()
    );
}

/// `None` when rustup is unavailable; packaging then proceeds without the check.
fn installed_rust_targets() -> Option<Vec<String>> {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect(),
    )
}

fn lambda_binary_path(target: &str, profile: BuildProfile) -> PathBuf {
    let file_name = if target.contains("windows") {
        format!("{LAMBDA_BINARY}.exe")
    } else {
        LAMBDA_BINARY.to_string()
    };
    Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(file_name)
}

/// Lambda's custom runtime expects a single executable named `bootstrap`.
fn write_bootstrap_zip<W: Write + Seek>(writer: W, binary: &[u8]) -> ZipResult<W> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(binary)?;
    zip.finish()
}

// ── CI jobs ────────────────────────────────────────────────────────

fn lint_workspace() {
    step("rustfmt");
    run_cargo(&["fmt", "--all", "--check"]);

    step("clippy (deny warnings)");
    run_cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
}

fn run_tests() {
    step("Test greeting_artifacts_core");
    run_cargo(&["test", "-p", "greeting_artifacts_core"]);

    step("Test greeting_artifacts_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test => run_tests(),
        Commands::Ci { job } => {
            match job {
                CiJob::Lint => lint_workspace(),
                CiJob::Check => {
                    lint_workspace();
                    run_tests();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage { target, profile } => {
            package_serverless_lambda(&target, profile);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    #[test]
    fn bootstrap_zip_holds_one_executable_entry() {
        let written = write_bootstrap_zip(Cursor::new(Vec::new()), b"\x7fELF-runtime")
            .expect("zip should be written")
            .into_inner();

        let mut archive = zip::ZipArchive::new(Cursor::new(written)).expect("zip should open");
        assert_eq!(archive.len(), 1);

        let mut entry = archive.by_name("bootstrap").expect("bootstrap entry");
        assert_eq!(entry.unix_mode().map(|mode| mode & 0o777), Some(0o755));
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).expect("entry should read");
        assert_eq!(contents, b"\x7fELF-runtime");
    }

    #[test]
    fn binary_path_follows_target_and_profile() {
        assert_eq!(
            lambda_binary_path("aarch64-unknown-linux-gnu", BuildProfile::Release),
            Path::new("target/aarch64-unknown-linux-gnu/release/greeting_runtime")
        );
        assert_eq!(
            lambda_binary_path("x86_64-pc-windows-msvc", BuildProfile::Debug),
            Path::new("target/x86_64-pc-windows-msvc/debug/greeting_runtime.exe")
        );
    }
}
