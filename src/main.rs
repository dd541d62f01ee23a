use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use yamusic_tools::cli::{self, ReleaseArgs, ReleaseOutcome, ResolvedAccount};
use yamusic_tools::config::{self, Config};
use yamusic_tools::git::Git2Repository;
use yamusic_tools::music::YandexMusicClient;
use yamusic_tools::ui::{self, StdinPrompt};

#[derive(Parser)]
#[command(
    name = "yamusic-tools",
    version,
    about = "Helpers for the Yandex Music player: resolve account credentials and tag releases"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the account id for a token and write both to the env file
    GetId {
        #[arg(long, help = "Token to use instead of prompting for it")]
        token: Option<String>,

        #[arg(short, long, help = "Env file to write (default: .env)")]
        output: Option<PathBuf>,
    },

    /// Check that the token in the env file still resolves to its account id
    Verify {
        #[arg(long, help = "Env file to read (default: .env)")]
        env_file: Option<PathBuf>,
    },

    /// Tag and push the version from the version file if it is newer than the latest tag
    Release {
        #[arg(long, help = "Version file to read (default: version.txt)")]
        version_file: Option<PathBuf>,

        #[arg(long, help = "Remote to push the tag to (default: origin)")]
        remote: Option<String>,

        #[arg(short, long, help = "Tag message to use instead of prompting for it")]
        message: Option<String>,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    match args.command {
        Command::GetId { token, output } => get_id(&config, token, output),
        Command::Verify { env_file } => verify(&config, env_file),
        Command::Release {
            version_file,
            remote,
            message,
            dry_run,
        } => release(ReleaseArgs {
            version_file: version_file.unwrap_or_else(|| config.release.version_file.clone()),
            remote: remote.unwrap_or_else(|| config.release.remote.clone()),
            message,
            dry_run,
        }),
    }
}

fn music_client(config: &Config) -> YandexMusicClient {
    match YandexMusicClient::new(
        config.credentials.api_base_url.clone(),
        Duration::from_secs(config.credentials.timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => {
            ui::display_error(&format!("Cannot create HTTP client: {}", e));
            std::process::exit(1);
        }
    }
}

fn report_account(prefix: &str, resolved: &ResolvedAccount) {
    ui::display_success(&format!(
        "{} {}",
        prefix,
        ui::account_summary(resolved.credentials.account_id, resolved.login.as_deref())
    ));
}

fn get_id(config: &Config, token: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| config.credentials.env_file.clone());
    let client = music_client(config);

    match cli::run_get_id(&client, &mut StdinPrompt, token, &output) {
        Ok(resolved) => {
            report_account(&format!("Wrote {} for", output.display()), &resolved);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("Failed to resolve account id: {}", e));
            std::process::exit(1);
        }
    }
}

fn verify(config: &Config, env_file: Option<PathBuf>) -> Result<()> {
    let env_file = env_file.unwrap_or_else(|| config.credentials.env_file.clone());
    let client = music_client(config);

    ui::display_status(&format!("Checking token from {}", env_file.display()));
    match cli::run_verify(&client, &env_file) {
        Ok(resolved) => {
            report_account("Token is valid for", &resolved);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("Verification failed: {}", e));
            std::process::exit(1);
        }
    }
}

fn release(args: ReleaseArgs) -> Result<()> {
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let mut out = io::stdout();
    match cli::run_release(&repo, &args, &mut StdinPrompt, &mut out) {
        Ok(ReleaseOutcome::Dirty) => std::process::exit(1),
        Ok(ReleaseOutcome::Tagged { tag, remote }) => {
            ui::display_success(&format!("Pushed tag {} to {}", tag, remote));
            Ok(())
        }
        Ok(ReleaseOutcome::UpToDate { .. }) | Ok(ReleaseOutcome::WouldTag { .. }) => Ok(()),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
