//! `strcipher`: encrypt or decrypt a single string from the command line.
//!
//! Startup sequence:
//! 1. Parse arguments.
//! 2. Load and validate [`Config`] from environment variables.
//! 3. Initialise structured JSON logging.
//! 4. Read the key from the environment and the input from the argument or stdin.
//! 5. Run the cipher and print the result.

mod config;
mod telemetry;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::protocol::{CipherOutput, ErrorResponse};
use string_cipher::{CipherOptions, KeyDerivation, Scheme, StringCipher};
use tracing::{info, warn};

use config::Config;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "strcipher", version)]
#[command(about = "AES-256 string encryption into printable envelopes")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Environment variable holding the key.
    #[arg(long, default_value = "STRCIPHER_KEY")]
    key_env: String,

    /// Envelope scheme (v1, legacy). Overrides STRCIPHER_SCHEME.
    #[arg(long)]
    scheme: Option<Scheme>,

    /// Key derivation (sha256, zero-pad). Overrides STRCIPHER_KEY_DERIVATION.
    #[arg(long)]
    key_derivation: Option<KeyDerivation>,

    /// Accept legacy values when decrypting with the v1 scheme.
    #[arg(long)]
    accept_legacy: bool,

    /// Print a JSON object instead of the bare result.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Encrypt TEXT (or stdin) into an envelope.
    Encrypt { text: Option<String> },
    /// Decrypt the envelope TEXT (or stdin).
    Decrypt { text: Option<String> },
}

impl Args {
    fn apply(&self, mut options: CipherOptions) -> CipherOptions {
        if let Some(scheme) = self.scheme {
            options.scheme = scheme;
        }
        if let Some(kd) = self.key_derivation {
            options.key_derivation = kd;
        }
        options.accept_legacy |= self.accept_legacy;
        options
    }
}

fn main() -> Result<ExitCode> {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let args = Args::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().context("strcipher configuration invalid")?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 4. Key and input
    // -----------------------------------------------------------------------
    let options = args.apply(cfg.options);
    let key = std::env::var(&args.key_env)
        .with_context(|| format!("{} is not set or not valid UTF-8", args.key_env))?;
    let (is_encrypt, text) = match &args.command {
        Command::Encrypt { text } => (true, text.clone()),
        Command::Decrypt { text } => (false, text.clone()),
    };
    let input = match text {
        Some(t) => t,
        None => read_stdin()?,
    };
    info!(
        scheme = %options.scheme,
        key_derivation = %options.key_derivation,
        encrypt = is_encrypt,
        "running cipher"
    );

    // -----------------------------------------------------------------------
    // 5. Cipher
    // -----------------------------------------------------------------------
    let cipher = StringCipher::with_options(options);
    let result = if is_encrypt {
        cipher.encrypt(&input, &key)
    } else {
        cipher.decrypt(&input, &key)
    };

    match result {
        Ok(output) => {
            if args.json {
                let body = CipherOutput {
                    scheme: options.scheme,
                    output,
                };
                println!("{}", serde_json::to_string(&body)?);
            } else {
                println!("{output}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!(code = e.code(), "cipher operation failed");
            if args.json {
                println!("{}", serde_json::to_string(&ErrorResponse::from(&e))?);
            } else {
                eprintln!("ERROR: {e}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read input from stdin")?;
    Ok(trim_line_ending(buf))
}

/// Drop one trailing `\n` or `\r\n`, as left by `echo` or a shell heredoc.
fn trim_line_ending(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}
