//! penne: end-to-end encrypted paste client
//!
//! Commands:
//!   encrypt    - encrypt a title/body pair, print key + cipher hex (and share link)
//!   prepare    - build the upload form fields per config (e2ee, default title)
//!
//! `--qr` on encrypt/prepare also prints the share link as a terminal QR code.
//!   decrypt    - decrypt cipher hex using a key or a share link carrying `k`
//!   keygen     - print a fresh paste key
//!   config show - display current configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use url::Url;

use penne_core::PenneConfig;
use penne_crypto::{DecryptedPaste, Paste};
use qrcode::{render::unicode, QrCode};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "penne",
    version,
    about = "End-to-end encrypted paste client",
    long_about = "penne: encrypt pastes before upload and decrypt them from share links"
)]
struct Cli {
    /// Path to penne.toml configuration file
    #[arg(long, short = 'c', env = "PENNE_CONFIG", default_value = "~/.config/penne/penne.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides config
    #[arg(long, env = "PENNE_LOG")]
    log: Option<String>,

    /// Log format; overrides config
    #[arg(long, env = "PENNE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a paste and print the key and cipher hex strings
    Encrypt {
        /// Paste title
        #[arg(long, short = 't', default_value = "")]
        title: String,
        /// Paste body (read from stdin when omitted)
        #[arg(long, short = 'b')]
        body: Option<String>,
        /// URL of the uploaded paste; prints the share link carrying the key
        #[arg(long)]
        paste_url: Option<Url>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Print the share link as a QR code (needs --paste-url)
        #[arg(long, requires = "paste_url")]
        qr: bool,
    },

    /// Build the form fields to upload, following the config's e2ee setting
    Prepare {
        /// Paste title (config default_title when empty)
        #[arg(long, short = 't', default_value = "")]
        title: String,
        /// Paste body (read from stdin when omitted)
        #[arg(long, short = 'b')]
        body: Option<String>,
        /// Skip client-side encryption regardless of config
        #[arg(long)]
        no_e2ee: bool,
        /// URL the server answered with; prints where the uploader should land
        #[arg(long)]
        response_url: Option<Url>,
        /// Print the redirect URL as a QR code
        #[arg(long)]
        qr: bool,
    },

    /// Decrypt a paste from its cipher hex strings
    Decrypt {
        /// Hex-encoded title ciphertext
        #[arg(long)]
        title_cipher: String,
        /// Hex-encoded body ciphertext
        #[arg(long)]
        text_cipher: String,
        /// Hex paste key
        #[arg(long, short = 'k', conflicts_with = "url", required_unless_present = "url")]
        key: Option<String>,
        /// Share link carrying the key in its `k` parameter
        #[arg(long)]
        url: Option<Url>,
        /// Save the paste as `<title>.txt` in this directory instead of printing
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Print a freshly generated paste key
    Keygen,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = expand_tilde(&cli.config);
    let config = PenneConfig::load(&config_path)
        .with_context(|| format!("loading config: {}", config_path.display()))?;

    let level = cli.log.clone().unwrap_or_else(|| config.log.level.clone());
    let format = cli.log_format.clone().unwrap_or(match config.log.format.as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Text,
    });
    init_logging(&level, &format);

    match cli.command {
        Commands::Encrypt { title, body, paste_url, json, qr } => {
            cmd_encrypt(&title, body, paste_url.as_ref(), json, qr)
        }
        Commands::Prepare { title, body, no_e2ee, response_url, qr } => {
            cmd_prepare(&config, &title, body, no_e2ee, response_url.as_ref(), qr)
        }
        Commands::Decrypt { title_cipher, text_cipher, key, url, save } => cmd_decrypt(
            &title_cipher,
            &text_cipher,
            key.as_deref(),
            url.as_ref(),
            save.as_deref(),
        ),
        Commands::Keygen => cmd_keygen(),
        Commands::Config { action: ConfigAction::Show } => cmd_config_show(&config, &config_path),
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout stays clean for cipher/key output.
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

fn read_body(body: Option<String>) -> Result<String> {
    match body {
        Some(b) => Ok(b),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading paste body from stdin")?;
            Ok(buf)
        }
    }
}

/// Render a URL as a QR code made of Unicode half blocks.
fn render_qr(url: &Url) -> Result<String> {
    let code = QrCode::new(url.as_str())
        .map_err(|e| anyhow::anyhow!("encoding QR code for share link: {e}"))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build())
}

// ── `penne encrypt` ───────────────────────────────────────────────────────────

fn cmd_encrypt(
    title: &str,
    body: Option<String>,
    paste_url: Option<&Url>,
    json: bool,
    qr: bool,
) -> Result<()> {
    let body = read_body(body)?;
    let enc = penne_crypto::encrypt_paste(title, &body).context("encrypting paste")?;
    let link = paste_url.map(|u| penne_crypto::share_url(u, &enc.key_hex));

    if json {
        let mut value = serde_json::to_value(&enc).context("serializing encrypted paste")?;
        if let Some(link) = &link {
            value["shareUrl"] = serde_json::Value::String(link.to_string());
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("key:          {}", enc.key_hex);
        println!("title cipher: {}", enc.title_cipher_hex);
        println!("text cipher:  {}", enc.text_cipher_hex);
        if let Some(link) = &link {
            println!("share link:   {link}");
        }
    }

    if let (true, Some(link)) = (qr, &link) {
        eprintln!("{}", render_qr(link)?);
    }
    Ok(())
}

// ── `penne prepare` ───────────────────────────────────────────────────────────

fn cmd_prepare(
    config: &PenneConfig,
    title: &str,
    body: Option<String>,
    no_e2ee: bool,
    response_url: Option<&Url>,
    qr: bool,
) -> Result<()> {
    let body = read_body(body)?;
    let upload = penne_core::prepare_upload(&config.share, title, &body, no_e2ee, response_url)
        .context("preparing submission")?;

    for (name, value) in upload.submission.fields() {
        println!("{name}={value}");
    }
    println!("redirect={}", upload.redirect_url);
    if qr {
        eprintln!("{}", render_qr(&upload.redirect_url)?);
    }
    Ok(())
}

// ── `penne decrypt` ───────────────────────────────────────────────────────────

fn cmd_decrypt(
    title_cipher: &str,
    text_cipher: &str,
    key: Option<&str>,
    url: Option<&Url>,
    save: Option<&Path>,
) -> Result<()> {
    let decrypted = match (key, url) {
        (Some(k), _) => penne_crypto::decrypt_paste(title_cipher, text_cipher, k),
        (None, Some(u)) => penne_crypto::decrypt_from_url(u, title_cipher, text_cipher),
        (None, None) => DecryptedPaste::Unavailable,
    };

    let Some(paste) = decrypted.into_paste() else {
        anyhow::bail!("paste could not be decrypted");
    };

    match save {
        Some(dir) => {
            let path = save_paste(&paste, dir)?;
            println!("saved {}", path.display());
        }
        None => print!("{}", paste.file_contents()),
    }
    Ok(())
}

fn save_paste(paste: &Paste, dir: &Path) -> Result<PathBuf> {
    let name = paste.file_name();
    // Titles are user-supplied; keep only the final component.
    let file_name = Path::new(&name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}.txt", penne_crypto::DEFAULT_TITLE)));
    let path = dir.join(file_name);
    std::fs::write(&path, paste.file_contents())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

// ── `penne keygen` ────────────────────────────────────────────────────────────

fn cmd_keygen() -> Result<()> {
    let key_hex = penne_core::new_key_hex().context("generating key")?;
    println!("{key_hex}");
    Ok(())
}

// ── `penne config show` ───────────────────────────────────────────────────────

fn cmd_config_show(config: &PenneConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = config.to_toml_string().context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}
