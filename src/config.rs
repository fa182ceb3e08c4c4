use anyhow::{Context, Result};
use clap::Parser;
use std::{env, fmt, path::PathBuf};

/// Default cap on a single upload, 25 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub supabase_url: String,
    pub supabase_key: String,
    pub bucket: String,
    pub temp_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub public_dir: Option<PathBuf>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Upload a file, get a shareable link and QR code")]
pub struct Args {
    /// Host to bind to (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Supabase project URL (overrides SUPABASE_URL)
    #[arg(long)]
    pub supabase_url: Option<String>,

    /// Supabase service key (overrides SUPABASE_KEY)
    #[arg(long)]
    pub supabase_key: Option<String>,

    /// Storage bucket receiving uploads (overrides SUPABASE_BUCKET_NAME)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Directory for transient upload buffers (overrides UPLOAD_TEMP_DIR)
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Largest accepted file in bytes (overrides MAX_UPLOAD_BYTES)
    #[arg(long)]
    pub max_upload_bytes: Option<u64>,

    /// Directory of static assets served for unmatched paths (overrides PUBLIC_DIR)
    #[arg(long)]
    pub public_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load `.env` if present, then parse CLI args with environment fallback.
    pub fn from_env_and_args() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        // Parse CLI once
        let args = Args::parse();
        Self::resolve(args, |name| env::var(name).ok())
    }

    /// Merge parsed args over values produced by `lookup`.
    pub fn resolve(args: Args, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |flag: Option<String>, name: &str| -> Result<String> {
            flag.or_else(|| lookup(name))
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{} is not set", name))
        };

        let port = match args.port {
            Some(port) => port,
            None => match lookup("PORT") {
                Some(value) => value
                    .parse::<u16>()
                    .with_context(|| format!("parsing PORT value `{}`", value))?,
                None => 8080,
            },
        };

        let max_upload_bytes = match args.max_upload_bytes {
            Some(limit) => limit,
            None => match lookup("MAX_UPLOAD_BYTES") {
                Some(value) => value
                    .parse::<u64>()
                    .with_context(|| format!("parsing MAX_UPLOAD_BYTES value `{}`", value))?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        };

        Ok(Self {
            host: args
                .host
                .or_else(|| lookup("HOST"))
                .unwrap_or_else(|| "0.0.0.0".into()),
            port,
            supabase_url: required(args.supabase_url, "SUPABASE_URL")?,
            supabase_key: required(args.supabase_key, "SUPABASE_KEY")?,
            bucket: required(args.bucket, "SUPABASE_BUCKET_NAME")?,
            temp_dir: args
                .temp_dir
                .or_else(|| lookup("UPLOAD_TEMP_DIR").map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("temp")),
            max_upload_bytes,
            public_dir: args
                .public_dir
                .or_else(|| lookup("PUBLIC_DIR").map(PathBuf::from)),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("temp_dir", &self.temp_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("public_dir", &self.public_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_KEY", "service-key"),
        ("SUPABASE_BUCKET_NAME", "shared"),
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_set() {
        let cfg = AppConfig::resolve(Args::default(), env_of(&REQUIRED)).unwrap();
        assert_eq!(cfg.addr(), "0.0.0.0:8080");
        assert_eq!(cfg.temp_dir, PathBuf::from("temp"));
        assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(cfg.bucket, "shared");
        assert!(cfg.public_dir.is_none());
    }

    #[test]
    fn cli_flags_override_environment() {
        let args = Args::try_parse_from([
            "quickav",
            "--port",
            "9000",
            "--bucket",
            "from-cli",
            "--max-upload-bytes",
            "1024",
        ])
        .unwrap();
        let mut env = REQUIRED.to_vec();
        env.push(("PORT", "7000"));
        let cfg = AppConfig::resolve(args, env_of(&env)).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.bucket, "from-cli");
        assert_eq!(cfg.max_upload_bytes, 1024);
    }

    #[test]
    fn missing_credential_is_an_error() {
        let err = AppConfig::resolve(
            Args::default(),
            env_of(&[
                ("SUPABASE_URL", "https://project.supabase.co"),
                ("SUPABASE_BUCKET_NAME", "shared"),
            ]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_KEY"));
    }

    #[test]
    fn unparsable_port_is_reported() {
        let mut env = REQUIRED.to_vec();
        env.push(("PORT", "eighty"));
        let err = AppConfig::resolve(Args::default(), env_of(&env)).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let cfg = AppConfig::resolve(Args::default(), env_of(&REQUIRED)).unwrap();
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("service-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
