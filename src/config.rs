use crate::preprocessing::PreprocessOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pedigree-scan")]
#[command(about = "Pedigree certificate scanner: pre-fills registration forms from a photo")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "PEDIGREE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PEDIGREE_PORT", default_value = "9393")]
    pub port: u16,

    /// OCR engine to use by default (e.g., "ocrs", "leptess")
    #[arg(long, env = "PEDIGREE_ENGINE")]
    pub engine: Option<String>,

    /// Recognition language for Tesseract (e.g., "eng")
    #[arg(long, env = "PEDIGREE_LANGUAGE", default_value = "eng")]
    pub default_language: String,

    /// Maximum upload size in bytes (default: 20MB)
    #[arg(long, env = "PEDIGREE_MAX_FILE_SIZE", default_value = "20971520")]
    pub max_file_size: usize,

    /// Path to tessdata directory (downloaded to the cache dir if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<String>,

    /// Linear upscale factor applied before binarization
    #[arg(long, env = "PEDIGREE_SCALE", default_value = "1.5")]
    pub scale_factor: f32,

    /// Mean-luminance cut-off: brighter pixels become white, the rest black
    #[arg(long, env = "PEDIGREE_THRESHOLD", default_value = "160")]
    pub luminance_threshold: u8,

    /// Scan a single certificate image, print the result as JSON and exit
    #[arg(long, value_name = "FILE")]
    pub scan: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub engine: Option<String>,
    pub default_language: String,
    pub max_file_size: usize,
    pub tessdata_path: Option<String>,
    pub preprocess: PreprocessOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9393,
            engine: None,
            default_language: "eng".to_string(),
            max_file_size: 20 * 1024 * 1024,
            tessdata_path: None,
            preprocess: PreprocessOptions::default(),
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            engine: args.engine,
            default_language: args.default_language,
            max_file_size: args.max_file_size,
            tessdata_path: args.tessdata_path,
            preprocess: PreprocessOptions {
                scale: args.scale_factor,
                threshold: args.luminance_threshold,
            },
        }
    }
}
