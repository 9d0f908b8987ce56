use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingSettings;

const LOG_FILE_NAME: &str = "gke-lifecycle.log";

/// ログ設定
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// ログレベル (trace, debug, info, warn, error)
    pub level: String,
    /// 出力形式
    pub format: LogFormat,
    /// ファイル出力先（None ならコンソールのみ）
    pub log_dir: Option<PathBuf>,
    /// ファイルローテーション設定
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogRotation {
    /// 日次ローテーション
    Daily,
    /// 時間毎ローテーション
    Hourly,
    /// ローテーションなし
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            log_dir: None,
            rotation: LogRotation::Daily,
        }
    }
}

impl LogConfig {
    /// 設定からログ設定を作成
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            format: if settings.json {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            log_dir: settings.dir.clone(),
            rotation: parse_rotation(&settings.rotation),
        }
    }
}

fn parse_rotation(value: &str) -> LogRotation {
    match value.to_ascii_lowercase().as_str() {
        "hourly" => LogRotation::Hourly,
        "never" => LogRotation::Never,
        _ => LogRotation::Daily,
    }
}

/// ログディレクトリを確保
fn ensure_log_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// ログシステムを初期化
///
/// The returned guard flushes the file writer on drop; hold it for the life of the process.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let (file, guard) = match &config.log_dir {
        Some(dir) => {
            ensure_log_dir(dir)?;
            let appender = match config.rotation {
                LogRotation::Daily => rolling::daily(dir, LOG_FILE_NAME),
                LogRotation::Hourly => rolling::hourly(dir, LOG_FILE_NAME),
                LogRotation::Never => rolling::never(dir, LOG_FILE_NAME),
            };
            let (writer, guard) = non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .try_init()?;

    tracing::debug!(level = %config.level, log_dir = ?config.log_dir, "Logging initialised");

    Ok(guard)
}
