/// MongoDB接続設定
///
/// 接続先アドレス、データベース名、コレクション名を環境変数から読み込む。
use std::time::Duration;

use thiserror::Error;

/// 接続文字列の環境変数名
pub const ENV_URI: &str = "MONGODB_URI";
/// データベース名の環境変数名
pub const ENV_DATABASE: &str = "MONGODB_DATABASE";
/// コレクション名の環境変数名
pub const ENV_COLLECTION: &str = "MONGODB_COLLECTION";
/// サーバー選択タイムアウト（ミリ秒）の環境変数名
pub const ENV_SERVER_SELECTION_TIMEOUT_MS: &str = "MONGODB_SERVER_SELECTION_TIMEOUT_MS";
/// アプリケーション名の環境変数名
pub const ENV_APP_NAME: &str = "MONGODB_APP_NAME";

/// データベース名のデフォルト値
pub const DEFAULT_DATABASE: &str = "testdb";
/// コレクション名のデフォルト値
pub const DEFAULT_COLLECTION: &str = "testCollection";

/// 設定読み込みのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// MongoDB接続設定
///
/// 以下の環境変数から読み込む:
/// - MONGODB_URI: 接続文字列（必須）
/// - MONGODB_DATABASE: データベース名（省略時 `testdb`）
/// - MONGODB_COLLECTION: コレクション名（省略時 `testCollection`）
/// - MONGODB_SERVER_SELECTION_TIMEOUT_MS: サーバー選択タイムアウト（省略時はドライバのデフォルト）
/// - MONGODB_APP_NAME: サーバーへ通知するアプリケーション名（任意）
///
/// 空文字列は未設定として扱う。
#[derive(Debug, Clone, PartialEq)]
pub struct MongoConfig {
    uri: String,
    database: String,
    collection: String,
    server_selection_timeout: Option<Duration>,
    app_name: Option<String>,
}

impl MongoConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # エラー
    /// MONGODB_URIが未設定、またはタイムアウト値が数値でない場合はエラーを返す
    pub fn from_env() -> Result<Self, ConfigError> {
        let uri =
            read_env(ENV_URI).ok_or_else(|| ConfigError::MissingEnvVar(ENV_URI.to_string()))?;

        let database = read_env(ENV_DATABASE).unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let collection =
            read_env(ENV_COLLECTION).unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let server_selection_timeout = read_env(ENV_SERVER_SELECTION_TIMEOUT_MS)
            .map(|value| parse_millis(ENV_SERVER_SELECTION_TIMEOUT_MS, &value))
            .transpose()?;

        let app_name = read_env(ENV_APP_NAME);

        Ok(Self {
            uri,
            database,
            collection,
            server_selection_timeout,
            app_name,
        })
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
            server_selection_timeout: None,
            app_name: None,
        }
    }

    /// サーバー選択タイムアウトを指定
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = Some(timeout);
        self
    }

    /// アプリケーション名を指定
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// 接続文字列を取得
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// データベース名を取得
    pub fn database(&self) -> &str {
        &self.database
    }

    /// コレクション名を取得
    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn server_selection_timeout(&self) -> Option<Duration> {
        self.server_selection_timeout
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }
}

/// 環境変数を読み込む（空文字列・空白のみはNone）
fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// ミリ秒指定の文字列をDurationへ変換
fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}
