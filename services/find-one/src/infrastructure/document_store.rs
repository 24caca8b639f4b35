/// ドキュメントデータベースへの接続とfind-oneクエリ
///
/// 接続の確立・クエリ・クローズを抽象化したトレイトと、そのMongoDB実装を提供する。
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::MongoConfig;

/// ドキュメントストア操作のエラー型
///
/// どのバリアントも表示文字列はドライバのエラーメッセージそのもの。
/// バリアントはログ上でどの段階の失敗かを区別するためだけに使う。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// 接続の確立に失敗
    #[error("{0}")]
    Connect(String),

    /// クエリの実行に失敗
    #[error("{0}")]
    Query(String),

    /// 接続のクローズに失敗
    #[error("{0}")]
    Close(String),
}

impl StoreError {
    /// 失敗した段階の名前（ログ用）
    pub fn stage(&self) -> &'static str {
        match self {
            StoreError::Connect(_) => "connect",
            StoreError::Query(_) => "query",
            StoreError::Close(_) => "close",
        }
    }
}

/// 接続を払い出すドキュメントストア
///
/// 実装を差し替え可能にするためのトレイト（実際のMongoDB、テスト用モック）。
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 払い出す接続の型
    type Connection: DocumentConnection;

    /// 接続を確立する
    ///
    /// 失敗時は接続が存在しないため、呼び出し側がクローズする必要はない。
    async fn connect(&self) -> Result<Self::Connection, StoreError>;
}

/// 確立済みの接続
#[async_trait]
pub trait DocumentConnection: Send + Sync + Sized {
    /// 指定データベース・コレクションからフィルターに一致する最初のドキュメントを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Document))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(StoreError::Query)`
    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// 接続を閉じる
    ///
    /// `self` を消費するため、同じ接続を二度閉じたりクローズ後に使うことはできない。
    async fn close(self) -> Result<(), StoreError>;
}

/// DocumentStoreのMongoDB実装
#[derive(Debug, Clone)]
pub struct MongoDocumentStore {
    config: MongoConfig,
}

impl MongoDocumentStore {
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }

    /// 設定からドライバのクライアントオプションを構築
    async fn client_options(&self) -> Result<ClientOptions, StoreError> {
        let mut options = ClientOptions::parse(self.config.uri())
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        if let Some(timeout) = self.config.server_selection_timeout() {
            options.server_selection_timeout = Some(timeout);
        }
        if let Some(app_name) = self.config.app_name() {
            options.app_name = Some(app_name.to_string());
        }

        Ok(options)
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    type Connection = MongoConnection;

    async fn connect(&self) -> Result<MongoConnection, StoreError> {
        let options = self.client_options().await?;

        // 接続文字列は認証情報を含み得るため、ホスト一覧だけをログに出す
        let hosts = options
            .hosts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connect(e.to_string()))?;

        // ドライバは遅延接続のため、pingで疎通を確定させる
        if let Err(e) = client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
        {
            client.shutdown().await;
            return Err(StoreError::Connect(e.to_string()));
        }

        info!(hosts = %hosts, "MongoDBに接続");
        Ok(MongoConnection { client })
    }
}

/// MongoDBへの確立済み接続
#[derive(Debug)]
pub struct MongoConnection {
    client: Client,
}

#[async_trait]
impl DocumentConnection for MongoConnection {
    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        debug!(database = database, collection = collection, "find_one実行");

        self.client
            .database(database)
            .collection::<Document>(collection)
            .find_one(filter, None)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn close(self) -> Result<(), StoreError> {
        self.client.shutdown().await;
        debug!("MongoDB接続をクローズ");
        Ok(())
    }
}
