/// find-oneハンドラー
///
/// 接続 → クエリ → クローズを1回の呼び出しで実行し、結果を必ず
/// ResponseEnvelopeへ変換して返す。呼び出し元へエラーを返すことはない。
use mongodb::bson::Document;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::{QueryResult, ResponseEnvelope};
use crate::infrastructure::{DocumentConnection, DocumentStore, StoreError};

/// 固定のデータベース・コレクションから1件取得するハンドラー
pub struct FindOneHandler<S>
where
    S: DocumentStore,
{
    /// ドキュメントストア
    store: S,
    /// 対象データベース名
    database: String,
    /// 対象コレクション名
    collection: String,
}

impl<S> FindOneHandler<S>
where
    S: DocumentStore,
{
    /// 新しいFindOneHandlerを作成
    pub fn new(store: S, database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            store,
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// 呼び出しイベントを処理してレスポンスを生成
    ///
    /// イベントの内容は使用しない。成功時は200、失敗時は500のエンベロープを返す。
    pub async fn handle(&self, _event: &Value) -> ResponseEnvelope {
        match self.find_one().await {
            Ok(result) => {
                info!(found = result.is_found(), "find_one成功");
                ResponseEnvelope::ok(&result)
            }
            Err(err) => {
                error!(stage = err.stage(), error = %err, "find_one失敗");
                ResponseEnvelope::error(err.to_string())
            }
        }
    }

    /// 空フィルターで最初のドキュメントを取得
    ///
    /// # 処理フロー
    /// 1. 接続を確立（失敗時はクローズ不要のためそのまま返す）
    /// 2. 空フィルターでfind_oneを実行
    /// 3. クエリの成否によらず接続をちょうど1回クローズ
    ///
    /// クローズの失敗はwarnログに残して無視し、クエリの結果を優先する。
    pub async fn find_one(&self) -> Result<QueryResult, StoreError> {
        let connection = self.store.connect().await?;

        let queried = connection
            .find_one(&self.database, &self.collection, Document::new())
            .await;

        if let Err(err) = connection.close().await {
            warn!(error = %err, "接続のクローズに失敗（無視）");
        }

        queried.map(QueryResult::from)
    }
}
