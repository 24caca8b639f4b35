/// find-one Lambdaエントリポイント
///
/// 呼び出しごとに環境変数から接続設定を読み込み、MongoDBのコレクションから
/// 1件のドキュメントを取得して `{ statusCode, body }` 形式で返却する。
use find_one::application::FindOneHandler;
use find_one::domain::ResponseEnvelope;
use find_one::infrastructure::{init_logging, MongoConfig, MongoDocumentStore};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, info_span, Instrument};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("find-one Lambda関数を初期化");

    // Lambda関数を実行
    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. 環境変数からMongoConfigを読み込み（失敗時は500）
/// 2. FindOneHandlerで接続・取得・クローズを実行
/// 3. 結果をエンベロープとして返却
///
/// # 戻り値
/// 常にOkを返す（失敗はstatusCode 500のエンベロープで表現）
async fn handler(event: LambdaEvent<Value>) -> Result<ResponseEnvelope, Error> {
    let span = info_span!("invocation", request_id = %event.context.request_id);

    let envelope = respond(&event.payload).instrument(span).await;

    Ok(envelope)
}

/// 1回の呼び出しを処理してエンベロープを生成
async fn respond(payload: &Value) -> ResponseEnvelope {
    info!("呼び出しを受信");

    let config = match MongoConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "MongoDB設定読み込み失敗");
            return ResponseEnvelope::error(err.to_string());
        }
    };

    let find_one_handler = FindOneHandler::new(
        MongoDocumentStore::new(config.clone()),
        config.database(),
        config.collection(),
    );

    let envelope = find_one_handler.handle(payload).await;

    info!(
        status_code = envelope.status_code,
        success = envelope.is_success(),
        "レスポンス送信"
    );

    envelope
}
