// Lambdaレスポンスエンベロープ
//
// ホスティング環境が期待する `{ statusCode, body }` 形式のレスポンス構造を定義する。
// bodyは常にJSON文字列で、成功時はクエリ結果、失敗時は `{ "error": ... }` を保持する。

use serde::{Deserialize, Serialize};

use super::QueryResult;

/// 成功時のステータスコード
pub const STATUS_OK: u16 = 200;

/// 失敗時のステータスコード（失敗種別によらず常にこの値）
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Lambdaレスポンスエンベロープ
///
/// ステータスコードは `STATUS_OK` か `STATUS_INTERNAL_ERROR` のいずれかのみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTPステータスコード
    pub status_code: u16,
    /// JSONエンコード済みのレスポンス本文
    pub body: String,
}

/// 失敗時のレスポンス本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 失敗の原因となったエラーメッセージ
    pub error: String,
}

impl ResponseEnvelope {
    /// クエリ結果から成功レスポンスを作成
    pub fn ok(result: &QueryResult) -> Self {
        Self {
            status_code: STATUS_OK,
            body: result.to_json_string(),
        }
    }

    /// エラーメッセージから失敗レスポンスを作成
    ///
    /// メッセージは加工せずにそのまま `error` フィールドへ格納する。
    pub fn error(message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "error": message.into() });

        Self {
            status_code: STATUS_INTERNAL_ERROR,
            body: body.to_string(),
        }
    }

    /// 成功レスポンスかどうか
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_ok_envelope_with_document() {
        let result = QueryResult::found(doc! { "_id": 1, "name": "x" });

        let envelope = ResponseEnvelope::ok(&result);

        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body, r#"{"_id":1,"name":"x"}"#);
        assert!(envelope.is_success());
    }

    #[test]
    fn test_ok_envelope_without_document() {
        let envelope = ResponseEnvelope::ok(&QueryResult::empty());

        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body, "null");
    }

    #[test]
    fn test_error_envelope_body() {
        let envelope = ResponseEnvelope::error("ECONNREFUSED");

        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.body, r#"{"error":"ECONNREFUSED"}"#);
        assert!(!envelope.is_success());
    }

    /// 引用符や改行を含むメッセージもJSONとして正しくエスケープされる
    #[test]
    fn test_error_envelope_escapes_message() {
        let message = "bad \"auth\"\nline2";
        let envelope = ResponseEnvelope::error(message);

        let parsed: ErrorBody = serde_json::from_str(&envelope.body).unwrap();
        assert_eq!(parsed.error, message);
    }

    #[test]
    fn test_envelope_serializes_with_camel_case_keys() {
        let envelope = ResponseEnvelope::error("boom");

        let value = serde_json::to_value(&envelope).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 2);
        assert_eq!(value["statusCode"], 500);
        assert_eq!(value["body"], r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_envelope_deserializes_from_platform_shape() {
        let json = r#"{"statusCode":200,"body":"null"}"#;

        let envelope: ResponseEnvelope = serde_json::from_str(json).unwrap();

        assert_eq!(envelope, ResponseEnvelope::ok(&QueryResult::empty()));
    }
}
