// find-oneクエリの結果
//
// BSONドキュメントは、Node.jsのMongoDBドライバでJSON.stringifyした場合と同じ形にエンコードする。
// ObjectIdは16進文字列、日時はミリ秒付きISO-8601文字列、整数値のdoubleは整数になる。
// それ以外のBSON固有型はrelaxed extended JSONで表現する。

use chrono::SecondsFormat;
use mongodb::bson::{Bson, Document};
use serde_json::{Map, Number, Value};

/// doubleを整数として書き出せる上限（JSの安全な整数範囲）
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// 空フィルターでのfind-oneの結果（ドキュメントが無い場合はNone）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult(Option<Document>);

impl QueryResult {
    /// ドキュメントが見つかった結果を作成
    pub fn found(document: Document) -> Self {
        Self(Some(document))
    }

    /// 該当ドキュメントが無い結果を作成
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_found(&self) -> bool {
        self.0.is_some()
    }

    /// JSON値へ変換（ドキュメントが無い場合はnull）
    pub fn to_json(&self) -> Value {
        match &self.0 {
            Some(document) => document_to_json(document),
            None => Value::Null,
        }
    }

    /// レスポンス本文用のJSON文字列へ変換
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<Option<Document>> for QueryResult {
    fn from(document: Option<Document>) -> Self {
        Self(document)
    }
}

/// ドキュメントをJSONオブジェクトへ変換
///
/// undefinedのフィールドはJSON.stringifyと同様に出力しない。
fn document_to_json(document: &Document) -> Value {
    let map: Map<String, Value> = document
        .iter()
        .filter(|(_, value)| !matches!(value, Bson::Undefined))
        .map(|(key, value)| (key.clone(), bson_to_json(value)))
        .collect();

    Value::Object(map)
}

/// BSON値をJSON値へ変換
fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(datetime) => Value::String(
            datetime
                .to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Bson::Double(number) => double_to_json(*number),
        Bson::Int32(number) => Value::from(*number),
        Bson::Int64(number) => Value::from(*number),
        Bson::String(text) | Bson::Symbol(text) => Value::String(text.clone()),
        Bson::Boolean(flag) => Value::Bool(*flag),
        Bson::Null | Bson::Undefined => Value::Null,
        other => other.clone().into_relaxed_extjson(),
    }
}

/// doubleをJSON数値へ変換
///
/// 整数値は整数として書き出し、NaN・無限大はnullになる。
fn double_to_json(number: f64) -> Value {
    if number.is_finite() && number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        return Value::from(number as i64);
    }

    Number::from_f64(number).map_or(Value::Null, Value::Number)
}
