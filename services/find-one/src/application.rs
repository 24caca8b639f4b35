// アプリケーション層モジュール
pub mod find_one_handler;

// 再エクスポート
pub use find_one_handler::FindOneHandler;
