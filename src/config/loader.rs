//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    SiteSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".architect-docs.json";

/// ワークスペースから設定を読み込む
///
/// ワークスペース直下の `.architect-docs.json` を探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<SiteSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.is_file() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 指定されたパスから設定を読み込む（`--config` 用）
///
/// 省略されたフィールドはデフォルト値で補完される
pub(super) fn load_from_file(config_path: &Path) -> Result<SiteSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    Ok(serde_json::from_str(&content)?)
}
