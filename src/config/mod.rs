pub mod settings;

use std::path::Path;

use settings::Settings;

/// 入力パスからsettings.yamlを自動検出して読み込む。
///
/// 入力がディレクトリならその中、ファイルなら同じディレクトリの
/// `settings.yaml` を探す。存在しなければデフォルト設定を返す。
pub fn load_settings_for_input(input: &Path) -> crate::error::Result<Settings> {
    let dir = if input.is_dir() {
        input
    } else {
        input.parent().ok_or_else(|| {
            crate::error::PdfBindError::config("Cannot determine input directory")
        })?
    };

    let settings_path = dir.join("settings.yaml");

    if settings_path.exists() {
        Settings::from_file(&settings_path)
    } else {
        Ok(Settings::default())
    }
}
