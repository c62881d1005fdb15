use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

pub const DEFAULT_LEAVE_MESSAGE: &str =
    "Are you sure you want to leave this page without saving? /n Please use translatable string.";
pub const DEFAULT_DELETE_MESSAGE: &str = "Would you like to perform this delete action?";
pub const DEFAULT_DELETE_REQUEST: &str = "Delete";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub quick_edit_cookie: String,
    pub edit_link_class: String,
    pub edit_link_tags: Vec<String>,
    pub hide_edit_id: String,
    pub show_edit_id: String,
    pub leave_message: String,
    pub delete_message: String,
    pub delete_request: String,
    pub cookie_path: Option<String>,
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
    pub cookie_max_age_days: Option<i64>, // None = session cookie
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quick_edit_cookie: "MarvelQuickEdit".to_string(),
            edit_link_class: "eLink".to_string(),
            edit_link_tags: vec!["a".to_string(), "img".to_string()],
            hide_edit_id: "hideEdit".to_string(),
            show_edit_id: "showEdit".to_string(),
            leave_message: DEFAULT_LEAVE_MESSAGE.to_string(),
            delete_message: DEFAULT_DELETE_MESSAGE.to_string(),
            delete_request: DEFAULT_DELETE_REQUEST.to_string(),
            cookie_path: None,
            cookie_domain: None,
            cookie_secure: false,
            cookie_max_age_days: None,
        }
    }
}

impl Settings {
    /// Reads settings from `path`. `Ok(None)` when no file has been written yet.
    pub fn read(path: &Path) -> Result<Option<Self>, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("read {}: {}", path.display(), e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| format!("parse {}: {}", path.display(), e))
    }

    /// Like [`read`](Settings::read), but any problem yields the defaults.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("[Settings] {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_vec_pretty(self).map_err(|e| e.to_string())?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| format!("create {}: {}", dir.display(), e))?;
        }

        // Readers only ever see the old file or the complete new one.
        let staged = path.with_extension("json.tmp");
        fs::write(&staged, json).map_err(|e| format!("write {}: {}", staged.display(), e))?;
        fs::rename(&staged, path).map_err(|e| format!("rename {}: {}", staged.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_constants() {
        let settings = Settings::default();
        assert_eq!(settings.quick_edit_cookie, "MarvelQuickEdit");
        assert_eq!(settings.edit_link_class, "eLink");
        assert_eq!(settings.edit_link_tags, vec!["a", "img"]);
        assert_eq!(settings.delete_request, "Delete");
        assert!(settings.cookie_max_age_days.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.cookie_path = Some("/pls/apex".to_string());
        settings.cookie_max_age_days = Some(30);
        settings.save(&path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("absent.json")), Settings::default());
    }

    #[test]
    fn test_read_reports_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::read(&path), Ok(None));

        fs::write(&path, "{ not json").unwrap();
        let err = Settings::read(&path).unwrap_err();
        assert!(err.starts_with("parse "), "unexpected error: {}", err);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
