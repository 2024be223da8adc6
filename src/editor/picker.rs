//! Where save and load paths come from.

use std::path::PathBuf;

/// Source of file paths for saving and loading. `None` means the user
/// cancelled.
pub trait FilePicker {
    /// Path to save to.
    fn pick_save_destination(&mut self) -> Option<PathBuf>;
    /// Path to load from.
    fn pick_load_source(&mut self) -> Option<PathBuf>;
}

/// Always answers with the same path. Used when no dialog is available.
#[derive(Debug, Clone)]
pub struct FixedPathPicker {
    path: Option<PathBuf>,
}

impl FixedPathPicker {
    /// Picker that always answers `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A picker that always cancels.
    pub fn cancelled() -> Self {
        Self { path: None }
    }
}

impl FilePicker for FixedPathPicker {
    fn pick_save_destination(&mut self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn pick_load_source(&mut self) -> Option<PathBuf> {
        self.path.clone()
    }
}

/// Native open/save dialogs.
#[cfg(feature = "native-dialogs")]
#[derive(Debug, Clone)]
pub struct NativePicker {
    extension: String,
}

#[cfg(feature = "native-dialogs")]
impl NativePicker {
    /// Dialogs filtering on `extension`.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    fn dialog(&self, title: &str) -> rfd::FileDialog {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Dungeon Map", &[self.extension.as_str()])
            .add_filter("All Files", &["*"])
    }
}

#[cfg(feature = "native-dialogs")]
impl FilePicker for NativePicker {
    fn pick_save_destination(&mut self) -> Option<PathBuf> {
        let path = self.dialog("Save Dungeon Map").save_file()?;
        if path.extension().is_none() {
            return Some(path.with_extension(&self.extension));
        }
        Some(path)
    }

    fn pick_load_source(&mut self) -> Option<PathBuf> {
        self.dialog("Load Dungeon Map").pick_file()
    }
}
