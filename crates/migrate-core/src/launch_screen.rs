//! iOS launch screen patch
//!
//! Drops the `LaunchImage` image view from the launch storyboard and turns
//! the white background into the app's brand blue.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{info, warn};

use crate::{MigrationError, Result};

/// Storyboard location relative to the project root
pub const DEFAULT_STORYBOARD_PATH: &str = "ios/Runner/Base.lproj/LaunchScreen.storyboard";

const IMAGE_VIEW_PLACEHOLDER: &str = "<!-- LaunchImage removed -->";
const WHITE_BACKGROUND: &str = r#"red="1" green="1" blue="1""#;
const BRAND_BACKGROUND: &str = r#"red="0" green="0.749" blue="1""#;

const LAUNCH_IMAGE_VIEW: &str = r#"(?s)<imageView[^>]*image="LaunchImage"[^>]*>.*?</imageView>"#;

/// What a storyboard patch changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoryboardPatch {
    pub image_views_removed: usize,
    pub backgrounds_recolored: usize,
}

impl StoryboardPatch {
    pub fn is_empty(&self) -> bool {
        self.image_views_removed == 0 && self.backgrounds_recolored == 0
    }
}

/// Patch storyboard XML text.
pub fn patch_storyboard(text: &str) -> Result<(String, StoryboardPatch)> {
    let image_view = Regex::new(LAUNCH_IMAGE_VIEW)?;
    let image_views_removed = image_view.find_iter(text).count();
    let without_image = image_view.replace_all(text, IMAGE_VIEW_PLACEHOLDER);

    let backgrounds_recolored = without_image.matches(WHITE_BACKGROUND).count();
    let patched = without_image.replace(WHITE_BACKGROUND, BRAND_BACKGROUND);

    Ok((
        patched,
        StoryboardPatch {
            image_views_removed,
            backgrounds_recolored,
        },
    ))
}

/// Patch the storyboard at `path` in place.
///
/// Returns `Ok(None)` when there is no file to patch.
pub fn patch_storyboard_file(path: &Path) -> Result<Option<StoryboardPatch>> {
    if !path.is_file() {
        warn!(path = %path.display(), "launch screen storyboard not found");
        return Ok(None);
    }

    let text = fs::read_to_string(path).map_err(|err| MigrationError::io(path, err))?;
    let (patched, patch) = patch_storyboard(&text)?;
    if !patch.is_empty() {
        fs::write(path, patched).map_err(|err| MigrationError::io(path, err))?;
    }

    info!(
        path = %path.display(),
        image_views = patch.image_views_removed,
        backgrounds = patch.backgrounds_recolored,
        "launch screen patched"
    );
    Ok(Some(patch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const STORYBOARD: &str = r#"<view key="view">
    <subviews>
        <imageView opaque="NO" image="LaunchImage" translatesAutoresizingMaskIntoConstraints="NO" id="YRO-k0-Ey4">
            <rect key="frame" x="0" y="0" width="168" height="185"/>
        </imageView>
    </subviews>
    <color key="backgroundColor" red="1" green="1" blue="1" alpha="1" colorSpace="custom"/>
</view>"#;

    #[test]
    fn test_patch_removes_image_and_recolors() {
        let (patched, patch) = patch_storyboard(STORYBOARD).unwrap();
        assert_eq!(
            patched,
            r#"<view key="view">
    <subviews>
        <!-- LaunchImage removed -->
    </subviews>
    <color key="backgroundColor" red="0" green="0.749" blue="1" alpha="1" colorSpace="custom"/>
</view>"#
        );
        assert_eq!(patch.image_views_removed, 1);
        assert_eq!(patch.backgrounds_recolored, 1);
    }

    #[test]
    fn test_other_image_views_survive() {
        let text = r#"<imageView image="Logo"></imageView>"#;
        let (patched, patch) = patch_storyboard(text).unwrap();
        assert_eq!(patched, text);
        assert!(patch.is_empty());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = patch_storyboard_file(&temp_dir.path().join(DEFAULT_STORYBOARD_PATH)).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_file_is_rewritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("LaunchScreen.storyboard");
        fs::write(&path, STORYBOARD).unwrap();

        let patch = patch_storyboard_file(&path).unwrap().unwrap();
        assert_eq!(patch.image_views_removed, 1);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains(IMAGE_VIEW_PLACEHOLDER));
        assert!(!written.contains("LaunchImage\""));
    }
}
