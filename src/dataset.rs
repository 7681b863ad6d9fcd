//! Image discovery and the images/labels directory layout.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, YoloEvalError};
use crate::types::ImageSize;

/// Image file extensions picked up from the images directory (case-insensitive).
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

const LABEL_EXTENSION: &str = "txt";

/// Where the images and the two mirrored label trees live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub images_dir: PathBuf,
    pub ground_truth_dir: PathBuf,
    pub predictions_dir: PathBuf,
}

impl DatasetLayout {
    pub fn new(
        images_dir: impl Into<PathBuf>,
        ground_truth_dir: impl Into<PathBuf>,
        predictions_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            images_dir: images_dir.into(),
            ground_truth_dir: ground_truth_dir.into(),
            predictions_dir: predictions_dir.into(),
        }
    }

    /// Check that all three directories exist.
    pub fn validate(&self) -> Result<()> {
        for dir in [&self.images_dir, &self.ground_truth_dir, &self.predictions_dir] {
            if !dir.is_dir() {
                return Err(YoloEvalError::MissingDirectory(dir.clone()));
            }
        }
        Ok(())
    }

    /// Build the entry for the image at `image_path`.
    ///
    /// Label files share the image's stem with a `.txt` extension.
    pub fn entry_for(&self, image_path: &Path) -> ImageEntry {
        let id = image_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Not `with_extension`: stems like `frame.001` keep their dots
        let label_name = format!("{}.{}", id, LABEL_EXTENSION);

        ImageEntry {
            gt_label_path: self.ground_truth_dir.join(&label_name),
            pred_label_path: self.predictions_dir.join(&label_name),
            image_path: image_path.to_path_buf(),
            id,
        }
    }

    /// List the images to evaluate, sorted by file name.
    ///
    /// Only files directly inside `images_dir` with an extension from
    /// [`IMAGE_EXTENSIONS`] are returned, so the order does not depend on
    /// how the filesystem happens to list the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or holds no images.
    pub fn collect_images(&self) -> Result<Vec<ImageEntry>> {
        let mut entries = Vec::new();

        for dir_entry in WalkDir::new(&self.images_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let dir_entry = dir_entry.map_err(|e| YoloEvalError::IoError(e.into()))?;
            if dir_entry.file_type().is_file() && has_image_extension(dir_entry.path()) {
                entries.push(self.entry_for(dir_entry.path()));
            }
        }

        if entries.is_empty() {
            return Err(YoloEvalError::EmptyDataset(format!(
                "No {} images found in {}",
                IMAGE_EXTENSIONS.join("/"),
                self.images_dir.display()
            )));
        }

        Ok(entries)
    }
}

/// One image and the label files that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// File stem, shared with the label files
    pub id: String,
    pub image_path: PathBuf,
    pub gt_label_path: PathBuf,
    pub pred_label_path: PathBuf,
}

/// Read an image's width and height from its header.
pub fn read_image_size(path: &Path) -> Result<ImageSize> {
    let (width, height) =
        image::image_dimensions(path).map_err(|source| YoloEvalError::ImageError {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(ImageSize::new(width, height))
}

fn has_image_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
}
