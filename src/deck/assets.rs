/// Image references: resolving Markdown paths and reading pixel sizes.
use std::path::{Path, PathBuf};

/// Check whether a reference points at a web resource.
///
/// Remote images are never downloaded.
pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Resolve an image reference found in a Markdown file located in `base_dir`.
///
/// `http://` and `https://` references pass through unchanged, a leading `./` is
/// dropped and everything else is joined onto `base_dir` (absolute paths stay
/// absolute).
///
/// # Examples
///
/// ```rust
/// use slidemark::deck::resolve_image_ref;
/// use std::path::{Path, PathBuf};
///
/// let base = Path::new("/docs");
/// assert_eq!(resolve_image_ref("./img/a.png", base), PathBuf::from("/docs/img/a.png"));
/// assert_eq!(
///     resolve_image_ref("https://example.com/a.png", base),
///     PathBuf::from("https://example.com/a.png")
/// );
/// ```
pub fn resolve_image_ref(reference: &str, base_dir: &Path) -> PathBuf {
    if is_remote(reference) {
        return PathBuf::from(reference);
    }
    let relative = reference.strip_prefix("./").unwrap_or(reference);
    base_dir.join(relative)
}

/// Read the pixel dimensions of an image file without decoding the pixels.
///
/// Returns `None` when the file cannot be opened or its format is not understood.
#[cfg(feature = "imgconv")]
pub fn probe_pixel_size(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(dims) => Some(dims),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot read image dimensions");
            None
        },
    }
}

/// Read the pixel dimensions of an image file without decoding the pixels.
///
/// Built without image support, so the size is never known.
#[cfg(not(feature = "imgconv"))]
pub fn probe_pixel_size(_path: &Path) -> Option<(u32, u32)> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_references_pass_through() {
        let base = Path::new("/base");
        assert_eq!(
            resolve_image_ref("http://host/x.png", base),
            PathBuf::from("http://host/x.png")
        );
        assert!(is_remote("https://host/x.png"));
        assert!(!is_remote("ftp://host/x.png"));
    }

    #[test]
    fn test_relative_references_join_base() {
        let base = Path::new("/base/docs");
        assert_eq!(
            resolve_image_ref("a.png", base),
            PathBuf::from("/base/docs/a.png")
        );
        assert_eq!(
            resolve_image_ref("./sub/a.png", base),
            PathBuf::from("/base/docs/sub/a.png")
        );
        assert_eq!(
            resolve_image_ref("/abs/a.png", base),
            PathBuf::from("/abs/a.png")
        );
    }

    #[test]
    fn test_probe_missing_file() {
        assert_eq!(probe_pixel_size(Path::new("/no/such/image.png")), None);
    }

    #[cfg(feature = "imgconv")]
    #[test]
    fn test_probe_png_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbImage::new(4, 3).save(&path).unwrap();
        assert_eq!(probe_pixel_size(&path), Some((4, 3)));
    }
}
