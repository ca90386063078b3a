//! Client side checks, applied before any request is sent.

use crate::Error;

pub const MAX_FILENAME_LENGTH: usize = 255;
pub const INVALID_FILENAME_CHARS: &str = r#""\/:*?|><"#;
/// Upload limit of the developer platform, per file
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024 * 1024;
pub const MAX_BATCH_SIZE: usize = 100;
pub const MAX_PAGE_LIMIT: u32 = 100;
pub const MAX_SHARE_FILES: usize = 100;
pub const SHARE_EXPIRE_DAYS: [u32; 4] = [0, 1, 7, 30];
pub const IMAGE_FORMATS: [&str; 9] = [
    "png", "gif", "jpeg", "jpg", "tiff", "tif", "webp", "svg", "bmp",
];
pub const MAX_IP_BLACKLIST: usize = 2000;

/// Checks a file or folder name.
///
/// A valid name is not empty, has at most 255 characters, is not only made of
/// whitespaces and contains none of `"\/:*?|><`.
pub fn filename(name: &str) -> crate::Result<()> {
    if name.is_empty() {
        return Err(Error::validation("filename cannot be empty"));
    }
    if name.chars().count() > MAX_FILENAME_LENGTH {
        return Err(Error::validation(format!(
            "filename must be less than {} characters",
            MAX_FILENAME_LENGTH + 1
        )));
    }
    if name.trim().is_empty() {
        return Err(Error::validation("filename cannot be all spaces"));
    }
    if name.contains(|c: char| INVALID_FILENAME_CHARS.contains(c)) {
        return Err(Error::validation(format!(
            "filename cannot contain any of these characters: {INVALID_FILENAME_CHARS}"
        )));
    }
    Ok(())
}

/// Checks the size of a file to upload.
pub fn upload_size(size: u64) -> crate::Result<()> {
    if size == 0 {
        return Err(Error::validation("file is empty (0 bytes)"));
    }
    if size > MAX_FILE_SIZE {
        return Err(Error::validation(format!(
            "file size exceeds {}GB limit (actual: {:.2}GB)",
            MAX_FILE_SIZE >> 30,
            size as f64 / (1u64 << 30) as f64
        )));
    }
    Ok(())
}

/// Checks the number of items of a batch operation.
pub fn batch_size(count: usize, operation: &str) -> crate::Result<()> {
    if count == 0 {
        return Err(Error::validation(format!(
            "batch {operation} requires at least 1 item"
        )));
    }
    if count > MAX_BATCH_SIZE {
        return Err(Error::validation(format!(
            "batch {operation} limited to {MAX_BATCH_SIZE} items (requested: {count})"
        )));
    }
    Ok(())
}

/// Checks the number of items requested per page.
pub fn page_limit(limit: u32) -> crate::Result<()> {
    if limit == 0 {
        return Err(Error::validation("limit must be greater than 0"));
    }
    if limit > MAX_PAGE_LIMIT {
        return Err(Error::validation(format!(
            "limit cannot exceed {MAX_PAGE_LIMIT}"
        )));
    }
    Ok(())
}

/// Checks the files of a share, at most 100 of them.
pub fn share_files(count: usize) -> crate::Result<()> {
    if count == 0 {
        return Err(Error::validation("a share requires at least 1 file"));
    }
    if count > MAX_SHARE_FILES {
        return Err(Error::validation(format!(
            "cannot share more than {MAX_SHARE_FILES} files, got {count}"
        )));
    }
    Ok(())
}

/// Checks the validity period of a share, in days, `0` meaning forever.
pub fn share_expire_days(days: u32) -> crate::Result<()> {
    if SHARE_EXPIRE_DAYS.contains(&days) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "share expiration must be one of {SHARE_EXPIRE_DAYS:?} days, got {days}"
        )))
    }
}

/// Checks that an offline download url uses http or https.
pub fn offline_url(url: &str) -> crate::Result<()> {
    let lower = url.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Ok(());
    }
    let preview: String = url.chars().take(20).collect();
    Err(Error::validation(format!(
        "only http and https urls are supported, got: {preview}..."
    )))
}

/// Returns the lowercase extension of an image name, if it is a supported format.
pub fn image_format(filename: &str) -> crate::Result<String> {
    let format = std::path::Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if IMAGE_FORMATS.contains(&format.as_str()) {
        Ok(format)
    } else {
        Err(Error::validation(format!(
            "unsupported image format {format:?}, supported formats: {}",
            IMAGE_FORMATS.join(", ")
        )))
    }
}

/// Checks the size of an IP blacklist.
pub fn ip_list(count: usize) -> crate::Result<()> {
    if count > MAX_IP_BLACKLIST {
        return Err(Error::validation(format!(
            "ip blacklist limited to {MAX_IP_BLACKLIST} entries (requested: {count})"
        )));
    }
    Ok(())
}
