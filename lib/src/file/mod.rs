//! Resources needed to browse and manipulate the files of the drive
//!
//! Folders are files too on 123Pan: every [`FileInfo`] carries a `type` telling them apart.

pub mod copy;
pub mod delete;
pub mod download;
pub mod info;
pub mod list;
pub mod movefile;
pub mod rename;

/// Identifier of the root folder
pub const ROOT_FOLDER_ID: u64 = 0;

/// A file or a folder stored on the drive
#[derive(Clone, Debug, serde::Deserialize)]
pub struct FileInfo {
    #[serde(rename = "fileId")]
    pub file_id: u64,
    pub filename: String,
    /// `0` for a file, `1` for a folder
    #[serde(rename = "type")]
    pub kind: u8,
    /// Size in bytes
    pub size: u64,
    /// MD5 digest of the content, empty for folders
    #[serde(default)]
    pub etag: String,
    pub status: i64,
    #[serde(rename = "parentFileId")]
    pub parent_file_id: u64,
    pub category: i64,
    #[serde(default, deserialize_with = "crate::request::deserialize_flag")]
    pub trashed: bool,
}

impl FileInfo {
    pub fn is_folder(&self) -> bool {
        self.kind == 1
    }

    pub fn is_file(&self) -> bool {
        self.kind == 0
    }
}

/// A page of files
#[derive(Debug, serde::Deserialize)]
pub struct FileList {
    /// Cursor of the next page, `-1` when this page is the last one
    #[serde(rename = "lastFileId")]
    pub last_file_id: i64,
    #[serde(rename = "fileList", default)]
    pub file_list: Vec<FileInfo>,
}

impl FileList {
    pub fn has_more(&self) -> bool {
        self.last_file_id != -1
    }
}
