//! Resources needed to manage the trash
//!
//! Files land here through [`Client::trash_files`](crate::Client::trash_files).

use futures_util::{Stream, TryStreamExt};

use crate::file::{FileInfo, FileList};
use crate::request::Empty;

#[derive(serde::Serialize)]
struct ListTrashParams {
    limit: u32,
    #[serde(rename = "lastFileId", skip_serializing_if = "Option::is_none")]
    last_file_id: Option<i64>,
}

#[derive(serde::Serialize)]
struct TrashedFileParams {
    #[serde(rename = "fileID")]
    file_id: u64,
}

impl crate::Client {
    /// Lists one page of the trash, starting after `last_file_id` when given.
    pub async fn list_trash(
        &self,
        limit: u32,
        last_file_id: Option<i64>,
    ) -> crate::Result<FileList> {
        crate::validate::page_limit(limit)?;
        self.get_request(
            "/api/v1/file/trash/list",
            ListTrashParams {
                limit,
                last_file_id,
            },
        )
        .await
    }

    /// Streams the whole content of the trash.
    pub fn list_all_trash(
        &self,
        limit: u32,
    ) -> impl Stream<Item = crate::Result<FileInfo>> + '_ {
        futures_util::stream::try_unfold(Some(None), move |state| async move {
            let Some(last_file_id) = state else {
                return Ok(None);
            };
            let page = self.list_trash(limit, last_file_id).await?;
            let next = page.has_more().then_some(Some(page.last_file_id));
            let files = page.file_list.into_iter().map(Ok::<_, crate::Error>);
            Ok::<_, crate::Error>(Some((futures_util::stream::iter(files), next)))
        })
        .try_flatten()
    }

    /// Puts a trashed file back where it was.
    pub async fn restore_file(&self, file_id: u64) -> crate::Result<()> {
        let params = TrashedFileParams { file_id };
        self.post_request::<Empty, _>("/api/v1/file/trash/restore", params)
            .await
            .map(|_| ())
    }

    /// Deletes a trashed file for good.
    pub async fn delete_permanently(&self, file_id: u64) -> crate::Result<()> {
        let params = TrashedFileParams { file_id };
        self.post_request::<Empty, _>("/api/v1/file/trash/delete", params)
            .await
            .map(|_| ())
    }

    /// Deletes every file of the trash for good.
    pub async fn empty_trash(&self) -> crate::Result<()> {
        self.post_request::<Empty, _>("/api/v1/file/trash/empty", serde_json::json!({}))
            .await
            .map(|_| ())
    }
}
