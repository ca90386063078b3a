//! Resources needed to let the server download files from the internet

use std::borrow::Cow;

use crate::task::TaskStatus;

/// Parameters used to create an offline download
#[derive(Clone, Debug, serde::Serialize)]
pub struct CreateDownloadTaskParams<'a> {
    /// Only http and https urls are accepted
    pub url: Cow<'a, str>,
    /// Name of the downloaded file, with its extension
    #[serde(rename = "fileName", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<Cow<'a, str>>,
    /// Target folder, the root folder is not accepted
    #[serde(rename = "dirID", skip_serializing_if = "Option::is_none")]
    pub dir_id: Option<u64>,
    /// Called by the server once the task is over
    #[serde(rename = "callBackUrl", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<Cow<'a, str>>,
}

impl<'a> CreateDownloadTaskParams<'a> {
    pub fn new(url: impl Into<Cow<'a, str>>) -> Self {
        Self {
            url: url.into(),
            file_name: None,
            dir_id: None,
            callback_url: None,
        }
    }

    pub fn with_file_name(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.file_name = Some(value.into());
        self
    }

    pub fn with_dir_id(mut self, value: u64) -> Self {
        self.dir_id = Some(value);
        self
    }

    pub fn with_callback_url(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.callback_url = Some(value.into());
        self
    }
}

#[derive(serde::Deserialize)]
struct CreatedTask {
    #[serde(rename = "taskID")]
    task_id: u64,
}

#[derive(serde::Serialize)]
struct TaskParams {
    #[serde(rename = "taskID")]
    task_id: u64,
}

/// State of an offline download
#[derive(Clone, Debug, serde::Deserialize)]
pub struct OfflineTask {
    #[serde(rename = "taskID", default)]
    pub task_id: u64,
    /// `0` succeeded, `1` failed, `2` in progress
    #[serde(rename = "status")]
    pub status_code: i64,
    #[serde(default)]
    pub progress: u32,
    #[serde(rename = "failReason", default)]
    pub fail_reason: String,
    #[serde(rename = "fileID", default)]
    pub file_id: Option<u64>,
    #[serde(default)]
    pub url: String,
}

impl OfflineTask {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_offline_code(self.status_code)
    }
}

impl crate::Client {
    /// Creates an offline download and returns the id of the task.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without calling the API, when the url is not http or https.
    pub async fn create_download_task(
        &self,
        params: &CreateDownloadTaskParams<'_>,
    ) -> crate::Result<u64> {
        crate::validate::offline_url(&params.url)?;
        self.post_request::<CreatedTask, _>("/api/v1/offline/download", params)
            .await
            .map(|res| res.task_id)
    }

    /// Gets the state of an offline download.
    pub async fn get_download_progress(&self, task_id: u64) -> crate::Result<OfflineTask> {
        let mut task: OfflineTask = self
            .get_request("/api/v1/offline/progress", TaskParams { task_id })
            .await?;
        // the progress payload doesn't always repeat the task id
        if task.task_id == 0 {
            task.task_id = task_id;
        }
        Ok(task)
    }
}
