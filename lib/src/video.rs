//! Resources needed to transcode videos and play them

use std::borrow::Cow;

use crate::task::TaskStatus;

pub const DEFAULT_RESOLUTION: &str = "720p";
pub const DEFAULT_FORMAT: &str = "m3u8";

#[derive(serde::Serialize)]
struct TranscodeParams<'a> {
    #[serde(rename = "fileID")]
    file_id: u64,
    resolution: Cow<'a, str>,
    format: Cow<'a, str>,
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

#[derive(serde::Serialize)]
struct PlayParams {
    #[serde(rename = "fileID")]
    file_id: u64,
}

#[derive(serde::Deserialize)]
struct PlayResponse {
    #[serde(rename = "playUrl", default)]
    play_url: String,
}

/// State of a video transcode
#[derive(Clone, Debug, serde::Deserialize)]
pub struct TranscodeTask {
    #[serde(rename = "taskID")]
    pub task_id: u64,
    #[serde(rename = "fileID")]
    pub file_id: u64,
    /// `0` queued, `1` in progress, `2` succeeded, `3` failed
    #[serde(rename = "status")]
    pub status_code: i64,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub format: String,
    #[serde(rename = "playUrl", default)]
    pub play_url: Option<String>,
}

impl TranscodeTask {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_transcode_code(self.status_code)
    }
}

impl crate::Client {
    /// Starts transcoding a video and returns the id of the task.
    ///
    /// Use [`DEFAULT_RESOLUTION`] and [`DEFAULT_FORMAT`] when there is no preference.
    pub async fn create_transcode_task<'a>(
        &self,
        file_id: u64,
        resolution: impl Into<Cow<'a, str>>,
        format: impl Into<Cow<'a, str>>,
    ) -> crate::Result<u64> {
        let params = TranscodeParams {
            file_id,
            resolution: resolution.into(),
            format: format.into(),
        };
        self.post_request::<CreatedTask, _>("/api/v1/video/transcode", params)
            .await
            .map(|res| res.task_id)
    }

    /// Gets the state of a video transcode.
    pub async fn get_transcode_status(&self, task_id: u64) -> crate::Result<TranscodeTask> {
        self.get_request("/api/v1/video/transcode/status", TaskParams { task_id })
            .await
    }

    /// Gets the url to play a transcoded video.
    pub async fn get_play_url(&self, file_id: u64) -> crate::Result<String> {
        self.get_request::<PlayResponse, _>("/api/v1/video/play", PlayParams { file_id })
            .await
            .map(|res| res.play_url)
    }
}
