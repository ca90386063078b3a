//! Server side tasks, offline downloads and video transcodes, as seen by a poller.

/// Where a task stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Queued,
    InProgress,
    Succeeded,
    Failed,
}

impl TaskStatus {
    /// Status codes of offline downloads, unknown codes are considered queued
    pub fn from_offline_code(code: i64) -> Self {
        match code {
            0 => Self::Succeeded,
            1 => Self::Failed,
            2 => Self::InProgress,
            _ => Self::Queued,
        }
    }

    /// Status codes of video transcodes, unknown codes are considered queued
    pub fn from_transcode_code(code: i64) -> Self {
        match code {
            1 => Self::InProgress,
            2 => Self::Succeeded,
            3 => Self::Failed,
            _ => Self::Queued,
        }
    }

    /// The task will not change anymore
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Queued => "queued",
            Self::InProgress => "in progress",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

/// The common view over a task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskResult {
    pub task_id: u64,
    pub status: TaskStatus,
    pub progress_percent: u8,
    /// What the task produced: the id of the downloaded file or the url of the video
    pub result_reference: Option<String>,
}

impl From<crate::offline::OfflineTask> for TaskResult {
    fn from(value: crate::offline::OfflineTask) -> Self {
        Self {
            task_id: value.task_id,
            status: value.status(),
            progress_percent: value.progress.min(100) as u8,
            result_reference: value.file_id.map(|id| id.to_string()),
        }
    }
}

impl From<crate::video::TranscodeTask> for TaskResult {
    fn from(value: crate::video::TranscodeTask) -> Self {
        Self {
            task_id: value.task_id,
            status: value.status(),
            progress_percent: value.progress.min(100) as u8,
            result_reference: value.play_url,
        }
    }
}
