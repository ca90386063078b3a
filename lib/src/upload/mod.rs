//! Resources needed to upload files
//!
//! An upload goes through three steps:
//!
//! 1. a session is created with the name, size and MD5 digest of the file. When the content
//!    is already stored, the server answers with the id of the new file right away and
//!    nothing else is sent (rapid upload);
//! 2. the content is sent in slices of the size imposed by the server;
//! 3. the upload is marked complete, which the server may take a few attempts to confirm
//!    while it verifies the content.
//!
//! [`Client::upload_file`](crate::Client::upload_file) runs the whole pipeline, while the
//! functions of the submodules expose every step.

use std::borrow::Cow;
use std::time::Duration;

pub mod complete;
pub mod create;
pub mod digest;
pub mod pipeline;
pub mod slice;
pub mod upload_slice;

/// What to do when a file with the same name exists in the target folder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Duplicate {
    /// Both files are kept, the new one gets renamed
    KeepBoth,
    Overwrite,
}

impl serde::Serialize for Duplicate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Self::KeepBoth => 1,
            Self::Overwrite => 2,
        })
    }
}

/// How long to wait for the server to confirm an upload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(1),
        }
    }
}

impl CompletionPolicy {
    /// Creates a policy, always allowing at least one attempt.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

type ProgressCallback<'a> = Box<dyn FnMut(u64, u64) + Send + 'a>;

/// Options of an upload
///
/// ```rust
/// use pan123::upload::{Duplicate, UploadOptions};
///
/// let options = UploadOptions::default()
///     .with_duplicate(Duplicate::Overwrite)
///     .with_progress(|sent, total| println!("{sent}/{total}"));
/// ```
#[derive(Default)]
pub struct UploadOptions<'a> {
    /// Name of the file once uploaded, defaults to the name of the local file
    pub filename: Option<Cow<'a, str>>,
    pub duplicate: Option<Duplicate>,
    /// Lets the filename contain a path, the missing folders get created
    pub contain_dir: bool,
    pub completion: CompletionPolicy,
    progress: Option<ProgressCallback<'a>>,
}

impl std::fmt::Debug for UploadOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadOptions")
            .field("filename", &self.filename)
            .field("duplicate", &self.duplicate)
            .field("contain_dir", &self.contain_dir)
            .field("completion", &self.completion)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl<'a> UploadOptions<'a> {
    pub fn set_filename(&mut self, value: impl Into<Cow<'a, str>>) {
        self.filename = Some(value.into());
    }

    pub fn with_filename(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.set_filename(value);
        self
    }

    pub fn set_duplicate(&mut self, value: Duplicate) {
        self.duplicate = Some(value);
    }

    pub fn with_duplicate(mut self, value: Duplicate) -> Self {
        self.set_duplicate(value);
        self
    }

    pub fn set_contain_dir(&mut self, value: bool) {
        self.contain_dir = value;
    }

    pub fn with_contain_dir(mut self, value: bool) -> Self {
        self.set_contain_dir(value);
        self
    }

    pub fn set_completion(&mut self, value: CompletionPolicy) {
        self.completion = value;
    }

    pub fn with_completion(mut self, value: CompletionPolicy) -> Self {
        self.set_completion(value);
        self
    }

    /// Called after every slice with the number of bytes sent so far and the total size.
    pub fn set_progress<F>(&mut self, callback: F)
    where
        F: FnMut(u64, u64) + Send + 'a,
    {
        self.progress = Some(Box::new(callback));
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(u64, u64) + Send + 'a,
    {
        self.set_progress(callback);
        self
    }

    fn report(&mut self, sent: u64, total: u64) {
        if let Some(ref mut callback) = self.progress {
            callback(sent, total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CompletionPolicy, Duplicate};

    #[test]
    fn should_serialize_duplicate_as_code() {
        assert_eq!(serde_json::to_string(&Duplicate::KeepBoth).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Duplicate::Overwrite).unwrap(), "2");
    }

    #[test]
    fn should_retry_ten_times_every_second_by_default() {
        let policy = CompletionPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.delay, std::time::Duration::from_secs(1));
    }

    #[test]
    fn should_allow_at_least_one_attempt() {
        let policy = CompletionPolicy::new(0, std::time::Duration::ZERO);
        assert_eq!(policy.max_attempts, 1);
        let policy = CompletionPolicy {
            max_attempts: 0,
            ..CompletionPolicy::default()
        };
        assert_eq!(policy.attempts(), 1);
    }
}
