//! Resources needed to list the content of a folder, one page at a time or as a stream

use std::borrow::Cow;

use futures_util::{Stream, TryStreamExt};

use super::{FileInfo, FileList};

/// How the search keyword is matched
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Fuzzy,
    Exact,
}

impl SearchMode {
    fn code(self) -> u8 {
        match self {
            Self::Fuzzy => 0,
            Self::Exact => 1,
        }
    }
}

/// Parameters used to list the files of a folder
///
/// A search keyword makes the API look through the whole drive instead of the folder.
#[derive(Clone, Debug)]
pub struct ListFilesParams<'a> {
    pub parent_file_id: u64,
    /// Files per page, from 1 to 100
    pub limit: u32,
    pub last_file_id: Option<i64>,
    pub search: Option<Cow<'a, str>>,
    pub search_mode: SearchMode,
}

impl<'a> ListFilesParams<'a> {
    pub fn new(parent_file_id: u64) -> Self {
        Self {
            parent_file_id,
            limit: crate::validate::MAX_PAGE_LIMIT,
            last_file_id: None,
            search: None,
            search_mode: SearchMode::default(),
        }
    }

    pub fn set_limit(&mut self, value: u32) {
        self.limit = value;
    }

    pub fn with_limit(mut self, value: u32) -> Self {
        self.set_limit(value);
        self
    }

    /// Starts after the given file, as returned by the previous page.
    pub fn set_last_file_id(&mut self, value: i64) {
        self.last_file_id = Some(value);
    }

    pub fn with_last_file_id(mut self, value: i64) -> Self {
        self.set_last_file_id(value);
        self
    }

    pub fn set_search(&mut self, value: impl Into<Cow<'a, str>>, mode: SearchMode) {
        self.search = Some(value.into());
        self.search_mode = mode;
    }

    pub fn with_search(mut self, value: impl Into<Cow<'a, str>>, mode: SearchMode) -> Self {
        self.set_search(value, mode);
        self
    }
}

impl Default for ListFilesParams<'_> {
    fn default() -> Self {
        Self::new(super::ROOT_FOLDER_ID)
    }
}

#[derive(serde::Serialize)]
struct ListFilesQuery<'a> {
    #[serde(rename = "parentFileId")]
    parent_file_id: u64,
    limit: u32,
    #[serde(rename = "lastFileId", skip_serializing_if = "Option::is_none")]
    last_file_id: Option<i64>,
    #[serde(rename = "searchData", skip_serializing_if = "Option::is_none")]
    search_data: Option<&'a str>,
    #[serde(rename = "searchMode", skip_serializing_if = "Option::is_none")]
    search_mode: Option<u8>,
}

impl<'a> From<&'a ListFilesParams<'a>> for ListFilesQuery<'a> {
    fn from(value: &'a ListFilesParams<'a>) -> Self {
        let search_data = value.search.as_deref().filter(|s| !s.is_empty());
        Self {
            parent_file_id: value.parent_file_id,
            limit: value.limit,
            last_file_id: value.last_file_id,
            search_data,
            search_mode: search_data.map(|_| value.search_mode.code()),
        }
    }
}

impl crate::Client {
    /// Lists one page of files.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the limit is not between 1 and 100.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// use pan123::file::list::ListFilesParams;
    ///
    /// let page = client.list_files(&ListFilesParams::new(0).with_limit(20)).await?;
    /// for file in page.file_list.iter() {
    ///     println!("{} ({} bytes)", file.filename, file.size);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_files(&self, params: &ListFilesParams<'_>) -> crate::Result<FileList> {
        crate::validate::page_limit(params.limit)?;
        self.get_request("/api/v2/file/list", ListFilesQuery::from(params))
            .await
    }

    /// Streams every file matching the parameters, requesting the next page when needed.
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// use futures_util::TryStreamExt;
    /// use pan123::file::list::ListFilesParams;
    ///
    /// let files: Vec<_> = client
    ///     .list_all_files(ListFilesParams::new(0))
    ///     .try_collect()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn list_all_files<'a>(
        &'a self,
        params: ListFilesParams<'a>,
    ) -> impl Stream<Item = crate::Result<FileInfo>> + 'a {
        futures_util::stream::try_unfold(Some(params), move |state| async move {
            let Some(params) = state else {
                return Ok(None);
            };
            let page = self.list_files(&params).await?;
            tracing::debug!(
                "received {} files, last file id {}",
                page.file_list.len(),
                page.last_file_id
            );
            let next = page
                .has_more()
                .then(|| params.with_last_file_id(page.last_file_id));
            let files = page.file_list.into_iter().map(Ok::<_, crate::Error>);
            Ok::<_, crate::Error>(Some((futures_util::stream::iter(files), next)))
        })
        .try_flatten()
    }
}
