//! Resources needed to list share links

use futures_util::{Stream, TryStreamExt};

use super::{ShareInfo, ShareList};

#[derive(serde::Serialize)]
struct ListSharesParams {
    limit: u32,
    #[serde(rename = "lastShareId", skip_serializing_if = "Option::is_none")]
    last_share_id: Option<i64>,
}

impl crate::Client {
    async fn list_shares_from(
        &self,
        path: &str,
        limit: u32,
        last_share_id: Option<i64>,
    ) -> crate::Result<ShareList> {
        crate::validate::page_limit(limit)?;
        self.get_request(
            path,
            ListSharesParams {
                limit,
                last_share_id,
            },
        )
        .await
    }

    /// Lists one page of free share links.
    pub async fn list_shares(
        &self,
        limit: u32,
        last_share_id: Option<i64>,
    ) -> crate::Result<ShareList> {
        self.list_shares_from("/api/v1/share/list", limit, last_share_id)
            .await
    }

    /// Streams all the free share links.
    pub fn list_all_shares(
        &self,
        limit: u32,
    ) -> impl Stream<Item = crate::Result<ShareInfo>> + '_ {
        futures_util::stream::try_unfold(Some(None), move |state| async move {
            let Some(last_share_id) = state else {
                return Ok(None);
            };
            let page = self.list_shares(limit, last_share_id).await?;
            let next = page.has_more().then_some(Some(page.last_share_id));
            let shares = page.share_list.into_iter().map(Ok::<_, crate::Error>);
            Ok::<_, crate::Error>(Some((futures_util::stream::iter(shares), next)))
        })
        .try_flatten()
    }

    /// Lists one page of paid share links.
    pub async fn list_paid_shares(
        &self,
        limit: u32,
        last_share_id: Option<i64>,
    ) -> crate::Result<ShareList> {
        self.list_shares_from("/api/v1/share/paid/list", limit, last_share_id)
            .await
    }
}
