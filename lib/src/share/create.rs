//! Resources needed to create share links

use std::borrow::Cow;

use super::{CreatedShare, TrafficSwitch};

/// Parameters used to create a free share link
///
/// ```rust
/// use pan123::share::create::CreateShareParams;
///
/// let params = CreateShareParams::new("holidays", 7, vec![12, 13]).with_password("s3cr");
/// ```
#[derive(Clone, Debug, serde::Serialize)]
pub struct CreateShareParams<'a> {
    #[serde(rename = "shareName")]
    pub share_name: Cow<'a, str>,
    /// Validity in days, one of 0 (forever), 1, 7 or 30
    #[serde(rename = "shareExpire")]
    pub expire_days: u32,
    #[serde(rename = "fileIDList", serialize_with = "super::serialize_file_ids")]
    pub file_ids: Vec<u64>,
    #[serde(rename = "sharePwd", skip_serializing_if = "Option::is_none")]
    pub password: Option<Cow<'a, str>>,
    #[serde(rename = "trafficSwitch", skip_serializing_if = "Option::is_none")]
    pub traffic_switch: Option<TrafficSwitch>,
    #[serde(
        rename = "trafficLimitSwitch",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_limit_switch"
    )]
    pub traffic_limit_switch: Option<bool>,
    /// Traffic limit in bytes
    #[serde(rename = "trafficLimit", skip_serializing_if = "Option::is_none")]
    pub traffic_limit: Option<u64>,
}

impl<'a> CreateShareParams<'a> {
    pub fn new(
        share_name: impl Into<Cow<'a, str>>,
        expire_days: u32,
        file_ids: Vec<u64>,
    ) -> Self {
        Self {
            share_name: share_name.into(),
            expire_days,
            file_ids,
            password: None,
            traffic_switch: None,
            traffic_limit_switch: None,
            traffic_limit: None,
        }
    }

    pub fn set_password(&mut self, value: impl Into<Cow<'a, str>>) {
        self.password = Some(value.into());
    }

    pub fn with_password(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.set_password(value);
        self
    }

    pub fn set_traffic_switch(&mut self, value: TrafficSwitch) {
        self.traffic_switch = Some(value);
    }

    pub fn with_traffic_switch(mut self, value: TrafficSwitch) -> Self {
        self.set_traffic_switch(value);
        self
    }

    /// Limits the traffic of the link to `bytes`.
    pub fn set_traffic_limit(&mut self, bytes: u64) {
        self.traffic_limit_switch = Some(true);
        self.traffic_limit = Some(bytes);
    }

    pub fn with_traffic_limit(mut self, bytes: u64) -> Self {
        self.set_traffic_limit(bytes);
        self
    }

    fn validate(&self) -> crate::Result<()> {
        crate::validate::share_expire_days(self.expire_days)?;
        crate::validate::share_files(self.file_ids.len())
    }
}

/// Parameters used to create a share link that has to be paid for
#[derive(Clone, Debug, serde::Serialize)]
pub struct CreatePaidShareParams<'a> {
    #[serde(rename = "shareName")]
    pub share_name: Cow<'a, str>,
    #[serde(rename = "shareExpire")]
    pub expire_days: u32,
    #[serde(rename = "fileIDList", serialize_with = "super::serialize_file_ids")]
    pub file_ids: Vec<u64>,
    /// Price in cents
    pub price: u64,
    #[serde(rename = "sharePwd", skip_serializing_if = "Option::is_none")]
    pub password: Option<Cow<'a, str>>,
}

impl<'a> CreatePaidShareParams<'a> {
    pub fn new(
        share_name: impl Into<Cow<'a, str>>,
        expire_days: u32,
        file_ids: Vec<u64>,
        price: u64,
    ) -> Self {
        Self {
            share_name: share_name.into(),
            expire_days,
            file_ids,
            price,
            password: None,
        }
    }

    pub fn set_password(&mut self, value: impl Into<Cow<'a, str>>) {
        self.password = Some(value.into());
    }

    pub fn with_password(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.set_password(value);
        self
    }
}

impl crate::Client {
    /// Creates a share link for up to 100 files.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without calling the API, when the validity is not one
    /// of 0, 1, 7 or 30 days or when the number of files is not between 1 and 100.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// use pan123::share::create::CreateShareParams;
    ///
    /// let share = client
    ///     .create_share(&CreateShareParams::new("holidays", 7, vec![12345]))
    ///     .await?;
    /// println!("{}", share.share_url());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_share(
        &self,
        params: &CreateShareParams<'_>,
    ) -> crate::Result<CreatedShare> {
        params.validate()?;
        self.post_request("/api/v1/share/create", params).await
    }

    /// Creates a share link that visitors have to pay for.
    pub async fn create_paid_share(
        &self,
        params: &CreatePaidShareParams<'_>,
    ) -> crate::Result<CreatedShare> {
        crate::validate::share_expire_days(params.expire_days)?;
        crate::validate::share_files(params.file_ids.len())?;
        self.post_request("/api/v1/share/paid/create", params).await
    }
}
