//! Resources needed to change existing share links

use std::borrow::Cow;

use super::TrafficSwitch;
use crate::request::Empty;

/// Changes to apply to a free share link, unset fields are left untouched
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct UpdateShareParams<'a> {
    #[serde(rename = "shareId")]
    pub share_id: u64,
    #[serde(rename = "shareName", skip_serializing_if = "Option::is_none")]
    pub share_name: Option<Cow<'a, str>>,
    #[serde(rename = "shareExpire", skip_serializing_if = "Option::is_none")]
    pub expire_days: Option<u32>,
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
    #[serde(rename = "trafficLimit", skip_serializing_if = "Option::is_none")]
    pub traffic_limit: Option<u64>,
}

impl<'a> UpdateShareParams<'a> {
    pub fn new(share_id: u64) -> Self {
        Self {
            share_id,
            ..Default::default()
        }
    }

    pub fn with_share_name(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.share_name = Some(value.into());
        self
    }

    pub fn with_expire_days(mut self, value: u32) -> Self {
        self.expire_days = Some(value);
        self
    }

    pub fn with_password(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.password = Some(value.into());
        self
    }

    pub fn with_traffic_switch(mut self, value: TrafficSwitch) -> Self {
        self.traffic_switch = Some(value);
        self
    }

    /// Removes any traffic limit when `None`.
    pub fn with_traffic_limit(mut self, bytes: Option<u64>) -> Self {
        self.traffic_limit_switch = Some(bytes.is_some());
        self.traffic_limit = bytes;
        self
    }
}

/// Changes to apply to a paid share link
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct UpdatePaidShareParams<'a> {
    #[serde(rename = "shareId")]
    pub share_id: u64,
    #[serde(rename = "shareName", skip_serializing_if = "Option::is_none")]
    pub share_name: Option<Cow<'a, str>>,
    #[serde(rename = "shareExpire", skip_serializing_if = "Option::is_none")]
    pub expire_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(rename = "sharePwd", skip_serializing_if = "Option::is_none")]
    pub password: Option<Cow<'a, str>>,
}

impl<'a> UpdatePaidShareParams<'a> {
    pub fn new(share_id: u64) -> Self {
        Self {
            share_id,
            ..Default::default()
        }
    }

    pub fn with_share_name(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.share_name = Some(value.into());
        self
    }

    pub fn with_expire_days(mut self, value: u32) -> Self {
        self.expire_days = Some(value);
        self
    }

    pub fn with_price(mut self, value: u64) -> Self {
        self.price = Some(value);
        self
    }

    pub fn with_password(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.password = Some(value.into());
        self
    }
}

impl crate::Client {
    /// Updates a free share link.
    ///
    /// Some accounts don't have access to this endpoint and get a not found error.
    pub async fn update_share(&self, params: &UpdateShareParams<'_>) -> crate::Result<()> {
        if let Some(days) = params.expire_days {
            crate::validate::share_expire_days(days)?;
        }
        self.put_request::<Empty, _>("/api/v1/share/update", params)
            .await
            .map(|_| ())
    }

    /// Updates a paid share link.
    pub async fn update_paid_share(
        &self,
        params: &UpdatePaidShareParams<'_>,
    ) -> crate::Result<()> {
        if let Some(days) = params.expire_days {
            crate::validate::share_expire_days(days)?;
        }
        self.put_request::<Empty, _>("/api/v1/share/paid/update", params)
            .await
            .map(|_| ())
    }
}
