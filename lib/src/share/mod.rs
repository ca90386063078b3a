//! Resources needed to share files through public links, free or paid

pub mod create;
pub mod list;
pub mod update;

const SHARE_URL_PREFIX: &str = "https://www.123pan.com/s/";

fn share_url(share_key: &str) -> String {
    format!("{SHARE_URL_PREFIX}{share_key}")
}

/// A share link
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ShareInfo {
    #[serde(rename = "shareId")]
    pub share_id: u64,
    #[serde(rename = "shareKey")]
    pub share_key: String,
    #[serde(rename = "shareName")]
    pub share_name: String,
    pub expiration: String,
    pub expired: u8,
    #[serde(rename = "sharePwd", default)]
    pub share_pwd: String,
    #[serde(rename = "trafficSwitch", default = "ShareInfo::switch_off")]
    pub traffic_switch: u8,
    #[serde(rename = "trafficLimitSwitch", default = "ShareInfo::switch_off")]
    pub traffic_limit_switch: u8,
    #[serde(rename = "trafficLimit", default)]
    pub traffic_limit: u64,
    #[serde(rename = "bytesCharge", default)]
    pub bytes_charge: u64,
    #[serde(rename = "previewCount", default)]
    pub preview_count: u64,
    #[serde(rename = "downloadCount", default)]
    pub download_count: u64,
    #[serde(rename = "saveCount", default)]
    pub save_count: u64,
}

impl ShareInfo {
    fn switch_off() -> u8 {
        1
    }

    pub fn share_url(&self) -> String {
        share_url(&self.share_key)
    }

    pub fn is_expired(&self) -> bool {
        self.expired == 1
    }

    pub fn has_password(&self) -> bool {
        !self.share_pwd.is_empty()
    }
}

/// A page of share links
#[derive(Debug, serde::Deserialize)]
pub struct ShareList {
    /// Cursor of the next page, `-1` when this page is the last one
    #[serde(rename = "lastShareId")]
    pub last_share_id: i64,
    #[serde(rename = "shareList", default)]
    pub share_list: Vec<ShareInfo>,
}

impl ShareList {
    pub fn has_more(&self) -> bool {
        self.last_share_id != -1
    }
}

/// A newly created share link
#[derive(Clone, Debug, serde::Deserialize)]
pub struct CreatedShare {
    #[serde(rename = "shareID")]
    pub share_id: u64,
    #[serde(rename = "shareKey")]
    pub share_key: String,
}

impl CreatedShare {
    pub fn share_url(&self) -> String {
        share_url(&self.share_key)
    }
}

/// Who pays for the traffic of a share link
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrafficSwitch {
    Off,
    Guests,
    OverQuota,
    On,
}

impl serde::Serialize for TrafficSwitch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Self::Off => 1,
            Self::Guests => 2,
            Self::OverQuota => 3,
            Self::On => 4,
        })
    }
}

pub(crate) fn serialize_limit_switch<S: serde::Serializer>(
    value: &Option<bool>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(true) => serializer.serialize_some(&2u8),
        Some(false) => serializer.serialize_some(&1u8),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn serialize_file_ids<S: serde::Serializer>(
    value: &[u64],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let joined = value
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}
