//! IP blacklist applied to the direct links

use crate::request::Empty;

/// The blacklist and whether it is applied
#[derive(Clone, Debug, serde::Deserialize)]
pub struct IpBlacklist {
    #[serde(rename = "ipList", default)]
    pub ip_list: Vec<String>,
    /// `1` enabled, `2` disabled
    pub status: u8,
}

impl IpBlacklist {
    pub fn is_enabled(&self) -> bool {
        self.status == 1
    }
}

#[derive(serde::Serialize)]
struct SwitchParams {
    #[serde(rename = "Status")]
    status: u8,
}

#[derive(serde::Deserialize)]
struct SwitchResponse {
    #[serde(rename = "Done", default)]
    done: bool,
}

#[derive(serde::Serialize)]
struct UpdateParams<'a> {
    #[serde(rename = "IpList")]
    ip_list: &'a [String],
}

impl crate::Client {
    /// Applies or lifts the blacklist, returns whether the server did it.
    pub async fn toggle_ip_blacklist(&self, enable: bool) -> crate::Result<bool> {
        let params = SwitchParams {
            status: if enable { 1 } else { 2 },
        };
        self.post_request::<SwitchResponse, _>(
            "/api/v1/developer/config/forbide-ip/switch",
            params,
        )
        .await
        .map(|res| res.done)
    }

    /// Replaces the blacklist with up to 2000 IPv4 addresses.
    pub async fn update_ip_blacklist(&self, ip_list: &[String]) -> crate::Result<()> {
        crate::validate::ip_list(ip_list.len())?;
        self.post_request::<Empty, _>(
            "/api/v1/developer/config/forbide-ip/update",
            UpdateParams { ip_list },
        )
        .await
        .map(|_| ())
    }

    pub async fn get_ip_blacklist(&self) -> crate::Result<IpBlacklist> {
        self.get_request("/api/v1/developer/config/forbide-ip/list", ())
            .await
    }
}
