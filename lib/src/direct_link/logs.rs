//! Access logs of the direct links

use chrono::NaiveDate;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct OfflineLog {
    #[serde(rename = "logID")]
    pub log_id: u64,
    pub timestamp: String,
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
    pub action: String,
}

/// A page of offline logs
#[derive(Debug, serde::Deserialize)]
pub struct OfflineLogs {
    #[serde(default)]
    pub logs: Vec<OfflineLog>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: u32,
}

impl OfflineLogs {
    pub fn has_more(&self) -> bool {
        has_more(self.page, self.page_size, self.total)
    }
}

/// Traffic of one day
#[derive(Clone, Debug, serde::Deserialize)]
pub struct TrafficLog {
    pub date: String,
    /// Bytes served
    #[serde(rename = "trafficUsed")]
    pub traffic_used: u64,
    #[serde(rename = "requestCount")]
    pub request_count: u64,
}

/// A page of traffic logs
#[derive(Debug, serde::Deserialize)]
pub struct TrafficLogs {
    #[serde(default)]
    pub logs: Vec<TrafficLog>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: u32,
}

impl TrafficLogs {
    pub fn has_more(&self) -> bool {
        has_more(self.page, self.page_size, self.total)
    }

    /// Bytes served over the whole page
    pub fn total_traffic(&self) -> u64 {
        self.logs.iter().map(|log| log.traffic_used).sum()
    }

    pub fn total_requests(&self) -> u64 {
        self.logs.iter().map(|log| log.request_count).sum()
    }
}

fn first_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

fn has_more(page: u32, page_size: u32, total: u64) -> bool {
    u64::from(page) * u64::from(page_size) < total
}

#[derive(serde::Serialize)]
struct PageParams {
    page: u32,
    #[serde(rename = "pageSize")]
    page_size: u32,
}

#[derive(serde::Serialize)]
struct TrafficParams {
    #[serde(rename = "startDate")]
    start_date: String,
    #[serde(rename = "endDate")]
    end_date: String,
    page: u32,
    #[serde(rename = "pageSize")]
    page_size: u32,
}

impl crate::Client {
    /// Gets a page of offline logs, pages start at 1.
    pub async fn get_offline_logs(
        &self,
        page: u32,
        page_size: u32,
    ) -> crate::Result<OfflineLogs> {
        self.get_request(
            "/api/v1/directlink/offline/logs",
            PageParams { page, page_size },
        )
        .await
    }

    /// Gets a page of the daily traffic between two dates, included.
    pub async fn get_traffic_logs(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        page: u32,
        page_size: u32,
    ) -> crate::Result<TrafficLogs> {
        if end_date < start_date {
            return Err(crate::Error::validation(
                "the end date cannot be before the start date",
            ));
        }
        let params = TrafficParams {
            start_date: start_date.format("%Y-%m-%d").to_string(),
            end_date: end_date.format("%Y-%m-%d").to_string(),
            page,
            page_size,
        };
        self.get_request("/api/v1/directlink/traffic/logs", params)
            .await
    }
}
