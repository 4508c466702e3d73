use crate::domain::{ConfigProvider, Record, VacancySource};
use crate::utils::error::{Result, VacancyError};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.hh.ru/vacancies";
pub const DEFAULT_USER_AGENT: &str = "HH-User-Agent";
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Client for the hh.ru vacancy search endpoint.
#[derive(Debug, Clone)]
pub struct HeadHunterApi {
    endpoint: String,
    user_agent: String,
    per_page: u32,
    max_pages: Option<u32>,
    client: Client,
}

/// One decoded page of search results.
#[derive(Debug, Default)]
struct Page {
    items: Vec<Record>,
    pages: Option<u32>,
}

impl HeadHunterApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            max_pages: None,
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            endpoint: config.api_endpoint().to_string(),
            user_agent: config.user_agent().to_string(),
            per_page: config.per_page(),
            max_pages: config.max_pages(),
            client: builder.build()?,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_page(&self, query: &str, page: u32) -> Result<Page> {
        let page_param = page.to_string();
        let per_page_param = self.per_page.to_string();

        tracing::debug!("📡 Requesting page {} for '{}' from {}", page, query, self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("text", query),
                ("page", page_param.as_str()),
                ("per_page", per_page_param.as_str()),
            ])
            .send()
            .await?;

        // Check status code
        let status = response.status();
        tracing::debug!("📡 Page {} response status: {}", page, status);
        if !status.is_success() {
            return Err(VacancyError::HttpStatusError {
                status: status.as_u16(),
                page,
            });
        }

        let body = response.text().await?;
        parse_page(page, &body)
    }
}

fn parse_page(page: u32, body: &str) -> Result<Page> {
    let json_data: Value =
        serde_json::from_str(body).map_err(|e| VacancyError::MalformedResponseError {
            page,
            message: e.to_string(),
        })?;

    let items = match json_data.get("items") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(VacancyError::MalformedResponseError {
                page,
                message: format!("'items' is not an array: {}", other),
            })
        }
        None => {
            return Err(VacancyError::MissingFieldError {
                page,
                field: "items".to_string(),
            })
        }
    };

    // Only objects count as vacancies
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        if let Value::Object(obj) = item {
            records.push(Record::from(obj.clone()));
        } else {
            tracing::warn!("🔶 Skipping non-object item on page {}: {}", page, item);
        }
    }

    let pages = json_data
        .get("pages")
        .and_then(Value::as_u64)
        .and_then(|p| u32::try_from(p).ok());

    Ok(Page {
        items: records,
        pages,
    })
}

#[async_trait::async_trait]
impl VacancySource for HeadHunterApi {
    async fn connect(&self) -> bool {
        let request = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, &self.user_agent)
            .query(&[("per_page", "1")]);

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("📡 API reachable at {}", self.endpoint);
                true
            }
            Ok(response) => {
                tracing::error!(
                    "❌ API connectivity check failed with status {}",
                    response.status()
                );
                false
            }
            Err(e) => {
                tracing::error!("❌ Could not connect to API at {}: {}", self.endpoint, e);
                false
            }
        }
    }

    async fn get_vacancies(&self, query: &str) -> Vec<Record> {
        // Probe the API before paginating
        if !self.connect().await {
            tracing::error!("❌ API connection failed, no vacancies fetched");
            return Vec::new();
        }

        let mut collected = Vec::new();
        let mut page = 0;
        let mut total_pages: Option<u32> = None;

        loop {
            // Stop at the server's page count or the configured cap
            if total_pages.is_some_and(|total| page >= total) {
                tracing::debug!("📡 Reached last page reported by server ({})", page);
                break;
            }
            if self.max_pages.is_some_and(|max| page >= max) {
                tracing::info!("📡 Reached configured page limit ({})", page);
                break;
            }

            match self.fetch_page(query, page).await {
                Ok(result) => {
                    // The server may report its page count on any page
                    if result.pages.is_some() {
                        total_pages = result.pages;
                    }
                    if result.items.is_empty() {
                        tracing::debug!("📡 Page {} is empty, stopping", page);
                        break;
                    }
                    collected.extend(result.items);
                    page += 1;
                }
                // Any failure ends pagination, earlier pages are kept
                Err(e) => {
                    match &e {
                        VacancyError::HttpStatusError { .. } => {
                            tracing::error!("❌ HTTP error (page {}): {}", page, e)
                        }
                        VacancyError::ApiError(_) => {
                            tracing::error!("❌ Network error (page {}): {}", page, e)
                        }
                        VacancyError::MalformedResponseError { .. } => {
                            tracing::error!("❌ Could not decode response (page {}): {}", page, e)
                        }
                        _ => tracing::error!("❌ Unexpected response (page {}): {}", page, e),
                    }
                    break;
                }
            }
        }

        tracing::info!("📡 Fetched {} vacancies for '{}'", collected.len(), query);
        collected
    }
}
