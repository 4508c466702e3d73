use crate::domain::model::{Record, Vacancy};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Outcome of adding a vacancy to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

/// A remote source of raw vacancy records.
///
/// Implementations never fail outright: every error degrades to `false` or
/// to whatever was collected before the failure.
#[async_trait]
pub trait VacancySource: Send + Sync {
    async fn connect(&self) -> bool;
    async fn get_vacancies(&self, query: &str) -> Vec<Record>;
}

pub trait VacancyStorage: Send + Sync {
    fn add_vacancy(
        &self,
        vacancy: &Vacancy,
    ) -> impl std::future::Future<Output = Result<AddOutcome>> + Send;
    fn get_vacancies(&self) -> impl std::future::Future<Output = Vec<Record>> + Send;
    fn remove_vacancy(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn per_page(&self) -> u32;
    fn max_pages(&self) -> Option<u32>;
    fn timeout_seconds(&self) -> Option<u64>;
    fn storage_path(&self) -> &str;
}
