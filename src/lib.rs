pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HeadHunterApi, JsonFileStorage};
pub use app::{SearchPipeline, SearchReport, SearchRequest};
pub use config::AppConfig;
pub use domain::{AddOutcome, Record, Salary, Vacancy, VacancySource, VacancyStorage};
pub use utils::error::{Result, VacancyError};
