use crate::app::{KeywordMatch, SalaryRange, SearchRequest};
use crate::config::AppConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hh-vacancies")]
#[command(about = "Search hh.ru vacancies and keep a local shortlist")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Vacancy search endpoint")]
    pub endpoint: Option<String>,

    #[arg(long, global = true, help = "JSON file holding saved vacancies")]
    pub storage_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search the API, print the best matches and save them
    Search(SearchArgs),
    /// Print saved vacancies
    List,
    /// Remove saved vacancies by name
    Remove { name: String },
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    pub query: String,

    #[arg(long, default_value = "10")]
    pub top: usize,

    #[arg(short = 'k', long = "keyword", help = "Keyword to look for in name or description")]
    pub keywords: Vec<String>,

    #[arg(
        long = "match",
        value_enum,
        default_value_t = KeywordMatch::All,
        help = "Require all keywords or any one of them"
    )]
    pub keyword_match: KeywordMatch,

    #[arg(long, help = "Salary range as MIN-MAX")]
    pub salary: Option<SalaryRange>,

    #[arg(long, help = "Print results without saving them")]
    pub no_save: bool,
}

impl From<SearchArgs> for SearchRequest {
    fn from(args: SearchArgs) -> Self {
        Self {
            query: args.query,
            top_n: args.top,
            keywords: args.keywords,
            keyword_match: args.keyword_match,
            salary_range: args.salary,
            save: !args.no_save,
        }
    }
}

impl CliConfig {
    /// Loads the config file (or defaults), applies command line overrides and validates.
    pub fn resolve(&self) -> Result<AppConfig> {
        // Config file first, defaults when none is given
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        // Command line flags override the file
        if let Some(endpoint) = &self.endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(storage_path) = &self.storage_path {
            config.storage.path = storage_path.clone();
        }

        // Validate the merged configuration
        config.validate()?;
        Ok(config)
    }
}
