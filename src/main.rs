use clap::Parser;
use hh_vacancies::config::Command;
use hh_vacancies::domain::ConfigProvider;
use hh_vacancies::utils::logger;
use hh_vacancies::{
    CliConfig, HeadHunterApi, JsonFileStorage, SearchPipeline, SearchRequest, Vacancy,
    VacancyStorage,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Initialise logging
    logger::init_cli_logger(cli.verbose, cli.json_logs);
    tracing::debug!("CLI config: {:?}", cli);

    // Load and validate configuration
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "❌ Configuration validation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // Create the store shared by every command
    let storage = JsonFileStorage::new(config.storage_path());

    match cli.command {
        Command::Search(args) => {
            let api = HeadHunterApi::from_config(&config)?;
            tracing::debug!("🔍 Using endpoint {}", api.endpoint());
            let pipeline = SearchPipeline::new(api, storage);
            let request = SearchRequest::from(args);

            // Run the search pipeline
            let report = pipeline.run(&request).await?;

            if report.selected.is_empty() {
                println!("No vacancies matched '{}'", request.query);
            }
            for vacancy in &report.selected {
                println!("{}: {} ({})", vacancy.name(), vacancy.url(), vacancy.salary());
            }
            // Summary of what was stored
            if request.save {
                println!(
                    "📁 Saved {} new vacancies to {} ({} already stored)",
                    report.added,
                    config.storage_path(),
                    report.duplicates
                );
            }
        }
        Command::List => {
            let records = storage.get_vacancies().await;
            if records.is_empty() {
                println!("No saved vacancies in {}", config.storage_path());
            }
            for record in &records {
                match Vacancy::from_mapping(record) {
                    Ok(vacancy) => {
                        println!("{}: {} ({})", vacancy.name(), vacancy.url(), vacancy.salary())
                    }
                    // Entries edited by hand may no longer validate
                    Err(e) => tracing::warn!("🔶 Skipping stored entry: {}", e),
                }
            }
        }
        Command::Remove { name } => {
            let removed = storage.remove_vacancy(&name).await?;
            println!("Removed {} vacancies named '{}'", removed, name);
        }
    }

    Ok(())
}
