use crate::app::filters::{
    filter_by_keywords, filter_by_salary, sort_vacancies, top_n, KeywordMatch, SalaryRange,
};
use crate::domain::{AddOutcome, Record, Vacancy, VacancySource, VacancyStorage};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub top_n: usize,
    pub keywords: Vec<String>,
    pub keyword_match: KeywordMatch,
    pub salary_range: Option<SalaryRange>,
    pub save: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_n: 10,
            keywords: Vec::new(),
            keyword_match: KeywordMatch::default(),
            salary_range: None,
            save: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    pub fetched: usize,
    pub invalid: usize,
    pub selected: Vec<Vacancy>,
    pub added: usize,
    pub duplicates: usize,
}

/// Fetch, select and persist vacancies for one search request.
pub struct SearchPipeline<A: VacancySource, S: VacancyStorage> {
    source: A,
    storage: S,
}

impl<A: VacancySource, S: VacancyStorage> SearchPipeline<A, S> {
    pub fn new(source: A, storage: S) -> Self {
        Self { source, storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn extract(&self, query: &str) -> Vec<Record> {
        tracing::info!("📥 Searching vacancies for '{}'", query);
        self.source.get_vacancies(query).await
    }

    /// Converts raw records, drops invalid ones, then filters, sorts and truncates.
    pub fn transform(&self, records: Vec<Record>, request: &SearchRequest) -> (Vec<Vacancy>, usize) {
        let mut invalid = 0;
        let mut vacancies = Vec::with_capacity(records.len());

        for record in &records {
            match Vacancy::from_raw_record(record) {
                Ok(vacancy) => vacancies.push(vacancy),
                Err(e) => {
                    invalid += 1;
                    tracing::warn!("🔶 Skipping invalid vacancy: {}", e);
                }
            }
        }

        let mut vacancies =
            filter_by_keywords(vacancies, &request.keywords, request.keyword_match);
        if let Some(range) = &request.salary_range {
            vacancies = filter_by_salary(vacancies, range);
        }
        sort_vacancies(&mut vacancies);
        let selected = top_n(vacancies, request.top_n);

        tracing::info!(
            "🔄 Selected {} of {} vacancies ({} invalid)",
            selected.len(),
            records.len(),
            invalid
        );
        (selected, invalid)
    }

    /// Stores each vacancy, returning `(added, duplicates)`.
    pub async fn load(&self, vacancies: &[Vacancy]) -> Result<(usize, usize)> {
        let mut added = 0;
        let mut duplicates = 0;

        for vacancy in vacancies {
            match self.storage.add_vacancy(vacancy).await? {
                AddOutcome::Added => added += 1,
                AddOutcome::Duplicate => duplicates += 1,
            }
        }

        tracing::info!("💾 Saved {} vacancies, {} already stored", added, duplicates);
        Ok((added, duplicates))
    }

    pub async fn run(&self, request: &SearchRequest) -> Result<SearchReport> {
        // Extract
        let records = self.extract(&request.query).await;
        let fetched = records.len();

        // Transform
        let (selected, invalid) = self.transform(records, request);

        // Load
        let (added, duplicates) = if request.save {
            self.load(&selected).await?
        } else {
            (0, 0)
        };

        Ok(SearchReport {
            fetched,
            invalid,
            selected,
            added,
            duplicates,
        })
    }
}
