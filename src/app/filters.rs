use crate::domain::Vacancy;
use crate::utils::error::VacancyError;
use std::cmp::Ordering;
use std::str::FromStr;

/// How multiple keywords combine when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum KeywordMatch {
    /// Every keyword must appear.
    #[default]
    All,
    /// At least one keyword must appear.
    Any,
}

/// Inclusive salary bounds, written as `MIN-MAX` on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    pub fn contains(&self, amount: f64) -> bool {
        self.min <= amount && amount <= self.max
    }
}

impl FromStr for SalaryRange {
    type Err = VacancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| VacancyError::InvalidConfigValueError {
            field: "salary_range".to_string(),
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| invalid("expected MIN-MAX"))?;
        let min: f64 = min
            .trim()
            .parse()
            .map_err(|_| invalid("minimum is not a number"))?;
        let max: f64 = max
            .trim()
            .parse()
            .map_err(|_| invalid("maximum is not a number"))?;

        if min < 0.0 || min > max {
            return Err(invalid("minimum must be non-negative and not above maximum"));
        }

        Ok(Self { min, max })
    }
}

/// Case-insensitive keyword match against name and description.
pub fn filter_by_keywords(
    vacancies: Vec<Vacancy>,
    keywords: &[String],
    mode: KeywordMatch,
) -> Vec<Vacancy> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        return vacancies;
    }

    vacancies
        .into_iter()
        .filter(|vacancy| {
            let text = format!(
                "{} {}",
                vacancy.name(),
                vacancy.description().unwrap_or_default()
            )
            .to_lowercase();

            match mode {
                KeywordMatch::All => keywords.iter().all(|k| text.contains(k.as_str())),
                KeywordMatch::Any => keywords.iter().any(|k| text.contains(k.as_str())),
            }
        })
        .collect()
}

/// Keeps vacancies whose salary amount falls in `range`; ones without an amount are dropped.
pub fn filter_by_salary(vacancies: Vec<Vacancy>, range: &SalaryRange) -> Vec<Vacancy> {
    vacancies
        .into_iter()
        .filter(|vacancy| {
            vacancy
                .salary()
                .lower_bound()
                .is_some_and(|amount| range.contains(amount))
        })
        .collect()
}

pub fn sort_vacancies(vacancies: &mut [Vacancy]) {
    vacancies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}

pub fn top_n(mut vacancies: Vec<Vacancy>, n: usize) -> Vec<Vacancy> {
    vacancies.truncate(n);
    vacancies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Salary;
    use serde_json::Number;

    fn vacancy(name: &str, description: &str, salary: Salary) -> Vacancy {
        Vacancy::new(
            name,
            "https://hh.ru/vacancy/1",
            Some(description.to_string()),
            salary,
        )
        .unwrap()
    }

    fn names(vacancies: &[Vacancy]) -> Vec<&str> {
        vacancies.iter().map(Vacancy::name).collect()
    }

    #[test]
    fn test_parse_salary_range() {
        let range: SalaryRange = "100000-150000".parse().unwrap();
        assert_eq!(range, SalaryRange { min: 100000.0, max: 150000.0 });
        assert!(range.contains(100000.0));
        assert!(range.contains(150000.0));
        assert!(!range.contains(150001.0));

        assert!(" 10 - 20 ".parse::<SalaryRange>().is_ok());
        assert!("100000".parse::<SalaryRange>().is_err());
        assert!("abc-10".parse::<SalaryRange>().is_err());
        assert!("20-10".parse::<SalaryRange>().is_err());
    }

    #[test]
    fn test_keyword_modes() {
        let vacancies = vec![
            vacancy("Rust Developer", "tokio, serde", Salary::not_specified()),
            vacancy("Python Developer", "django", Salary::not_specified()),
            vacancy("Backend", "Rust and Python", Salary::not_specified()),
        ];
        let keywords = vec!["rust".to_string(), "PYTHON".to_string()];

        let all = filter_by_keywords(vacancies.clone(), &keywords, KeywordMatch::All);
        assert_eq!(names(&all), vec!["Backend"]);

        let any = filter_by_keywords(vacancies.clone(), &keywords, KeywordMatch::Any);
        assert_eq!(any.len(), 3);

        let none = filter_by_keywords(vacancies, &[], KeywordMatch::All);
        assert_eq!(none.len(), 3);
    }

    #[test]
    fn test_salary_filter() {
        let vacancies = vec![
            vacancy("A", "", Salary::Amount(Number::from(120000))),
            vacancy("B", "", Salary::Text("from 90000 to 130000 RUR".to_string())),
            vacancy("C", "", Salary::not_specified()),
            vacancy("D", "", Salary::Amount(Number::from(300000))),
        ];
        let range = SalaryRange { min: 100000.0, max: 200000.0 };

        let filtered = filter_by_salary(vacancies, &range);
        assert_eq!(names(&filtered), vec!["A"]);
    }

    #[test]
    fn test_sort_and_truncate() {
        let mut vacancies = vec![
            vacancy("Gamma", "", Salary::not_specified()),
            vacancy("Alpha", "", Salary::not_specified()),
            vacancy("Beta", "", Salary::not_specified()),
        ];
        sort_vacancies(&mut vacancies);
        assert_eq!(names(&vacancies), vec!["Alpha", "Beta", "Gamma"]);

        let top = top_n(vacancies, 2);
        assert_eq!(names(&top), vec!["Alpha", "Beta"]);
    }
}
