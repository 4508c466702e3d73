use crate::domain::salary::{normalize_salary, valid_salary, Salary};
use crate::utils::error::{Result, VacancyError};
use crate::utils::validation::check_http_url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

pub const NO_DESCRIPTION: &str = "no description";

/// One JSON object, as returned by the API or as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }
}

impl From<Map<String, Value>> for Record {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

/// A single job posting. Fields are fixed once constructed.
#[derive(Debug, Clone)]
pub struct Vacancy {
    name: String,
    url: String,
    description: Option<String>,
    salary: Salary,
}

impl Vacancy {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        description: Option<String>,
        salary: Salary,
    ) -> Result<Self> {
        let name = name.into();
        let url = url.into();

        if name.trim().is_empty() {
            return Err(VacancyError::validation(
                "name",
                name,
                "vacancy name cannot be empty",
            ));
        }

        if let Err(reason) = check_http_url(&url) {
            return Err(VacancyError::validation("url", url, reason));
        }

        let salary = match salary {
            Salary::Amount(number) => valid_salary(&Value::Number(number)),
            text => text,
        };

        Ok(Self {
            name,
            url,
            description,
            salary,
        })
    }

    /// Builds a vacancy from one item of the search API's `items` array.
    pub fn from_raw_record(record: &Record) -> Result<Self> {
        let name = required_text(record, "name")?;
        let url = record
            .get_str("alternate_url")
            .or_else(|| record.get_str("url"))
            .unwrap_or_default();

        let snippet = record.data.get("snippet");
        let description = ["requirement", "responsibility"]
            .iter()
            .find_map(|key| snippet.and_then(|s| s.get(key)).and_then(Value::as_str))
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        let salary = normalize_salary(record.data.get("salary"));

        Self::new(name, url, Some(description), salary)
    }

    /// Builds a vacancy from a previously stored mapping.
    pub fn from_mapping(record: &Record) -> Result<Self> {
        let name = required_text(record, "name")?;
        let url = record.get_str("url").unwrap_or_default();
        let description = record.get_str("description").map(str::to_string);
        let salary = match record.data.get("salary") {
            Some(Value::String(text)) => Salary::Text(text.clone()),
            other => normalize_salary(other),
        };

        Self::new(name, url, description, salary)
    }

    pub fn to_mapping(&self) -> Record {
        let mut data = Map::new();
        data.insert("name".to_string(), Value::String(self.name.clone()));
        data.insert("url".to_string(), Value::String(self.url.clone()));
        data.insert(
            "description".to_string(),
            self.description
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        let salary = match &self.salary {
            Salary::Amount(number) => Value::Number(number.clone()),
            Salary::Text(text) => Value::String(text.clone()),
        };
        data.insert("salary".to_string(), salary);
        Record { data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn salary(&self) -> &Salary {
        &self.salary
    }
}

fn required_text(record: &Record, field: &str) -> Result<String> {
    match record.data.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(VacancyError::validation(
            field,
            other.to_string(),
            format!("vacancy {} must be text", field),
        )),
        None => Err(VacancyError::validation(
            field,
            "",
            format!("vacancy {} is missing", field),
        )),
    }
}

impl PartialEq for Vacancy {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.url == other.url && self.salary == other.salary
    }
}

impl PartialOrd for Vacancy {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.name.cmp(&other.name) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match self.url.cmp(&other.url) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        self.salary.partial_cmp(&other.salary)
    }
}
