use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Listed company, identified by its exchange-qualified ticker.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(fmt = "{} ({})", name, code)]
pub struct Company {
    #[serde(rename = "ts_code")]
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl Company {
    pub fn new(code: &str, name: &str, industry: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            industry: industry.map(str::to_string),
        }
    }

    /// Case-insensitive substring match on name or code.
    pub fn matches(&self, lowered_query: &str) -> bool {
        self.name.to_lowercase().contains(lowered_query)
            || self.code.to_lowercase().contains(lowered_query)
    }
}

/// Embedded list shown when the company endpoint is unreachable.
pub fn default_companies() -> Vec<Company> {
    [
        ("600519.SH", "贵州茅台"),
        ("000858.SZ", "五粮液"),
        ("002304.SZ", "洋河股份"),
        ("000568.SZ", "泸州老窖"),
        ("600809.SH", "山西汾酒"),
        ("000596.SZ", "古井贡酒"),
        ("000799.SZ", "酒鬼酒"),
        ("603369.SH", "今世缘"),
        ("603589.SH", "口子窖"),
        ("600197.SH", "伊力特"),
        ("600199.SH", "金种子酒"),
    ]
    .into_iter()
    .map(|(code, name)| Company::new(code, name, Some("白酒")))
    .collect()
}

/// Searchable, read-only company list.
#[derive(Debug, Clone, Default)]
pub struct CompanyDirectory {
    companies: Vec<Company>,
    search_limit: usize,
}

impl CompanyDirectory {
    pub const DEFAULT_SEARCH_LIMIT: usize = 10;

    pub fn new(companies: Vec<Company>) -> Self {
        Self { companies, search_limit: Self::DEFAULT_SEARCH_LIMIT }
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Builds the directory from a loaded list, padding it with fallback
    /// entries (by absent code) when it is shorter than the fallback list.
    pub fn padded(mut loaded: Vec<Company>, fallback: Vec<Company>) -> Self {
        if loaded.len() < fallback.len() {
            for company in fallback {
                if !loaded.iter().any(|c| c.code == company.code) {
                    loaded.push(company);
                }
            }
        }
        Self::new(loaded)
    }

    /// A blank query lists the first companies; any other query is matched as typed.
    pub fn search(&self, query: &str) -> Vec<Company> {
        let lowered = if query.trim().is_empty() { String::new() } else { query.to_lowercase() };
        self.companies
            .iter()
            .filter(|company| company.matches(&lowered))
            .take(self.search_limit)
            .cloned()
            .collect()
    }

    pub fn find(&self, code: &str) -> Option<&Company> {
        self.companies.iter().find(|company| company.code == code)
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}
