use std::fmt;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for pages the service reports without a `<title>`.
pub const UNTITLED_PAGE: &str = "Untitled";

/// How many of the service's top issues the report headlines.
pub const HEADLINE_ISSUES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub url: String,
}

/// Letter grade assigned by the scan service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl From<String> for Grade {
    fn from(letter: String) -> Self {
        match letter.trim().to_ascii_uppercase().as_str() {
            "A" => Grade::A,
            "B" => Grade::B,
            "C" => Grade::C,
            "D" => Grade::D,
            _ => Grade::F,
        }
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.to_string()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub url: String,
    pub status: u16,
    pub load_ms: u64,
    pub score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passed: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub h1: String,
}

impl PageResult {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_PAGE
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopIssue {
    pub issue: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub url: String,
    #[serde(deserialize_with = "whole_number")]
    pub pages_crawled: u32,
    pub overall_score: f64,
    pub grade: Grade,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<PageResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_issues: Vec<TopIssue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
}

impl ScanResponse {
    pub fn total_passed(&self) -> usize {
        self.results.iter().map(|r| r.passed.len()).sum()
    }

    pub fn total_issues(&self) -> usize {
        self.results.iter().map(|r| r.issues.len()).sum()
    }

    pub fn headline_issues(&self) -> &[TopIssue] {
        &self.top_issues[..self.top_issues.len().min(HEADLINE_ISSUES)]
    }
}

/// Accepts any non-negative JSON number and rounds it to a count.
fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!("invalid count: {}", value)));
    }
    Ok(value.round() as u32)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
