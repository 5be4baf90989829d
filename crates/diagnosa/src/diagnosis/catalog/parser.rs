use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct DamageRow {
    #[serde(rename = "Code")]
    pub(crate) code: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Description", default)]
    pub(crate) description: String,
    #[serde(rename = "Severity")]
    pub(crate) severity: String,
    #[serde(rename = "Cost Estimate", default)]
    pub(crate) cost_estimate: String,
    #[serde(rename = "Time Estimate", default)]
    pub(crate) time_estimate: String,
    #[serde(rename = "Prior Probability")]
    pub(crate) prior_probability: f64,
    #[serde(rename = "Solution", default)]
    pub(crate) solution: String,
    #[serde(
        rename = "Related Symptoms",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) related_symptoms: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SymptomRow {
    #[serde(rename = "Code")]
    pub(crate) code: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Description", default)]
    pub(crate) description: String,
    #[serde(rename = "Category")]
    pub(crate) category: String,
    #[serde(
        rename = "Device Types",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) device_types: Option<String>,
    #[serde(
        rename = "Mass Function",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) mass_function: Option<String>,
    #[serde(
        rename = "Uncertainty",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) uncertainty: Option<String>,
}

pub(crate) fn parse_rows<R, T>(reader: R) -> Result<Vec<T>, csv::Error>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows: Result<Vec<T>, csv::Error> = csv_reader.deserialize::<T>().collect();
    rows
}

/// Split a `;`-separated cell, dropping blanks.
pub(crate) fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse one `CODE:MASS` entry of a mass function cell.
pub(crate) fn parse_mass_entry(entry: &str) -> Option<(String, f64)> {
    let (code, mass) = entry.split_once(':')?;
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    let mass = mass.trim().parse::<f64>().ok()?;
    Some((code.to_string(), mass))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
