use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use loan_core::models::{ApplicationRecord, ApplicationStatus, Choice, TeamMember, TeamRole};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading admin data.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Row {row}: unknown status '{value}' (expected one of: {options})")]
    UnknownStatus {
        row: usize,
        value: String,
        options: String,
    },

    #[error("Row {row}: unknown role '{value}' (expected one of: {options})")]
    UnknownRole {
        row: usize,
        value: String,
        options: String,
    },

    #[error("Row {row}: {field} cannot be negative")]
    NegativeAmount { row: usize, field: &'static str },
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the applications CSV file.
///
/// - `reference`: Application reference, e.g. `HO-1001`
/// - `applicant_name`, `email`: Primary applicant
/// - `loan_amount`, `property_value`: Dollar amounts; `$` and `,` are allowed
/// - `status`: Status code, e.g. `under_review`
/// - `broker`: Assigned broker (empty when unassigned)
/// - `lodged_on`: `YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApplicationRow {
    pub reference: String,
    pub applicant_name: String,
    pub email: String,
    #[serde(deserialize_with = "deserialize_money")]
    pub loan_amount: Decimal,
    #[serde(deserialize_with = "deserialize_money")]
    pub property_value: Decimal,
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub broker: Option<String>,
    pub lodged_on: NaiveDate,
}

/// A single row of the team CSV file.
///
/// - `role`: Role code, e.g. `credit_analyst`
/// - `active`: `true` / `false`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TeamRow {
    pub name: String,
    pub email: String,
    pub role: String,
    pub team: String,
    pub active_applications: u32,
    pub active: bool,
}

fn deserialize_money<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<Decimal>()
        .map_err(serde::de::Error::custom)
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Ok(Some(s.trim().to_string())),
        None => Ok(None),
    }
}

/// 1-based file line of the `index`th data row, counting the header.
fn row_number(index: usize) -> usize {
    index + 2
}

fn read_file(path: &Path) -> Result<File, LoaderError> {
    File::open(path).map_err(|e| LoaderError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Loader for the admin applications list.
pub struct ApplicationLoader;

impl ApplicationLoader {
    /// Parse application records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>, LoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: ApplicationRow = result?;
            records.push(Self::to_record(row, row_number(index))?);
        }

        Ok(records)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<ApplicationRecord>, LoaderError> {
        Self::parse(read_file(path.as_ref())?)
    }

    fn to_record(
        row: ApplicationRow,
        row_number: usize,
    ) -> Result<ApplicationRecord, LoaderError> {
        let status = ApplicationStatus::parse(row.status.trim()).ok_or_else(|| {
            LoaderError::UnknownStatus {
                row: row_number,
                value: row.status.clone(),
                options: ApplicationStatus::option_list(),
            }
        })?;

        if row.loan_amount.is_sign_negative() {
            return Err(LoaderError::NegativeAmount {
                row: row_number,
                field: "loan_amount",
            });
        }
        if row.property_value.is_sign_negative() {
            return Err(LoaderError::NegativeAmount {
                row: row_number,
                field: "property_value",
            });
        }

        Ok(ApplicationRecord {
            reference: row.reference,
            applicant_name: row.applicant_name,
            email: row.email,
            loan_amount: row.loan_amount,
            property_value: row.property_value,
            status,
            broker: row.broker,
            lodged_on: row.lodged_on,
        })
    }
}

/// Loader for the admin team list.
pub struct TeamLoader;

impl TeamLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TeamMember>, LoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut members = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: TeamRow = result?;
            let role = TeamRole::parse(row.role.trim()).ok_or_else(|| LoaderError::UnknownRole {
                row: row_number(index),
                value: row.role.clone(),
                options: TeamRole::option_list(),
            })?;

            members.push(TeamMember {
                name: row.name,
                email: row.email,
                role,
                team: row.team,
                active_applications: row.active_applications,
                active: row.active,
            });
        }

        Ok(members)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<TeamMember>, LoaderError> {
        Self::parse(read_file(path.as_ref())?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const APPLICATIONS_HEADER: &str =
        "reference,applicant_name,email,loan_amount,property_value,status,broker,lodged_on";

    #[test]
    fn test_parse_single_application() {
        let csv = format!(
            "{APPLICATIONS_HEADER}\nHO-1001,Jack O'Brien,jack@example.com.au,820000,1025000,submitted,Sarah Kim,2026-09-02"
        );

        let records = ApplicationLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![ApplicationRecord {
                reference: "HO-1001".to_string(),
                applicant_name: "Jack O'Brien".to_string(),
                email: "jack@example.com.au".to_string(),
                loan_amount: dec!(820000),
                property_value: dec!(1025000),
                status: ApplicationStatus::Submitted,
                broker: Some("Sarah Kim".to_string()),
                lodged_on: NaiveDate::from_ymd_opt(2026, 9, 2).unwrap(),
            }]
        );
    }

    #[test]
    fn test_parse_blank_broker_is_none() {
        let csv = format!(
            "{APPLICATIONS_HEADER}\nHO-1002,Mei Chen,mei@example.com.au,455000,600000,draft,,2026-09-09"
        );

        let records = ApplicationLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].broker, None);
    }

    #[test]
    fn test_parse_formatted_money() {
        let csv = format!(
            "{APPLICATIONS_HEADER}\nHO-1003,Priya,p@example.com.au,\"$640,000.00\",\"$800,000\",approved,,2026-09-14"
        );

        let records = ApplicationLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].loan_amount, dec!(640000.00));
        assert_eq!(records[0].property_value, dec!(800000));
    }

    #[test]
    fn test_parse_unknown_status() {
        let csv = format!(
            "{APPLICATIONS_HEADER}\nHO-1001,A,a@x.com,1,1,submitted,,2026-09-02\nHO-1002,B,b@x.com,1,1,pending,,2026-09-02"
        );

        let result = ApplicationLoader::parse(csv.as_bytes());

        match result {
            Err(LoaderError::UnknownStatus { row, value, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "pending");
            }
            other => panic!("Expected UnknownStatus error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_amount() {
        let csv = format!("{APPLICATIONS_HEADER}\nHO-1001,A,a@x.com,-5,1,submitted,,2026-09-02");

        let result = ApplicationLoader::parse(csv.as_bytes());

        assert!(matches!(
            result,
            Err(LoaderError::NegativeAmount {
                row: 2,
                field: "loan_amount"
            })
        ));
    }

    #[test]
    fn test_parse_invalid_date() {
        let csv = format!("{APPLICATIONS_HEADER}\nHO-1001,A,a@x.com,1,1,submitted,,02/09/2026");

        let result = ApplicationLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(LoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_empty_csv() {
        let records =
            ApplicationLoader::parse(APPLICATIONS_HEADER.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_team_member() {
        let csv = "name,email,role,team,active_applications,active\nAisha Rahman,aisha@homeonline.com.au,credit_analyst,Credit,15,true";

        let members = TeamLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].role, TeamRole::CreditAnalyst);
        assert_eq!(members[0].active_applications, 15);
        assert!(members[0].active);
    }

    #[test]
    fn test_parse_team_unknown_role() {
        let csv = "name,email,role,team,active_applications,active\nA,a@x.com,manager,Ops,0,true";

        let result = TeamLoader::parse(csv.as_bytes());

        match result {
            Err(LoaderError::UnknownRole { row, options, .. }) => {
                assert_eq!(row, 2);
                assert!(options.contains("credit_analyst"));
            }
            other => panic!("Expected UnknownRole error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = TeamLoader::load_from_file("does/not/exist.csv");

        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }
}
