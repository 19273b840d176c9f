//! Protein names, protein table rows, and peptide serialization.

use std::fmt;
use std::str::FromStr;

use crate::api::{PeptideRecord, ProteinRecord};

/// Separator between the fields of a composite protein name.
pub const NAME_SEPARATOR: char = '|';

/// Errors parsing a composite protein name.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ProteinNameError {
    #[error(
        "protein name '{name}' has {found} '|'-separated field(s), expected 3 (database|protein_id|protein_name)"
    )]
    WrongFieldCount { name: String, found: usize },
    /// Three fields, but the middle one is blank. The viewer link is keyed
    /// on the protein id, so this is rejected on top of the field count.
    #[error(
        "protein name '{name}' has an empty protein id; a viewer link needs a non-empty protein_id field"
    )]
    EmptyProteinId { name: String },
}

/// A composite protein name `database|protein_id|protein_name`,
/// e.g. `sp|P12345|EXAMPLE_HUMAN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProteinName {
    pub database: String,
    pub protein_id: String,
    pub protein_name: String,
}

impl FromStr for ProteinName {
    type Err = ProteinNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = name.split(NAME_SEPARATOR).collect();
        let [database, protein_id, protein_name] = parts.as_slice() else {
            return Err(ProteinNameError::WrongFieldCount {
                name: name.to_string(),
                found: parts.len(),
            });
        };
        if protein_id.trim().is_empty() {
            return Err(ProteinNameError::EmptyProteinId {
                name: name.to_string(),
            });
        }
        Ok(Self {
            database: (*database).to_string(),
            protein_id: (*protein_id).to_string(),
            protein_name: (*protein_name).to_string(),
        })
    }
}

impl fmt::Display for ProteinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{NAME_SEPARATOR}{}{NAME_SEPARATOR}{}",
            self.database, self.protein_id, self.protein_name
        )
    }
}

/// One row of the protein table: the remote record plus derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinRow {
    pub record: ProteinRecord,
    /// Number of peptide sequences (`seq_cnt`).
    pub seq_cnt: usize,
}

impl ProteinRow {
    pub fn new(record: ProteinRecord) -> Self {
        let seq_cnt = record.peptide_sequences.len();
        Self { record, seq_cnt }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn peptide_sequences(&self) -> &[String] {
        &self.record.peptide_sequences
    }

    /// Parses the row's composite name.
    pub fn parse_name(&self) -> Result<ProteinName, ProteinNameError> {
        self.record.name.parse()
    }
}

/// Builds table rows from a protein listing.
pub fn protein_rows(records: Vec<ProteinRecord>) -> Vec<ProteinRow> {
    records.into_iter().map(ProteinRow::new).collect()
}

/// Serializes bare peptide sequences for `input_type=peptides`: `AAA;BBB`.
pub fn serialize_peptides<S: AsRef<str>>(sequences: &[S]) -> String {
    sequences
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(";")
}

/// Serializes peptides with PSM counts for `input_type=redundant_peptides`:
/// `AAA;3,BBB;5`.
pub fn serialize_redundant_peptides(peptides: &[PeptideRecord]) -> String {
    peptides
        .iter()
        .map(|p| format!("{};{}", p.sequence, p.psm_count))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, peptides: &[&str]) -> ProteinRecord {
        ProteinRecord {
            name: name.to_string(),
            peptide_sequences: peptides.iter().map(ToString::to_string).collect(),
            ..ProteinRecord::default()
        }
    }

    #[test]
    fn test_parse_composite_name() {
        let name: ProteinName = "sp|P12345|EXAMPLE_HUMAN".parse().unwrap();
        assert_eq!(name.database, "sp");
        assert_eq!(name.protein_id, "P12345");
        assert_eq!(name.protein_name, "EXAMPLE_HUMAN");
        assert_eq!(name.to_string(), "sp|P12345|EXAMPLE_HUMAN");
    }

    #[test]
    fn test_name_without_separator_is_contract_error() {
        let err = "badname".parse::<ProteinName>().unwrap_err();
        assert_eq!(
            err,
            ProteinNameError::WrongFieldCount {
                name: "badname".to_string(),
                found: 1,
            }
        );
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_name_with_extra_fields_is_contract_error() {
        let err = "sp|P1|NAME|extra".parse::<ProteinName>().unwrap_err();
        assert!(matches!(
            err,
            ProteinNameError::WrongFieldCount { found: 4, .. }
        ));
    }

    #[test]
    fn test_name_with_empty_id_is_contract_error() {
        let err = "sp||NAME".parse::<ProteinName>().unwrap_err();
        assert!(matches!(err, ProteinNameError::EmptyProteinId { .. }));
        assert!(err.to_string().contains("needs a non-empty protein_id"));
    }

    #[test]
    fn test_serialize_peptides() {
        assert_eq!(serialize_peptides(&["AAA", "BBB"]), "AAA;BBB");
        assert_eq!(serialize_peptides::<&str>(&[]), "");
    }

    #[test]
    fn test_serialize_redundant_peptides() {
        let peptides = vec![
            PeptideRecord {
                sequence: "AAA".to_string(),
                psm_count: 3,
            },
            PeptideRecord {
                sequence: "BBB".to_string(),
                psm_count: 5,
            },
        ];
        assert_eq!(serialize_redundant_peptides(&peptides), "AAA;3,BBB;5");
    }

    #[test]
    fn test_rows_count_sequences() {
        let rows = protein_rows(vec![
            record("sp|P1|A_HUMAN", &["AAA", "BBB", "CCC"]),
            record("sp|P2|B_HUMAN", &[]),
        ]);
        assert_eq!(rows[0].seq_cnt, 3);
        assert_eq!(rows[1].seq_cnt, 0);
        assert_eq!(rows[0].parse_name().unwrap().protein_id, "P1");
    }
}
