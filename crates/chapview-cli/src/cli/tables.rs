//! Plain-text tables for the one-shot commands.

use chapview_core::api::SearchResult;
use chapview_core::proteins::{ProteinRow, serialize_peptides};
use chapview_core::viewer::Variant;
use comfy_table::{ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn search_table(searches: &[SearchResult]) -> Table {
    let mut table = new_table();
    table.set_header(["ID", "Name", "Status", "Created", "Updated"]);
    for search in searches {
        table.add_row([
            search.id.to_string(),
            search.name.clone().unwrap_or_default(),
            search.status.to_string(),
            search.created_at.clone().unwrap_or_default(),
            search.updated_at.clone().unwrap_or_default(),
        ]);
    }
    table
}

/// The `seq_cnt` column is only shown for the redundant-peptides variant.
pub fn protein_table(rows: &[ProteinRow], variant: Variant) -> Table {
    let counts = variant.shows_peptide_counts();
    let mut table = new_table();

    let mut header = vec!["Name", "Peptide sequences"];
    if counts {
        header.push("seq_cnt");
    }
    table.set_header(header);

    for row in rows {
        let mut cells = vec![
            row.name().to_string(),
            serialize_peptides(row.peptide_sequences()),
        ];
        if counts {
            cells.push(row.seq_cnt.to_string());
        }
        table.add_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    use chapview_core::api::ProteinRecord;
    use chapview_core::proteins::protein_rows;

    use super::*;

    fn rows() -> Vec<ProteinRow> {
        protein_rows(vec![ProteinRecord {
            name: "sp|P12345|EXAMPLE_HUMAN".to_string(),
            peptide_sequences: vec!["AAA".to_string(), "BBB".to_string()],
            ..ProteinRecord::default()
        }])
    }

    #[test]
    fn test_peptides_variant_has_no_count_column() {
        let rendered = protein_table(&rows(), Variant::Peptides).to_string();
        assert!(rendered.contains("sp|P12345|EXAMPLE_HUMAN"));
        assert!(rendered.contains("AAA;BBB"));
        assert!(!rendered.contains("seq_cnt"));
    }

    #[test]
    fn test_redundant_variant_has_count_column() {
        let rendered = protein_table(&rows(), Variant::RedundantPeptides).to_string();
        assert!(rendered.contains("seq_cnt"));
        assert!(rendered.contains('2'));
    }
}
