//! Command-line forms of wizard actions.

use std::fmt;
use std::str::FromStr;

use import_wizard::WizardAction;

/// `COLUMN=LABEL` from `--map`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingArg {
    pub column: String,
    pub label: String,
}

impl MappingArg {
    pub fn action(&self) -> WizardAction {
        WizardAction::set_mapping(&self.column, &self.label)
    }
}

impl FromStr for MappingArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, label) = s
            .split_once('=')
            .ok_or_else(|| format!("expected COLUMN=LABEL, got '{s}'"))?;
        let (column, label) = (column.trim(), label.trim());
        if column.is_empty() || label.is_empty() {
            return Err(format!("expected COLUMN=LABEL, got '{s}'"));
        }
        Ok(Self {
            column: column.to_string(),
            label: label.to_string(),
        })
    }
}

impl fmt::Display for MappingArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.label)
    }
}

/// `ROW:COLUMN=VALUE` from `--set`, with a 1-based row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row: usize,
    pub column: String,
    pub value: String,
}

impl CellEdit {
    /// The edit as a wizard action on a 0-based row.
    pub fn action(&self) -> WizardAction {
        WizardAction::edit_cell(self.row.saturating_sub(1), &self.column, &self.value)
    }
}

impl FromStr for CellEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let usage = || format!("expected ROW:COLUMN=VALUE, got '{s}'");
        let (row, rest) = s.split_once(':').ok_or_else(usage)?;
        let (column, value) = rest.split_once('=').ok_or_else(usage)?;
        let row: usize = row
            .trim()
            .parse()
            .map_err(|_| format!("invalid row number '{}'", row.trim()))?;
        if row == 0 {
            return Err("row numbers start at 1".to_string());
        }
        let column = column.trim();
        if column.is_empty() {
            return Err(usage());
        }
        // Values are kept verbatim.
        Ok(Self {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mapping() {
        let arg: MappingArg = " colA = Email ".parse().unwrap();
        assert_eq!(arg.column, "colA");
        assert_eq!(arg.label, "Email");
        assert_eq!(arg.to_string(), "colA=Email");
        assert!("colA".parse::<MappingArg>().is_err());
        assert!("=Email".parse::<MappingArg>().is_err());
    }

    #[test]
    fn parses_cell_edit() {
        let edit: CellEdit = "2:Price=a=b".parse().unwrap();
        assert_eq!(edit.row, 2);
        assert_eq!(edit.column, "Price");
        assert_eq!(edit.value, "a=b");
        assert!(matches!(
            edit.action(),
            WizardAction::EditCell { row: 1, .. }
        ));

        let cleared: CellEdit = "1:Price=".parse().unwrap();
        assert_eq!(cleared.value, "");
    }

    #[test]
    fn rejects_bad_rows() {
        assert_eq!(
            "0:Price=1".parse::<CellEdit>().unwrap_err(),
            "row numbers start at 1"
        );
        assert!("x:Price=1".parse::<CellEdit>().is_err());
        assert!("Price=1".parse::<CellEdit>().is_err());
    }

    #[test]
    fn row_zero_edits_the_first_row() {
        let edit = CellEdit {
            row: 0,
            column: "Price".to_string(),
            value: "1".to_string(),
        };
        assert!(matches!(
            edit.action(),
            WizardAction::EditCell { row: 0, .. }
        ));
    }
}
