//! Wizard state and its reducer.
//!
//! All state lives in [`Wizard`] and changes only through
//! [`Wizard::dispatch`], which makes every flow reproducible in tests.

use import_map::ColumnMapping;
use import_model::{Table, TemplateType, UploadResponse};
use import_validate::{RejectedRule, RuleSet, ValidationReport};
use tracing::{debug, info};

use crate::error::{Result, WizardError};
use crate::step::{Step, TOTAL_STEPS, WizardAction};

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: Step,
    template: TemplateType,
    /// Table being edited in step 1.
    table: Table,
    mapping: ColumnMapping,
    rules: RuleSet,
    /// Table carried into step 2; this is what gets saved.
    preview: Table,
    message: Option<String>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Step indicator text, e.g. "Step 2 of 3".
    pub fn step_label(&self) -> Option<String> {
        match self.step.number() {
            0 => None,
            n => Some(format!("Step {n} of {TOTAL_STEPS}")),
        }
    }

    pub fn template(&self) -> TemplateType {
        self.template
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Patterns the service sent that could not be compiled.
    pub fn rejected_rules(&self) -> &[RejectedRule] {
        self.rules.rejected()
    }

    pub fn preview(&self) -> &Table {
        &self.preview
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn has_edit_state(&self) -> bool {
        !self.mapping.columns().is_empty()
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: WizardAction) -> Result<()> {
        let name = action.name();
        match (self.step, action) {
            (_, WizardAction::Reset) => self.reset(),
            (Step::Upload, WizardAction::SelectTemplate(template)) => {
                self.template = template;
                self.message = template.notice().map(str::to_string);
            }
            (Step::Upload, WizardAction::Loaded(response)) => self.load(response),
            (Step::Upload, WizardAction::UploadFailed(message)) => {
                self.message = Some(message);
            }
            (Step::Editing, WizardAction::SetMapping { column, label }) => {
                let demoted = self.mapping.set_mapping(&column, &label)?;
                debug!(%column, %label, demoted = demoted.len(), "mapping changed");
            }
            (Step::Editing, WizardAction::EditCell { row, column, value }) => {
                self.edit_cell(row, &column, value)?;
            }
            (Step::Editing, WizardAction::Next) => {
                self.preview = self.table.project(&self.mapping.selection())?;
                self.message = None;
                self.step = Step::Previewing;
                info!(
                    rows = self.preview.len(),
                    columns = self.preview.columns().len(),
                    "preview ready"
                );
            }
            (Step::Previewing, WizardAction::Saved { message }) => {
                self.discard_edit_state();
                self.message = Some(message);
                self.step = Step::Success;
            }
            (Step::Previewing, WizardAction::SaveFailed { message }) => {
                self.message = Some(message);
                self.step = Step::Failed;
            }
            (Step::Success | Step::Failed, WizardAction::Back) => {
                self.message = None;
                self.step = Step::Previewing;
            }
            (Step::Previewing, WizardAction::Back) => {
                if !self.has_edit_state() {
                    return Err(WizardError::NothingToEdit);
                }
                self.step = Step::Editing;
            }
            (from, _) => return Err(WizardError::InvalidTransition { from, action: name }),
        }
        Ok(())
    }

    fn load(&mut self, response: UploadResponse) {
        self.mapping = ColumnMapping::from_upload(&response);
        self.rules = RuleSet::compile(&response.target_fields);
        self.table = response.data;
        self.preview = Table::default();
        self.message = None;
        self.step = Step::Editing;
        info!(
            rows = self.table.len(),
            columns = self.mapping.columns().len(),
            rules = self.rules.len(),
            "upload loaded"
        );
    }

    fn edit_cell(&mut self, row: usize, column: &str, value: String) -> Result<()> {
        if !self.mapping.contains(column) {
            return Err(import_model::ModelError::UnknownColumn(column.to_string()).into());
        }
        if self.mapping.is_read_only(column) {
            return Err(WizardError::ColumnReadOnly(column.to_string()));
        }
        self.table.set_cell(row, column, value)?;
        Ok(())
    }

    fn discard_edit_state(&mut self) {
        self.table = Table::default();
        self.mapping = ColumnMapping::default();
        self.rules = RuleSet::default();
    }

    fn reset(&mut self) {
        debug!(from = %self.step, "wizard reset");
        *self = Self::default();
    }

    /// Whether `value` is acceptable for `column` under its current label.
    ///
    /// Inactive columns have no rule.
    pub fn cell_is_valid(&self, column: &str, value: &str) -> bool {
        if self.mapping.is_inactive(column) {
            return true;
        }
        match self.mapping.label(column) {
            Some(label) => self.rules.is_valid(label, value),
            None => true,
        }
    }

    /// All invalid cells of the table being edited.
    pub fn validation_report(&self) -> ValidationReport {
        self.rules.validate_table(&self.table, |column| {
            if self.mapping.is_inactive(column) {
                None
            } else {
                self.mapping.label(column).map(str::to_string)
            }
        })
    }
}
