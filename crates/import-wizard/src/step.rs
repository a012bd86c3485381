//! Wizard steps and the actions that move between them.

use std::fmt;

use import_model::{TemplateType, UploadResponse};

/// Number of numbered steps shown by the step indicator.
pub const TOTAL_STEPS: u8 = 3;

// =============================================================================
// STEP ENUM
// =============================================================================

/// Current screen of the wizard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// File and template selection.
    #[default]
    Upload,

    /// Step 1: map columns and edit cells.
    Editing,

    /// Step 2: review the table that will be saved.
    Previewing,

    /// Step 3: the save call succeeded.
    Success,

    /// Step 3: the save call failed.
    Failed,
}

impl Step {
    /// Position in the step indicator; the upload screen is not numbered.
    pub const fn number(&self) -> u8 {
        match self {
            Self::Upload => 0,
            Self::Editing => 1,
            Self::Previewing => 2,
            Self::Success | Self::Failed => 3,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Editing => "editing",
            Self::Previewing => "preview",
            Self::Success => "success",
            Self::Failed => "error",
        }
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Everything that can change wizard state.
#[derive(Debug, Clone)]
pub enum WizardAction {
    /// Pick the parsing template before uploading.
    SelectTemplate(TemplateType),
    /// The service parsed the upload.
    Loaded(UploadResponse),
    /// The upload call failed; the message is shown on the upload screen.
    UploadFailed(String),
    /// Choose a label for a column header.
    SetMapping { column: String, label: String },
    /// Replace one cell value.
    EditCell {
        row: usize,
        column: String,
        value: String,
    },
    /// Carry the edited table forward to the preview.
    Next,
    /// A save call succeeded.
    Saved { message: String },
    /// A save call failed.
    SaveFailed { message: String },
    /// Go back one screen.
    Back,
    /// Drop everything and return to the upload screen.
    Reset,
}

impl WizardAction {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelectTemplate(_) => "select a template",
            Self::Loaded(_) => "load an upload",
            Self::UploadFailed(_) => "report an upload failure",
            Self::SetMapping { .. } => "change a column mapping",
            Self::EditCell { .. } => "edit a cell",
            Self::Next => "continue",
            Self::Saved { .. } => "complete a save",
            Self::SaveFailed { .. } => "report a save failure",
            Self::Back => "go back",
            Self::Reset => "reset",
        }
    }

    pub fn set_mapping(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self::SetMapping {
            column: column.into(),
            label: label.into(),
        }
    }

    pub fn edit_cell(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::EditCell {
            row,
            column: column.into(),
            value: value.into(),
        }
    }
}
