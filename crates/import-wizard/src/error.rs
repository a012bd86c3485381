use import_map::MappingError;
use import_model::ModelError;
use thiserror::Error;

use crate::messages::TEMPLATE_NAME_REQUIRED;
use crate::step::Step;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("cannot {action} during the {from} step")]
    InvalidTransition { from: Step, action: &'static str },
    #[error("column '{0}' is read-only")]
    ColumnReadOnly(String),
    #[error("there is no table to edit; upload a file first")]
    NothingToEdit,
    #[error("{}", TEMPLATE_NAME_REQUIRED)]
    TemplateNameRequired,
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, WizardError>;
