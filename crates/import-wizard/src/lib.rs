//! The spreadsheet import wizard.
//!
//! A file goes through three numbered steps after upload:
//!
//! 1. **Editing**: pick a label for each column and fix cell values
//! 2. **Preview**: review the table that will be sent
//! 3. **Result**: the service's answer, with a way back to the preview
//!
//! [`Wizard`] holds the state and is changed only by dispatching
//! [`WizardAction`]s. [`WizardSession`] pairs it with an
//! [`ImportApi`](import_client::ImportApi) implementation for the upload and
//! save calls.

#![deny(unsafe_code)]

pub mod error;
pub mod messages;
pub mod session;
pub mod state;
pub mod step;

pub use error::{Result, WizardError};
pub use session::WizardSession;
pub use state::Wizard;
pub use step::{Step, TOTAL_STEPS, WizardAction};
