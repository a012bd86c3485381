//! Messages shown to the user by the wizard.

pub const UPLOAD_FAILED: &str = "Error processing file";
pub const SAVE_SUCCEEDED: &str = "Thank you!";
pub const TEMPLATE_SAVED: &str = "Thank you, template saved successfully!";
pub const SAVE_FAILED: &str = "Error saving data";
pub const TEMPLATE_FAILED: &str = "Error saving template";
pub const TEMPLATE_NAME_REQUIRED: &str = "Please enter template name";
