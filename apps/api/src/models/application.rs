use serde::{Deserialize, Serialize};

/// The position a critique is tailored to. Exists only for the duration of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationContext {
    pub company: String,
    pub role: String,
    pub field: String,
}

impl ApplicationContext {
    /// Renders the context as the labelled block embedded in the critique prompt.
    pub fn describe(&self) -> String {
        format!(
            "Company: {}\nPosition: {}\nField: {}",
            self.company, self.role, self.field
        )
    }
}
