//! Status and confirmation message types for operation feedback.

use std::fmt;

/// One-line confirmation of a store operation.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Submission recorded".to_string());
        assert!(format!("{success}").starts_with("Success:"));

        let failure = OperationStatus::failure("Deletion cancelled".to_string());
        assert!(format!("{failure}").starts_with("Error:"));
    }
}
