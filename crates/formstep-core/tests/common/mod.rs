use formstep_core::{dom::Document, SubmissionStore, SubmissionStoreBuilder};
use tempfile::TempDir;

/// Three-step signup form: contact details, an optional company step skipped
/// for personal accounts, and a review step with summary cards.
pub const SIGNUP_FORM: &str = r#"{
  "tag": "form",
  "attrs": { "id": "signup", "data-form": "multistep" },
  "children": [
    { "tag": "div", "attrs": { "data-form": "step", "data-step-type": "contact", "data-step-number": "1" },
      "children": [
        { "tag": "label", "attrs": { "for": "name" }, "text": "Full name *" },
        { "tag": "input", "attrs": { "id": "name", "name": "name", "type": "text", "required": "", "data-step-field-name": "name" } },
        { "tag": "input", "attrs": { "type": "radio", "name": "account", "value": "personal" } },
        { "tag": "input", "attrs": { "type": "radio", "name": "account", "value": "business" } },
        { "tag": "select", "attrs": { "name": "countryCode", "data-step-field-name": "countryCode" },
          "children": [
            { "tag": "option", "attrs": { "value": "" }, "text": "Choose" },
            { "tag": "option", "attrs": { "value": "US" }, "text": "United States" }
          ] },
        { "tag": "input", "attrs": { "type": "tel", "name": "phone", "data-step-field-name": "phone" } }
      ] },
    { "tag": "div", "attrs": { "data-form": "step", "data-skip-if": "account=business" },
      "children": [
        { "tag": "input", "attrs": { "name": "company", "type": "text", "required": "" } }
      ] },
    { "tag": "div", "attrs": { "data-form": "step" },
      "children": [
        { "tag": "div", "attrs": { "data-summary-type": "contact", "data-summary-number": "1" },
          "children": [
            { "tag": "span", "attrs": { "data-summary-field": "name" } },
            { "tag": "span", "attrs": { "data-summary-field": "phone" } }
          ] }
      ] },
    { "tag": "button", "attrs": { "data-form": "next-btn" }, "text": "Next" },
    { "tag": "button", "attrs": { "data-form": "back-btn" }, "text": "Back" },
    { "tag": "button", "attrs": { "data-form": "submit-btn" }, "text": "Submit" }
  ]
}"#;

pub fn signup_document() -> Document {
    Document::from_json(SIGNUP_FORM).expect("Failed to parse signup form")
}

/// Helper function to create a test store
pub async fn create_test_store() -> (TempDir, SubmissionStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = SubmissionStoreBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}
