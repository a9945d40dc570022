#[cfg(test)]
mod model_tests {
    use std::collections::BTreeMap;

    use jiff::Timestamp;

    use crate::{
        dom::{Document, ElementSpec, Selector},
        models::{
            ButtonRole, CompletionState, Direction, FieldDescriptor, FieldKind, FieldValue,
            Submission,
        },
    };

    fn field_doc() -> Document {
        Document::from_spec(
            ElementSpec::new("form")
                .child(
                    ElementSpec::new("input")
                        .attr("type", "email")
                        .attr("name", "email")
                        .attr("required", ""),
                )
                .child(ElementSpec::new("input").attr("type", "submit"))
                .child(ElementSpec::new("input").attr("data-step-field-name", "phone"))
                .child(ElementSpec::new("input").attr("type", "range").attr("name", "vol"))
                .child(ElementSpec::new("textarea").attr("name", "notes"))
                .child(ElementSpec::new("div").attr("name", "not-a-field")),
        )
    }

    #[test]
    fn test_field_kind_resolution() {
        let doc = field_doc();
        let kinds: Vec<Option<FieldKind>> = doc
            .children(doc.root())
            .iter()
            .map(|id| FieldKind::of(&doc, *id))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(FieldKind::Email),
                None,
                Some(FieldKind::Text),
                Some(FieldKind::Other("range".to_string())),
                Some(FieldKind::Textarea),
                None,
            ]
        );
    }

    #[test]
    fn test_field_descriptor_name_and_required() {
        let doc = field_doc();
        let email = FieldDescriptor::from_node(&doc, doc.children(doc.root())[0]).expect("field");
        assert_eq!(email.name.as_deref(), Some("email"));
        assert!(email.required);

        let phone = FieldDescriptor::from_node(&doc, doc.children(doc.root())[2]).expect("field");
        assert_eq!(phone.name.as_deref(), Some("phone"));
        assert!(!phone.required);
        assert_eq!(phone.summary_name(&doc), Some("phone"));
    }

    #[test]
    fn test_summary_name_prefers_override() {
        let doc = Document::from_spec(
            ElementSpec::new("form").child(
                ElementSpec::new("input")
                    .attr("name", "entity_name")
                    .attr("data-step-field-name", "entityName"),
            ),
        );
        let node = doc
            .query_first(doc.root(), &Selector::tag("input"))
            .expect("input");
        let field = FieldDescriptor::from_node(&doc, node).expect("field");
        assert_eq!(field.name.as_deref(), Some("entity_name"));
        assert_eq!(field.summary_name(&doc), Some("entityName"));
    }

    #[test]
    fn test_field_value_rendering() {
        assert_eq!(FieldValue::Null.to_display_string(), "");
        assert_eq!(FieldValue::Bool(false).to_display_string(), "");
        assert_eq!(FieldValue::Bool(true).to_display_string(), "true");
        assert_eq!(FieldValue::text("Alice").to_display_string(), "Alice");
        assert!(FieldValue::text("   ").is_blank());
        assert!(!FieldValue::text("x").is_blank());
    }

    #[test]
    fn test_field_value_serde_is_untagged() {
        let mut data = BTreeMap::new();
        data.insert("a".to_string(), FieldValue::Null);
        data.insert("b".to_string(), FieldValue::Bool(true));
        data.insert("c".to_string(), FieldValue::text("x"));
        let json = serde_json::to_string(&data).expect("serialize");
        assert_eq!(json, r#"{"a":null,"b":true,"c":"x"}"#);

        let back: BTreeMap<String, FieldValue> = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, data);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Touched".parse::<CompletionState>(), Ok(CompletionState::Touched));
        assert!("done".parse::<CompletionState>().is_err());
        assert_eq!(CompletionState::default(), CompletionState::Untouched);

        assert_eq!("back-btn".parse::<ButtonRole>(), Ok(ButtonRole::Prev));
        assert_eq!(ButtonRole::Submit.as_str(), "submit");
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(0, 2), Direction::Forward);
        assert_eq!(Direction::between(2, 1), Direction::Backward);
        assert_eq!(Direction::Forward.as_str(), "forward");
    }

    #[test]
    fn test_submission_filled_count() {
        let mut data = BTreeMap::new();
        data.insert("name".to_string(), FieldValue::text("Alice"));
        data.insert("plan".to_string(), FieldValue::Null);
        data.insert("terms".to_string(), FieldValue::Bool(true));
        let submission = Submission {
            id: 1,
            form_id: "signup".to_string(),
            data,
            total_steps: 3,
            submitted_at: Timestamp::from_second(1640995200).unwrap(),
        };
        assert_eq!(submission.filled_count(), 2);
    }
}
