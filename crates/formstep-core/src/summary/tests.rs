#[cfg(test)]
mod summary_tests {
    use crate::{
        config::{CheckboxPolicy, EmptySummary},
        dom::{Document, ElementSpec, NodeId, Selector},
        models::{CompletionState, Step},
        registry::StepRegistry,
        summary::{NoPhoneService, SummaryProjector},
    };

    fn input(name: &str) -> ElementSpec {
        ElementSpec::new("input")
            .attr("name", name)
            .attr("data-step-field-name", name)
    }

    fn card(step_type: &str, number: &str, subtype: Option<&str>, fields: &[&str]) -> ElementSpec {
        let mut card = ElementSpec::new("div")
            .attr("data-summary-type", step_type)
            .attr("data-summary-number", number);
        if let Some(subtype) = subtype {
            card = card.attr("data-summary-subtype", subtype);
        }
        card.children(
            fields
                .iter()
                .map(|f| ElementSpec::new("span").attr("data-summary-field", *f)),
        )
    }

    fn document() -> Document {
        Document::from_spec(
            ElementSpec::new("form")
                .child(
                    ElementSpec::new("div")
                        .attr("data-form", "step")
                        .attr("data-step-type", "contact")
                        .attr("data-step-number", "1")
                        .child(input("fullName"))
                        .child(
                            ElementSpec::new("select")
                                .attr("name", "countryCode")
                                .attr("data-step-field-name", "countryCode")
                                .child(ElementSpec::new("option").attr("value", "").text("Choose"))
                                .child(ElementSpec::new("option").attr("value", "US").text("United States"))
                                .child(ElementSpec::new("option").attr("value", "DE").text("Germany")),
                        )
                        .child(input("phone")),
                )
                .child(
                    ElementSpec::new("div")
                        .attr("data-form", "step")
                        .attr("data-step-type", "business")
                        .attr("data-step-number", "2")
                        .attr("data-step-subtype", "llc")
                        .child(input("taxCollection"))
                        .child(input("entityName")),
                )
                .child(card("contact", "1", None, &["fullName", "phone"]))
                .child(card("business", "2", None, &["taxClassification", "entityName"])),
        )
    }

    fn named(doc: &Document, name: &str) -> NodeId {
        doc.query_first(doc.root(), &Selector::attr_eq("name", name))
            .expect("field present")
    }

    fn cards(doc: &Document) -> Vec<NodeId> {
        doc.query_all(doc.root(), &Selector::attr("data-summary-type"))
    }

    fn steps(doc: &mut Document) -> Vec<Step> {
        let root = doc.root();
        StepRegistry::discover(doc, root).steps().to_vec()
    }

    #[test]
    fn test_field_value_mirrored() {
        let mut doc = document();
        let projector = SummaryProjector::default();
        let name = named(&doc, "fullName");
        doc.set_value(name, "Alice");

        let root = doc.root();
        let written = projector.field_changed(&mut doc, root, &CheckboxPolicy::default(), name);
        assert_eq!(written.len(), 1);
        assert_eq!(doc.text_content(written[0]), "Alice");
    }

    #[test]
    fn test_phone_summary_composition() {
        let mut doc = document();
        let projector = SummaryProjector::default();
        let root = doc.root();
        let policy = CheckboxPolicy::default();

        let phone = named(&doc, "phone");
        doc.set_value(phone, "5551234567");
        assert!(projector.field_changed(&mut doc, root, &policy, phone).is_empty());

        let country = named(&doc, "countryCode");
        doc.select_option(country, "US");
        let written = projector.field_changed(&mut doc, root, &policy, country);
        assert_eq!(written.len(), 1);
        assert_eq!(doc.text_content(written[0]), "+1 (555) 123-4567");
    }

    #[test]
    fn test_degraded_match_and_alias() {
        let mut doc = document();
        let projector = SummaryProjector::default();
        let root = doc.root();
        let tax = named(&doc, "taxCollection");
        doc.set_value(tax, "S-Corp");

        let written = projector.field_changed(&mut doc, root, &CheckboxPolicy::default(), tax);
        assert_eq!(written.len(), 1);
        assert_eq!(
            doc.attr(written[0], "data-summary-field"),
            Some("taxClassification")
        );
        assert_eq!(doc.text_content(written[0]), "S-Corp");
    }

    #[test]
    fn test_empty_policies() {
        let mut doc = document();
        let root = doc.root();
        let name = named(&doc, "fullName");
        let policy = CheckboxPolicy::default();

        let blank = SummaryProjector::default();
        let written = blank.field_changed(&mut doc, root, &policy, name);
        assert_eq!(doc.text_content(written[0]), "");

        let placeholder = SummaryProjector::new(
            EmptySummary::Placeholder("Not provided".to_string()),
            Box::new(NoPhoneService),
        );
        let written = placeholder.field_changed(&mut doc, root, &policy, name);
        assert_eq!(doc.text_content(written[0]), "Not provided");
    }

    #[test]
    fn test_cards_revealed_only_when_completed_with_content() {
        let mut doc = document();
        let mut steps = steps(&mut doc);
        let projector = SummaryProjector::default();
        let root = doc.root();
        let policy = CheckboxPolicy::default();

        projector.hide_cards(&mut doc);
        assert!(cards(&doc).iter().all(|c| !doc.is_displayed(*c)));

        let name = named(&doc, "fullName");
        doc.set_value(name, "Alice");
        projector.field_changed(&mut doc, root, &policy, name);
        steps[0].completion = CompletionState::Touched;
        assert!(projector.refresh_cards(&mut doc, &steps).is_empty());

        steps[0].completion = CompletionState::Completed;
        steps[1].completion = CompletionState::Completed;
        let visible = projector.refresh_cards(&mut doc, &steps);
        assert_eq!(visible, vec![cards(&doc)[0]]);
    }

    #[test]
    fn test_placeholder_does_not_count_as_content() {
        let mut doc = document();
        let mut steps = steps(&mut doc);
        let root = doc.root();
        let projector = SummaryProjector::new(
            EmptySummary::Placeholder("Not provided".to_string()),
            Box::new(NoPhoneService),
        );
        let name = named(&doc, "fullName");
        projector.field_changed(&mut doc, root, &CheckboxPolicy::default(), name);
        steps[0].completion = CompletionState::Completed;
        assert!(projector.refresh_cards(&mut doc, &steps).is_empty());
    }
}
