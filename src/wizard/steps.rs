//! Step assembly.
//!
//! The report wizard always has three steps in a fixed order. Each step is
//! populated by rendering its metadata list in list order.

use crate::metadata::MetadataDocument;

use super::render::{render_field, RenderedField};

/// One wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub fields: Vec<RenderedField>,
}

/// Number of steps the wizard always has.
pub const STEP_COUNT: usize = 3;

/// Index of the Basic Info step.
pub const BASIC_INFO: usize = 0;

/// Build the Basic Info, Scores and Notices steps from a metadata document.
///
/// Empty lists still produce their step, just without fields.
pub fn assemble_steps(doc: &MetadataDocument) -> Vec<StepDefinition> {
    let lists = [
        ("basic", "Basic Info", &doc.fields),
        ("scores", "Scores", &doc.score_fields),
        ("notices", "Notices", &doc.notice_fields),
    ];

    lists
        .into_iter()
        .map(|(id, title, descriptors)| StepDefinition {
            id,
            title,
            fields: descriptors.iter().map(render_field).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FieldDescriptor;

    fn doc() -> MetadataDocument {
        MetadataDocument {
            fields: vec![
                FieldDescriptor::text("project"),
                FieldDescriptor::date("audit_date"),
            ],
            score_fields: vec![FieldDescriptor::number("overall_score_percentage")],
            notice_fields: vec![
                FieldDescriptor::number("improvement_notices"),
                FieldDescriptor::number("contravention_notices"),
            ],
        }
    }

    #[test]
    fn produces_three_steps_in_order() {
        let steps = assemble_steps(&doc());
        let titles: Vec<_> = steps.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Basic Info", "Scores", "Notices"]);
        assert_eq!(steps.len(), STEP_COUNT);
    }

    #[test]
    fn keeps_list_order_within_a_step() {
        let steps = assemble_steps(&doc());
        let names: Vec<_> = steps[2].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["improvement_notices", "contravention_notices"]);
    }

    #[test]
    fn empty_metadata_still_has_three_empty_steps() {
        let steps = assemble_steps(&MetadataDocument::default());
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.fields.is_empty()));
    }
}
