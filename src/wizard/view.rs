//! What the user sees of a wizard.

/// Visibility of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub id: &'static str,
    pub title: &'static str,
    pub visible: bool,
}

/// Projection of a wizard's state: which step shows and which buttons do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardView {
    pub steps: Vec<StepView>,
    pub back_enabled: bool,
    pub next_visible: bool,
    pub submit_visible: bool,
}

impl WizardView {
    /// The single visible step.
    pub fn visible_step(&self) -> Option<&StepView> {
        self.steps.iter().find(|step| step.visible)
    }

    /// Position as "n/total", one-based.
    pub fn position(&self) -> String {
        let index = self
            .steps
            .iter()
            .position(|step| step.visible)
            .map_or(0, |i| i + 1);
        format!("{}/{}", index, self.steps.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_one_based() {
        let view = WizardView {
            steps: vec![
                StepView {
                    id: "basic",
                    title: "Basic Info",
                    visible: false,
                },
                StepView {
                    id: "scores",
                    title: "Scores",
                    visible: true,
                },
            ],
            back_enabled: true,
            next_visible: false,
            submit_visible: true,
        };
        assert_eq!(view.position(), "2/2");
        assert_eq!(view.visible_step().map(|s| s.id), Some("scores"));
    }
}
