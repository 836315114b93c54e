use super::View;

/// One entry of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
}

pub const TEMPLATE_STEP: u8 = 1;
pub const UPLOAD_STEP: u8 = 2;
pub const CONFIGURE_STEP: u8 = 3;
pub const RESULTS_STEP: u8 = 4;
pub const MAPPING_STEP: u8 = 5;

pub const FIRST_STEP: u8 = TEMPLATE_STEP;
pub const LAST_STEP: u8 = MAPPING_STEP;

pub const STEPS: [StepDefinition; 5] = [
    StepDefinition {
        id: TEMPLATE_STEP,
        title: "Template",
        description: "Choose how the documents are laid out",
    },
    StepDefinition {
        id: UPLOAD_STEP,
        title: "Upload",
        description: "Upload sample PDF documents",
    },
    StepDefinition {
        id: CONFIGURE_STEP,
        title: "Configure",
        description: "Define sections and parameters to extract",
    },
    StepDefinition {
        id: RESULTS_STEP,
        title: "Results",
        description: "Review the extraction configuration",
    },
    StepDefinition {
        id: MAPPING_STEP,
        title: "Database",
        description: "Map parameters to a table and run batches",
    },
];

pub fn step(id: u8) -> Option<&'static StepDefinition> {
    STEPS.iter().find(|s| s.id == id)
}

/// The step the progress indicator highlights for a view. Only the setup
/// view carries a real step; the others show a fixed one.
pub fn display_step(view: &View) -> Option<u8> {
    match view {
        View::Projects => None,
        View::Setup(step) => Some(*step),
        View::ViewResults => Some(RESULTS_STEP),
        View::SchemaMapping | View::BatchProcessing => Some(MAPPING_STEP),
    }
}

/// Clamps a stored step number into the setup range.
pub fn clamp_step(step: u8) -> u8 {
    step.clamp(FIRST_STEP, LAST_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_ordered_and_complete() {
        let ids: Vec<u8> = STEPS.iter().map(|s| s.id).collect();
        assert_eq!(ids, (FIRST_STEP..=LAST_STEP).collect::<Vec<_>>());
        assert_eq!(step(3).map(|s| s.title), Some("Configure"));
        assert!(step(9).is_none());
    }

    #[test]
    fn fixed_display_steps_outside_setup() {
        assert_eq!(display_step(&View::Projects), None);
        assert_eq!(display_step(&View::Setup(2)), Some(2));
        assert_eq!(display_step(&View::BatchProcessing), Some(MAPPING_STEP));
    }
}
