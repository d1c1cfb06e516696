use serde::{Deserialize, Serialize};

use crate::domain::entities::admin::provider_fields;
use crate::domain::entities::form::{validate_form, FieldSpec, FormErrors, FormValues};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardStep {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// Serializable snapshot of an unfinished wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WizardDraft {
    pub step: usize,
    pub values: FormValues,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiStepForm {
    steps: Vec<WizardStep>,
    current: usize,
    values: FormValues,
    errors: FormErrors,
}

impl MultiStepForm {
    pub fn new(steps: Vec<WizardStep>) -> Self {
        Self {
            steps,
            current: 0,
            values: FormValues::new(),
            errors: FormErrors::new(),
        }
    }

    pub fn from_draft(steps: Vec<WizardStep>, draft: WizardDraft) -> Self {
        let last = steps.len().saturating_sub(1);
        Self {
            steps,
            current: draft.step.min(last),
            values: draft.values,
            errors: FormErrors::new(),
        }
    }

    pub fn draft(&self) -> WizardDraft {
        WizardDraft {
            step: self.current,
            values: self.values.clone(),
        }
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&WizardStep> {
        self.steps.get(self.current)
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
        self.errors.remove(key);
    }

    /// Advances only when the current step validates.
    pub fn next(&mut self) -> bool {
        let Some(step) = self.current_step() else {
            return false;
        };
        self.errors = validate_form(&step.fields, &self.values);
        if !self.errors.is_empty() || self.is_last_step() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.errors.clear();
        true
    }

    /// Validates every step; on failure jumps to the first invalid step.
    pub fn finish(&mut self) -> Result<FormValues, FormErrors> {
        for (idx, step) in self.steps.iter().enumerate() {
            let errors = validate_form(&step.fields, &self.values);
            if !errors.is_empty() {
                self.current = idx;
                self.errors = errors.clone();
                return Err(errors);
            }
        }
        self.errors.clear();
        Ok(self.values.clone())
    }
}

pub fn provider_onboarding_steps() -> Vec<WizardStep> {
    let mut fields = provider_fields().into_iter();
    let mut take = |count: usize| fields.by_ref().take(count).collect::<Vec<_>>();
    vec![
        WizardStep {
            title: "Provider",
            fields: take(2),
        },
        WizardStep {
            title: "Integration",
            fields: take(2),
        },
        WizardStep {
            title: "Settings",
            fields: take(2),
        },
    ]
}
