use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Select(Vec<&'static str>),
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
}

impl FieldSpec {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            min_len: None,
            max_len: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn length(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = Some(min_len);
        self.max_len = Some(max_len);
        self
    }

    pub fn validate(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        if value.is_empty() {
            return if self.required && self.kind != FieldKind::Toggle {
                Some(format!("{} is required", self.label))
            } else {
                None
            };
        }

        let char_count = value.chars().count();
        if let Some(min_len) = self.min_len {
            if char_count < min_len {
                return Some(format!(
                    "{} must be at least {min_len} characters",
                    self.label
                ));
            }
        }
        if let Some(max_len) = self.max_len {
            if char_count > max_len {
                return Some(format!(
                    "{} must be at most {max_len} characters",
                    self.label
                ));
            }
        }

        match &self.kind {
            FieldKind::Email => {
                let valid = value
                    .split_once('@')
                    .map(|(local, domain)| {
                        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                    })
                    .unwrap_or(false);
                (!valid).then(|| format!("{} must be a valid email address", self.label))
            }
            FieldKind::Number => value
                .parse::<f64>()
                .is_err()
                .then(|| format!("{} must be a number", self.label)),
            FieldKind::Select(options) => (!options.contains(&value))
                .then(|| format!("{} must be one of: {}", self.label, options.join(", "))),
            FieldKind::Toggle => (!matches!(value, "true" | "false"))
                .then(|| format!("{} must be on or off", self.label)),
            FieldKind::Text | FieldKind::Password => None,
        }
    }
}

pub type FormValues = BTreeMap<String, String>;
pub type FormErrors = BTreeMap<String, String>;

pub fn validate_form(fields: &[FieldSpec], values: &FormValues) -> FormErrors {
    fields
        .iter()
        .filter_map(|field| {
            let raw = values.get(field.key).map(String::as_str).unwrap_or("");
            field
                .validate(raw)
                .map(|message| (field.key.to_string(), message))
        })
        .collect()
}
