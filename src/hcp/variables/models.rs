//! Variable data models

use serde::Deserialize;

use crate::hcp::traits::TfeResource;

/// Variable category as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableCategory {
    /// Terraform input variable
    Terraform,
    /// Environment variable
    Env,
    /// Any other category (e.g. policy-set parameters)
    Other,
}

impl VariableCategory {
    /// Parse the wire name of a category
    pub fn parse(category: &str) -> Self {
        match category {
            "terraform" => VariableCategory::Terraform,
            "env" => VariableCategory::Env,
            _ => VariableCategory::Other,
        }
    }
}

impl std::fmt::Display for VariableCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableCategory::Terraform => write!(f, "terraform"),
            VariableCategory::Env => write!(f, "env"),
            VariableCategory::Other => write!(f, "other"),
        }
    }
}

/// Variable data from TFE API (workspace or variable set)
#[derive(Deserialize, Debug, Clone)]
pub struct Variable {
    pub id: String,
    pub attributes: VariableAttributes,
}

/// Variable attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct VariableAttributes {
    pub key: String,
    /// Null for sensitive variables
    pub value: Option<String>,
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub hcl: bool,
    #[serde(default)]
    pub sensitive: bool,
}

impl TfeResource for Variable {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.key
    }
}

impl Variable {
    /// Parsed category
    pub fn category(&self) -> VariableCategory {
        VariableCategory::parse(&self.attributes.category)
    }

    /// Raw category string as returned by the API
    pub fn category_name(&self) -> &str {
        &self.attributes.category
    }

    /// Value, empty when the variable is sensitive or unset
    pub fn value(&self) -> &str {
        self.attributes.value.as_deref().unwrap_or("")
    }

    pub fn is_hcl(&self) -> bool {
        self.attributes.hcl
    }

    pub fn is_sensitive(&self) -> bool {
        self.attributes.sensitive
    }
}
