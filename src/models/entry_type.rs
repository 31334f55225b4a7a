//! Entry type model for the SDK

use serde::{Deserialize, Serialize};

/// Role a field plays for a given entry type
///
/// The declaration order is also the precedence order used when a field
/// is listed under more than one role: later roles overwrite earlier ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Required,
    Optional,
    General,
    Utility,
}

impl FieldRole {
    /// All roles in sweep order (required, optional, general, utility)
    pub const SWEEP_ORDER: [FieldRole; 4] = [
        FieldRole::Required,
        FieldRole::Optional,
        FieldRole::General,
        FieldRole::Utility,
    ];

    /// Three-letter code stored in the `entry_types` table
    pub fn code(self) -> &'static str {
        match self {
            FieldRole::Required => "req",
            FieldRole::Optional => "opt",
            FieldRole::General => "gen",
            FieldRole::Utility => "uti",
        }
    }
}

/// Entry type definition
///
/// A named template declaring which fields apply to an entry and under which
/// role. The four role lists are independent and may overlap.
///
/// # Example
///
/// ```rust
/// use bibsql::models::EntryTypeDefinition;
///
/// let article = EntryTypeDefinition::new("Article")
///     .with_required(["author", "title"])
///     .with_optional(["volume"]);
/// assert_eq!(article.normalized_name(), "article");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EntryTypeDefinition {
    /// Type name as declared (e.g. "Article")
    pub name: String,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
    #[serde(default)]
    pub general: Vec<String>,
    #[serde(default)]
    pub utility: Vec<String>,
}

impl EntryTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_required<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_optional<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_general<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.general = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_utility<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.utility = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Fields listed under the given role
    pub fn fields_for(&self, role: FieldRole) -> &[String] {
        match role {
            FieldRole::Required => &self.required,
            FieldRole::Optional => &self.optional,
            FieldRole::General => &self.general,
            FieldRole::Utility => &self.utility,
        }
    }

    /// Lowercased name, used as the `entry_types.label` value and lookup key
    pub fn normalized_name(&self) -> String {
        self.name.to_lowercase()
    }
}
