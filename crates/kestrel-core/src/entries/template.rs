//! Class template entry.
//!
//! A `ClassTemplateEntry` is a blueprint: its fields and constructor
//! parameters may mention the template's own type parameters. It has no
//! layout until it is instantiated with concrete type arguments.

use crate::{DataType, Param, TypeHash};

/// A type parameter of a class template (the `T` in `Box<T>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParam {
    /// Parameter name.
    pub name: String,
    /// Placeholder hash, scoped to the owning template.
    pub type_hash: TypeHash,
}

impl TemplateParam {
    pub fn new(template: TypeHash, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            type_hash: TypeHash::from_template_param(template, &name),
            name,
        }
    }

    /// The placeholder as a data type, for use in field and parameter types.
    pub fn data_type(&self) -> DataType {
        DataType::simple(self.type_hash)
    }
}

/// Registry entry for a generic class blueprint.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassTemplateEntry {
    /// Template name (`Box`).
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Ordered type parameters.
    pub params: Vec<TemplateParam>,
    /// Fields, possibly typed by template parameters.
    pub fields: Vec<(String, DataType)>,
    /// Constructor parameters, if the template declares a constructor.
    pub constructor: Option<Vec<Param>>,
}

impl ClassTemplateEntry {
    /// Create a template with the given parameter names.
    pub fn new<S: Into<String>>(name: impl Into<String>, params: impl IntoIterator<Item = S>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            params: params
                .into_iter()
                .map(|p| TemplateParam::new(type_hash, p))
                .collect(),
            name,
            type_hash,
            fields: Vec::new(),
            constructor: None,
        }
    }

    /// Placeholder type of the named parameter.
    pub fn param(&self, name: &str) -> Option<DataType> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(TemplateParam::data_type)
    }

    /// Add a field.
    pub fn with_field(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.fields.push((name.into(), data_type));
        self
    }

    /// Declare the constructor's parameters.
    pub fn with_constructor(mut self, params: Vec<Param>) -> Self {
        self.constructor = Some(params);
        self
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}
