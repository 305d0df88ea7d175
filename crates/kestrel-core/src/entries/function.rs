//! Function and constructor entries.

use crate::{DataType, TypeHash};

/// A compile-time constant, used for parameter default values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub data_type: DataType,
    /// Value bound when the caller omits this argument.
    pub default: Option<ConstValue>,
}

impl Param {
    /// Create a required parameter.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            default: None,
        }
    }

    /// Create a parameter with a default value.
    pub fn with_default(name: impl Into<String>, data_type: DataType, default: ConstValue) -> Self {
        Self {
            name: name.into(),
            data_type,
            default: Some(default),
        }
    }
}

/// A function signature.
///
/// Parameters are positional and the signature is unique per name; there
/// is no overloading.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Symbol name, used as the call target.
    pub name: String,
    /// Identity of this function.
    pub func_hash: TypeHash,
    /// Ordered parameters.
    pub params: Vec<Param>,
    /// Return type.
    pub return_type: DataType,
}

impl FunctionDef {
    /// Create a free function definition; the hash is derived from name and parameters.
    pub fn new(name: impl Into<String>, params: Vec<Param>, return_type: DataType) -> Self {
        let name = name.into();
        let param_hashes: Vec<TypeHash> = params.iter().map(|p| p.data_type.type_hash).collect();
        Self {
            func_hash: TypeHash::from_function(&name, &param_hashes),
            name,
            params,
            return_type,
        }
    }

    /// Create a constructor for `owner`.
    ///
    /// The symbol name is `<owner>#ctor`; the `self` pointer is implicit and
    /// not part of `params`. Constructors return the (pointer-sized) instance.
    pub fn constructor(owner_name: &str, owner: TypeHash, params: Vec<Param>) -> Self {
        let param_hashes: Vec<TypeHash> = params.iter().map(|p| p.data_type.type_hash).collect();
        Self {
            name: format!("{owner_name}#ctor"),
            func_hash: TypeHash::from_constructor(owner, &param_hashes),
            params,
            return_type: DataType::uintptr(),
        }
    }

    /// Number of declared parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Number of leading parameters without a default value.
    pub fn required_param_count(&self) -> usize {
        self.params
            .iter()
            .position(|p| p.default.is_some())
            .unwrap_or(self.params.len())
    }
}

/// Registry entry for a function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry {
    /// The signature.
    pub def: FunctionDef,
    /// Whether this is a class constructor.
    pub is_constructor: bool,
}

impl FunctionEntry {
    pub fn function(def: FunctionDef) -> Self {
        Self {
            def,
            is_constructor: false,
        }
    }

    pub fn constructor(def: FunctionDef) -> Self {
        Self {
            def,
            is_constructor: true,
        }
    }
}
