//! Structured descriptions of runtime values.
//!
//! A [`ValueDescription`] is the serializable, one-level-deep picture of a
//! runtime value that crosses to the control side. Primitives carry their
//! payload inline; composite values list their own enumerable properties,
//! with nested composites represented as [`Handle`]s so that descending into
//! an object graph always costs one `lookup_ref` per level.

use serde::Serialize;
use std::fmt;

/// Stable integer identifying a heap value within a collection scope.
///
/// A handle resolves to the same value for as long as its owning scope is
/// open; it is never reused while the referent is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Handle(pub(crate) u64);

impl Handle {
    /// Returns the raw reference number.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One own property of a described object or function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Property {
    /// A primitive property, described inline.
    Inline {
        /// Property name.
        name: String,
        /// Inline description of the property value.
        #[serde(flatten)]
        value: ValueDescription,
    },
    /// A composite property, referenced by handle. A further `lookup_ref`
    /// is required to descend into it.
    Nested {
        /// Property name.
        name: String,
        /// Handle of the property value, issued in the owner's scope.
        #[serde(rename = "ref")]
        handle: Handle,
    },
}

impl Property {
    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Inline { name, .. } | Self::Nested { name, .. } => name,
        }
    }

    /// The inline description, if the property is primitive.
    #[must_use]
    pub fn value(&self) -> Option<&ValueDescription> {
        match self {
            Self::Inline { value, .. } => Some(value),
            Self::Nested { .. } => None,
        }
    }

    /// The nested handle, if the property is composite.
    #[must_use]
    pub fn handle(&self) -> Option<Handle> {
        match self {
            Self::Inline { .. } => None,
            Self::Nested { handle, .. } => Some(*handle),
        }
    }
}

/// Tagged, serializable description of a runtime value.
///
/// Serializes as `{"type": "number", "value": 1.0}` and so on; object and
/// function descriptions carry a `properties` array in the enumeration
/// order observed on the runtime object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueDescription {
    /// The undefined value.
    Undefined,
    /// The null value. Serialized with an explicit `"value": null`.
    Null {
        /// Always serializes as JSON `null`.
        value: (),
    },
    /// A boolean.
    Boolean {
        /// The boolean payload.
        value: bool,
    },
    /// A number.
    Number {
        /// The numeric payload.
        value: f64,
    },
    /// A string.
    String {
        /// The string payload.
        value: String,
    },
    /// An object, with its own enumerable properties one level deep.
    Object {
        /// Properties in runtime enumeration order.
        properties: Vec<Property>,
    },
    /// A function, treated as a composite like an object.
    Function {
        /// Properties in runtime enumeration order.
        properties: Vec<Property>,
    },
}

impl ValueDescription {
    /// The null description.
    #[must_use]
    pub fn null() -> Self {
        Self::Null { value: () }
    }

    /// The type tag as it appears on the wire.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null { .. } => "null",
            Self::Boolean { .. } => "boolean",
            Self::Number { .. } => "number",
            Self::String { .. } => "string",
            Self::Object { .. } => "object",
            Self::Function { .. } => "function",
        }
    }

    /// Whether this describes the undefined value.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Whether this describes the null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null { .. })
    }

    /// The numeric payload, if this describes a number.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Number { value } => Some(*value),
            _ => None,
        }
    }

    /// The string payload, if this describes a string.
    #[must_use]
    pub fn string(&self) -> Option<&str> {
        match self {
            Self::String { value } => Some(value),
            _ => None,
        }
    }

    /// The boolean payload, if this describes a boolean.
    #[must_use]
    pub fn boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean { value } => Some(*value),
            _ => None,
        }
    }

    /// The property list, if this describes an object or function.
    #[must_use]
    pub fn properties(&self) -> Option<&[Property]> {
        match self {
            Self::Object { properties } | Self::Function { properties } => Some(properties),
            _ => None,
        }
    }
}
