use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::VistaError;

/// Value of one editable controller parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Scalar parameter.
    Float(f32),
    /// 3-component vector parameter.
    Vector(Vec3),
}

impl PropertyValue {
    /// The scalar, or a type error naming `property`.
    pub fn as_float(&self, property: &str) -> Result<f32, VistaError> {
        match self {
            Self::Float(v) => Ok(*v),
            _ => Err(VistaError::PropertyType(property.to_owned())),
        }
    }

    /// The vector, or a type error naming `property`.
    pub fn as_vector(&self, property: &str) -> Result<Vec3, VistaError> {
        match self {
            Self::Vector(v) => Ok(*v),
            _ => Err(VistaError::PropertyType(property.to_owned())),
        }
    }
}

/// A named parameter shown beneath its view in the UI tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// Display name; also the key accepted by `set_property`.
    pub name: &'static str,
    /// Current value.
    pub value: PropertyValue,
}

impl Property {
    /// Scalar property.
    pub fn float(name: &'static str, value: f32) -> Self {
        Self {
            name,
            value: PropertyValue::Float(value),
        }
    }

    /// Vector property.
    pub fn vector(name: &'static str, value: Vec3) -> Self {
        Self {
            name,
            value: PropertyValue::Vector(value),
        }
    }
}
