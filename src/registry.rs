//! Ordered list of known view-controller types, used to populate "add a new
//! view" menus.
//!
//! Append-only for the life of the process. Duplicate identifiers are not
//! rejected; a second registration simply shows up twice.

/// One registered controller type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTypeInfo {
    /// Identifier accepted by the factory.
    pub class_name: String,
    /// Human-readable name for menus.
    pub display_name: String,
}

/// Insertion-ordered, append-only type list.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<ViewTypeInfo>,
}

impl TypeRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a type and return the stored entry.
    pub fn register(
        &mut self,
        class_name: &str,
        display_name: &str,
    ) -> &ViewTypeInfo {
        let index = self.types.len();
        self.types.push(ViewTypeInfo {
            class_name: class_name.to_owned(),
            display_name: display_name.to_owned(),
        });
        &self.types[index]
    }

    /// All registered types in registration order.
    #[must_use]
    pub fn types(&self) -> &[ViewTypeInfo] {
        &self.types
    }

    /// Display names in registration order.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.display_name.as_str())
    }

    /// Number of registrations (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
