use crate::types::{adapter_key, StorageOptions};

/// **STORAGE LIFECYCLE**
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle {
    /// Bound at assembly time to the adapter under `adapter_key`
    Eager {
        adapter_key: String,
        options: StorageOptions,
    },

    /// Bound at first use to whatever storage `source` names
    Lazy { source: String },
}

/// **STORAGE HANDLE**
///
/// The named storage registered under its own name. Immutable after assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageHandle {
    pub name: String,
    pub lifecycle: Lifecycle,
}

impl StorageHandle {
    /// **EAGER CONSTRUCTOR** - Wraps the adapter registered at `adapter.<name>`
    pub fn eager(name: impl Into<String>, options: StorageOptions) -> Self {
        let name = name.into();
        Self {
            lifecycle: Lifecycle::Eager {
                adapter_key: adapter_key(&name),
                options,
            },
            name,
        }
    }

    /// **LAZY CONSTRUCTOR** - Keyed by `(source, name)`
    pub fn lazy(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifecycle: Lifecycle::Lazy {
                source: source.into(),
            },
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Lazy { .. })
    }

    /// Source key of a lazy storage.
    pub fn source(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::Lazy { source } => Some(source),
            Lifecycle::Eager { .. } => None,
        }
    }

    /// Adapter component key of an eager storage.
    pub fn adapter_key(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::Eager { adapter_key, .. } => Some(adapter_key),
            Lifecycle::Lazy { .. } => None,
        }
    }

    /// Storage options of an eager storage.
    pub fn options(&self) -> Option<&StorageOptions> {
        match &self.lifecycle {
            Lifecycle::Eager { options, .. } => Some(options),
            Lifecycle::Lazy { .. } => None,
        }
    }
}
