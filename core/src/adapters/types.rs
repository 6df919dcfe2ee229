use crate::registry::ComponentDefinition;
use crate::types::OptionMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// **BUILT-IN ADAPTER KINDS**
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    Local,
    Memory,
    Aws,
    AsyncAws,
    Azure,
    Gcloud,
    Ftp,
    Sftp,
}

impl AdapterKind {
    pub const ALL: [AdapterKind; 8] = [
        AdapterKind::Local,
        AdapterKind::Memory,
        AdapterKind::Aws,
        AdapterKind::AsyncAws,
        AdapterKind::Azure,
        AdapterKind::Gcloud,
        AdapterKind::Ftp,
        AdapterKind::Sftp,
    ];

    /// Kind matching an adapter spec, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Name used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            AdapterKind::Local => "local",
            AdapterKind::Memory => "memory",
            AdapterKind::Aws => "aws",
            AdapterKind::AsyncAws => "asyncaws",
            AdapterKind::Azure => "azure",
            AdapterKind::Gcloud => "gcloud",
            AdapterKind::Ftp => "ftp",
            AdapterKind::Sftp => "sftp",
        }
    }

    /// Adapter type the backend library constructs for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            AdapterKind::Local => "LocalFilesystemAdapter",
            AdapterKind::Memory => "InMemoryFilesystemAdapter",
            AdapterKind::Aws => "AwsS3V3Adapter",
            AdapterKind::AsyncAws => "AsyncAwsS3Adapter",
            AdapterKind::Azure => "AzureBlobStorageAdapter",
            AdapterKind::Gcloud => "GoogleCloudStorageAdapter",
            AdapterKind::Ftp => "FtpAdapter",
            AdapterKind::Sftp => "SftpAdapter",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// **ADAPTER RECIPE**
///
/// How the adapter of one storage is constructed. Produced once per eager
/// declaration and registered under `adapter.<storage name>`.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterRecipe {
    /// Built-in kind with options normalized against its schema
    BuiltIn { kind: AdapterKind, options: OptionMap },

    /// Reuse of a component already in the registry
    AliasToExisting { component_key: String },

    /// Custom adapter type, options passed as `$name` constructor arguments
    DynamicType { type_name: String, arguments: OptionMap },

    /// Definition produced by a custom adapter definition builder
    BuilderType {
        builder: String,
        options: OptionMap,
        definition: ComponentDefinition,
    },
}

impl AdapterRecipe {
    /// Short label for logs.
    pub fn label(&self) -> String {
        match self {
            AdapterRecipe::BuiltIn { kind, .. } => {
                format!("built-in `{}` ({})", kind, kind.type_name())
            }
            AdapterRecipe::AliasToExisting { component_key } => {
                format!("alias to `{}`", component_key)
            }
            AdapterRecipe::DynamicType { type_name, .. } => format!("type `{}`", type_name),
            AdapterRecipe::BuilderType { builder, .. } => format!("builder `{}`", builder),
        }
    }
}
