use std::fmt;
use std::str::FromStr;

use crate::block::CandidateBlock;

pub const MODULE_KEYWORD: &str = "module";
pub const RESOURCE_KEYWORD: &str = "resource";

const RESOURCE_DESTINATION: &str = "resources.tuf.tf";

/// Reasons a dotted address cannot be turned into a [`BlockDescriptor`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address '{address}' needs a type and a name (e.g. 'module.foo' or 'aws_s3_bucket.logs')")]
    TooFewSegments { address: String },
    #[error("address '{address}' has {segments} segments; only 'module.<name>' and '<type>.<name>' are supported")]
    TooManySegments { address: String, segments: usize },
    #[error("address '{address}' contains an empty segment")]
    EmptySegment { address: String },
}

impl AddressError {
    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::TooFewSegments { address }
            | Self::TooManySegments { address, .. }
            | Self::EmptySegment { address } => address,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDescriptor {
    name: String,
}

impl ModuleDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, block: &CandidateBlock) -> bool {
        if block.kind != MODULE_KEYWORD {
            return false;
        }
        // a module call carries exactly one label; anything else is not ours
        match block.labels.as_slice() {
            [name] => *name == self.name,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    resource_type: String,
    name: String,
}

impl ResourceDescriptor {
    #[must_use]
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, block: &CandidateBlock) -> bool {
        if block.kind != RESOURCE_KEYWORD {
            return false;
        }
        match block.labels.as_slice() {
            [resource_type, name] => *resource_type == self.resource_type && *name == self.name,
            _ => false,
        }
    }
}

/// Describes the single top-level block an address points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockDescriptor {
    Module(ModuleDescriptor),
    Resource(ResourceDescriptor),
}

impl BlockDescriptor {
    /// Parses `module.<name>` or `<type>.<name>`.
    ///
    /// Data sources (`data.<type>.<name>`) and nested module paths are rejected
    /// because they have more than two segments.
    pub fn resolve(address: &str) -> Result<Self, AddressError> {
        let parts = address.split('.').collect::<Vec<_>>();
        if parts.len() < 2 {
            return Err(AddressError::TooFewSegments {
                address: address.to_string(),
            });
        }
        if parts.len() > 2 {
            return Err(AddressError::TooManySegments {
                address: address.to_string(),
                segments: parts.len(),
            });
        }
        if parts.iter().any(|part| part.is_empty()) {
            return Err(AddressError::EmptySegment {
                address: address.to_string(),
            });
        }
        let descriptor = match parts[0] {
            MODULE_KEYWORD => Self::Module(ModuleDescriptor::new(parts[1])),
            resource_type => Self::Resource(ResourceDescriptor::new(resource_type, parts[1])),
        };
        Ok(descriptor)
    }

    /// Whether `block` is the block this descriptor names. Label-count
    /// mismatches are a plain `false`.
    #[must_use]
    pub fn matches(&self, block: &CandidateBlock) -> bool {
        match self {
            Self::Module(module) => module.matches(block),
            Self::Resource(resource) => resource.matches(block),
        }
    }

    /// File name a relocated block lands in when only a destination directory is given.
    #[must_use]
    pub fn destination_file_name(&self) -> String {
        match self {
            Self::Module(module) => format!("module_{}.tuf.tf", module.name),
            Self::Resource(_) => RESOURCE_DESTINATION.to_string(),
        }
    }

    #[must_use]
    pub fn address(&self) -> String {
        match self {
            Self::Module(module) => format!("{MODULE_KEYWORD}.{}", module.name),
            Self::Resource(resource) => format!("{}.{}", resource.resource_type, resource.name),
        }
    }
}

impl fmt::Display for BlockDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

impl FromStr for BlockDescriptor {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::block::ByteRange;

    fn block(kind: &str, labels: &[&str]) -> CandidateBlock {
        CandidateBlock {
            kind: kind.to_string(),
            labels: labels.iter().map(|label| (*label).to_string()).collect(),
            range: ByteRange::new(PathBuf::from("main.tf"), 0, 0),
        }
    }

    #[test]
    fn resolves_module_address() {
        let descriptor = BlockDescriptor::resolve("module.foo").unwrap();
        assert_eq!(descriptor, BlockDescriptor::Module(ModuleDescriptor::new("foo")));
    }

    #[test]
    fn resolves_resource_address() {
        let descriptor = BlockDescriptor::resolve("aws_security_group.foo").unwrap();
        assert_eq!(
            descriptor,
            BlockDescriptor::Resource(ResourceDescriptor::new("aws_security_group", "foo"))
        );
    }

    #[test]
    fn rejects_data_source_and_nested_module_addresses() {
        for address in ["data.aws_security_group.foo", "module.toomany.parts"] {
            let err = BlockDescriptor::resolve(address).unwrap_err();
            assert!(
                matches!(err, AddressError::TooManySegments { segments: 3, .. }),
                "unexpected error for {address}: {err:?}"
            );
        }
    }

    #[test]
    fn rejects_short_and_empty_addresses() {
        assert!(matches!(
            BlockDescriptor::resolve("module"),
            Err(AddressError::TooFewSegments { .. })
        ));
        assert!(matches!(
            BlockDescriptor::resolve(""),
            Err(AddressError::TooFewSegments { .. })
        ));
        assert!(matches!(
            BlockDescriptor::resolve("module."),
            Err(AddressError::EmptySegment { .. })
        ));
    }

    #[test]
    fn module_matches_only_single_label_module_blocks() {
        let descriptor = BlockDescriptor::resolve("module.foobar").unwrap();
        assert!(descriptor.matches(&block("module", &["foobar"])));
        assert!(!descriptor.matches(&block("module", &["foobaz"])));
        assert!(!descriptor.matches(&block("module", &["foobar", "extra"])));
        assert!(!descriptor.matches(&block("module", &[])));
        assert!(!descriptor.matches(&block("resource", &["foobar"])));
    }

    #[test]
    fn resource_matches_type_and_name_in_order() {
        let descriptor = BlockDescriptor::resolve("aws_iam_role.eks").unwrap();
        assert!(descriptor.matches(&block("resource", &["aws_iam_role", "eks"])));
        assert!(!descriptor.matches(&block("resource", &["eks", "aws_iam_role"])));
        assert!(!descriptor.matches(&block("resource", &["aws_iam_role"])));
        assert!(!descriptor.matches(&block("resource", &["aws_iam_role", "eks", "x"])));
        assert!(!descriptor.matches(&block("data", &["aws_iam_role", "eks"])));
        assert!(!descriptor.matches(&block("module", &["eks"])));
    }

    #[test]
    fn destination_names_and_addresses_round_trip() {
        let module = BlockDescriptor::resolve("module.vpc").unwrap();
        assert_eq!(module.destination_file_name(), "module_vpc.tuf.tf");
        assert_eq!(module.address(), "module.vpc");

        let resource: BlockDescriptor = "aws_s3_bucket.logs".parse().unwrap();
        assert_eq!(resource.destination_file_name(), "resources.tuf.tf");
        assert_eq!(resource.to_string(), "aws_s3_bucket.logs");
    }
}
