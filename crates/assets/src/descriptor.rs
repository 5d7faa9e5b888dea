use std::fmt;

/// Stable identity of a registered descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u64);

impl DescriptorId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Json,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A named reference to a resource location queued for loading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub(crate) id: DescriptorId,
    pub(crate) kind: ResourceKind,
    pub(crate) name: String,
    pub(crate) locator: String,
}

impl ResourceDescriptor {
    pub fn id(&self) -> DescriptorId {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Key used to store the resource once loaded
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Url or path as registered
    pub fn locator(&self) -> &str {
        &self.locator
    }
}
