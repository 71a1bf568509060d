use std::fmt;
use std::sync::Arc;

/// A named, typed entity of a diagram (a queue, a function, a bucket, ...).
///
/// Entity identity is the [`Resource::id`]; the display value and type tag are payload.
pub trait Resource: fmt::Debug + Send + Sync {
    fn id(&self) -> &str;
    fn value(&self) -> &str;
    fn resource_type(&self) -> &str;
}

/// Shared handle to a resource. Relationships and style tables point at the same resources the
/// collection holds.
pub type ResourceRef = Arc<dyn Resource>;

impl PartialEq for dyn Resource {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
            && self.value() == other.value()
            && self.resource_type() == other.resource_type()
    }
}

impl Eq for dyn Resource {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericResource {
    id: String,
    value: String,
    resource_type: String,
}

impl GenericResource {
    pub fn new(
        id: impl Into<String>,
        value: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            resource_type: resource_type.into(),
        }
    }

    /// Same as [`GenericResource::new`], already wrapped as a [`ResourceRef`].
    pub fn shared(
        id: impl Into<String>,
        value: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> ResourceRef {
        Arc::new(Self::new(id, value, resource_type))
    }
}

impl Resource for GenericResource {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn resource_type(&self) -> &str {
        &self.resource_type
    }
}

/// A directed association between two resources. Either endpoint may be absent; renderers skip
/// such relationships instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub source: Option<ResourceRef>,
    pub target: Option<ResourceRef>,
}

impl Relationship {
    pub fn new(source: impl Into<Option<ResourceRef>>, target: impl Into<Option<ResourceRef>>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Both endpoints, when present.
    pub fn endpoints(&self) -> Option<(&ResourceRef, &ResourceRef)> {
        match (&self.source, &self.target) {
            (Some(source), Some(target)) => Some((source, target)),
            _ => None,
        }
    }

    pub(crate) fn id_pair(&self) -> (Option<&str>, Option<&str>) {
        (
            self.source.as_deref().map(|r| r.id()),
            self.target.as_deref().map(|r| r.id()),
        )
    }
}

/// All resources and relationships of one diagram.
///
/// Insertion does not validate or deduplicate; orphan relationships are a valid state.
#[derive(Debug, Clone, Default)]
pub struct ResourceCollection {
    pub resources: Vec<ResourceRef>,
    pub relationships: Vec<Relationship>,
}

impl ResourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resource(&mut self, resource: ResourceRef) {
        self.resources.push(resource);
    }

    pub fn add_relationship(
        &mut self,
        source: impl Into<Option<ResourceRef>>,
        target: impl Into<Option<ResourceRef>>,
    ) {
        self.relationships.push(Relationship::new(source, target));
    }

    /// First resource carrying `id`, in insertion order.
    pub fn resource_by_id(&self, id: &str) -> Option<&ResourceRef> {
        self.resources.iter().find(|r| r.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.relationships.is_empty()
    }
}
