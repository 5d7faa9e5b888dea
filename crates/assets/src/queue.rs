use crate::descriptor::{DescriptorId, ResourceDescriptor, ResourceKind};
use indexmap::IndexMap;

/// Descriptors waiting to be loaded, kept in registration order per kind
#[derive(Default, Debug)]
pub struct PendingQueue {
    next_id: u64,
    images: IndexMap<DescriptorId, ResourceDescriptor>,
    jsons: IndexMap<DescriptorId, ResourceDescriptor>,
}

impl PendingQueue {
    pub(crate) fn push(&mut self, kind: ResourceKind, name: &str, locator: &str) -> DescriptorId {
        let id = DescriptorId::new(self.next_id);
        self.next_id += 1;

        let descriptor = ResourceDescriptor {
            id,
            kind,
            name: name.to_string(),
            locator: locator.to_string(),
        };

        self.queue_mut(kind).insert(id, descriptor);
        id
    }

    /// Removes a descriptor by identity, keeping the order of the rest
    pub(crate) fn remove(
        &mut self,
        kind: ResourceKind,
        id: DescriptorId,
    ) -> Option<ResourceDescriptor> {
        self.queue_mut(kind).shift_remove(&id)
    }

    /// Copy of every pending descriptor, images first
    pub(crate) fn snapshot(&self) -> Vec<ResourceDescriptor> {
        self.images
            .values()
            .chain(self.jsons.values())
            .cloned()
            .collect()
    }

    pub fn images(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.images.values()
    }

    pub fn jsons(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.jsons.values()
    }

    pub fn contains(&self, id: DescriptorId) -> bool {
        self.images.contains_key(&id) || self.jsons.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.jsons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn queue_mut(
        &mut self,
        kind: ResourceKind,
    ) -> &mut IndexMap<DescriptorId, ResourceDescriptor> {
        match kind {
            ResourceKind::Image => &mut self.images,
            ResourceKind::Json => &mut self.jsons,
        }
    }
}
