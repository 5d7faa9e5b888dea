use crate::descriptor::{DescriptorId, ResourceDescriptor, ResourceKind};
use crate::error::LoadError;

/// Outcome of one descriptor dispatched in a batch
#[derive(Clone, Debug)]
pub struct Settlement {
    pub(crate) descriptor: ResourceDescriptor,
    pub(crate) state: SettleState,
}

#[derive(Clone, Debug)]
pub(crate) enum SettleState {
    Loaded,
    Failed(LoadError),
}

impl Settlement {
    pub(crate) fn loaded(descriptor: ResourceDescriptor) -> Self {
        Self {
            descriptor,
            state: SettleState::Loaded,
        }
    }

    pub(crate) fn failed(descriptor: ResourceDescriptor, err: LoadError) -> Self {
        Self {
            descriptor,
            state: SettleState::Failed(err),
        }
    }

    pub fn id(&self) -> DescriptorId {
        self.descriptor.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.descriptor.kind
    }

    /// Name used to store the resource
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// `Ok` when the resource is in the store
    pub fn result(&self) -> Result<(), &LoadError> {
        match &self.state {
            SettleState::Loaded => Ok(()),
            SettleState::Failed(err) => Err(err),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SettleState::Loaded)
    }
}

/// Every settlement of a batch, in completion order
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    settlements: Vec<Settlement>,
}

impl BatchReport {
    pub(crate) fn push(&mut self, settlement: Settlement) {
        self.settlements.push(settlement);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Settlement> {
        self.settlements.iter()
    }

    pub fn get(&self, id: DescriptorId) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.id() == id)
    }

    pub fn loaded(&self) -> impl Iterator<Item = &Settlement> {
        self.settlements.iter().filter(|s| s.is_loaded())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&Settlement, &LoadError)> {
        self.settlements.iter().filter_map(|s| match &s.state {
            SettleState::Failed(err) => Some((s, err)),
            SettleState::Loaded => None,
        })
    }

    pub fn len(&self) -> usize {
        self.settlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// True when nothing failed (an empty batch is a success)
    pub fn is_success(&self) -> bool {
        self.settlements.iter().all(Settlement::is_loaded)
    }

    /// All-or-nothing view of the batch
    pub fn into_result(self) -> Result<Self, LoadError> {
        if self.is_success() {
            return Ok(self);
        }

        let failed = self.failed().map(|(s, _)| s.name().to_string()).collect();
        Err(LoadError::Aggregate {
            failed,
            total: self.len(),
        })
    }
}

impl<'a> IntoIterator for &'a BatchReport {
    type Item = &'a Settlement;
    type IntoIter = std::slice::Iter<'a, Settlement>;

    fn into_iter(self) -> Self::IntoIter {
        self.settlements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(raw: u64, name: &str) -> ResourceDescriptor {
        ResourceDescriptor {
            id: DescriptorId::new(raw),
            kind: ResourceKind::Json,
            name: name.to_string(),
            locator: format!("/{name}.json"),
        }
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = BatchReport::default();
        assert!(report.is_success());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_into_result_aggregates_failures() {
        let mut report = BatchReport::default();
        report.push(Settlement::loaded(descriptor(0, "config")));
        report.push(Settlement::failed(
            descriptor(1, "level"),
            LoadError::fetch("/level.json", "status 404"),
        ));

        assert!(!report.is_success());
        assert_eq!(report.loaded().count(), 1);
        assert_eq!(report.failed().count(), 1);

        match report.into_result() {
            Err(LoadError::Aggregate { failed, total }) => {
                assert_eq!(failed, vec!["level".to_string()]);
                assert_eq!(total, 2);
            }
            other => panic!("expected aggregate error, got {other:?}"),
        }
    }

    #[test]
    fn test_get_by_id() {
        let mut report = BatchReport::default();
        report.push(Settlement::loaded(descriptor(7, "config")));

        let settlement = report.get(DescriptorId::new(7)).unwrap();
        assert_eq!(settlement.name(), "config");
        assert!(settlement.result().is_ok());
        assert!(report.get(DescriptorId::new(8)).is_none());
    }
}
