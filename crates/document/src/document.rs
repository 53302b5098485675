use crate::DocumentError;
use crate::container::{Container, Region};
use carelabel_types::{ContainerId, RegionId};
use serde::{Deserialize, Serialize};

/// Horizontal spacing (mm) between a container and a copy placed beside it.
/// Manual duplication and overflow migration both use it, so their results line up.
pub const DUPLICATE_GAP_MM: f64 = 10.0;

/// The container graph of one label design.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelDocument {
    pub containers: Vec<Container>,
}

impl LabelDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&mut self, container: Container) -> ContainerId {
        let id = container.id.clone();
        self.containers.push(container);
        id
    }

    pub fn container(&self, id: &ContainerId) -> Result<&Container, DocumentError> {
        self.containers
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| DocumentError::ContainerNotFound(id.clone()))
    }

    pub fn container_mut(&mut self, id: &ContainerId) -> Result<&mut Container, DocumentError> {
        self.containers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| DocumentError::ContainerNotFound(id.clone()))
    }

    pub fn region(&self, container: &ContainerId, region: &RegionId) -> Result<&Region, DocumentError> {
        self.container(container)?.region(region)
    }

    pub fn region_mut(
        &mut self,
        container: &ContainerId,
        region: &RegionId,
    ) -> Result<&mut Region, DocumentError> {
        self.container_mut(container)?.region_mut(region)
    }

    pub fn remove_container(&mut self, id: &ContainerId) -> Result<Container, DocumentError> {
        let index = self
            .containers
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| DocumentError::ContainerNotFound(id.clone()))?;
        Ok(self.containers.remove(index))
    }

    /// Containers created by migrating overflow out of `source`.
    pub fn overflow_children(&self, source: &ContainerId) -> Vec<&Container> {
        self.containers
            .iter()
            .filter(|c| c.provenance.as_ref().is_some_and(|p| &p.source == source))
            .collect()
    }

    /// The name for the next copy of a container called `name`.
    ///
    /// `Mother_3` continues at `Mother_4`, skipping any index already used by
    /// another container. A name without a numeric suffix counts as index 1,
    /// as does one whose suffix is already the largest index.
    pub fn next_name(&self, name: &str) -> String {
        let (base, first) = match split_name(name) {
            (base, Some(index)) => match index.checked_add(1) {
                Some(next) => (base, next),
                None => (name, 2),
            },
            (base, None) => (base, 2),
        };
        (first..=u32::MAX)
            .map(|candidate| format!("{}_{}", base, candidate))
            .find(|proposed| !self.containers.iter().any(|c| &c.name == proposed))
            .unwrap_or_else(|| format!("{}_copy", name))
    }

    /// Places a copy of `id` beside it, the manual counterpart of migration.
    pub fn duplicate_container(&mut self, id: &ContainerId, gap: f64) -> Result<ContainerId, DocumentError> {
        let source = self.container(id)?;
        let name = self.next_name(&source.name);
        let copy = source.clone_fresh(name, gap);
        log::info!("Duplicated container '{}' as '{}'", source.name, copy.name);
        Ok(self.add_container(copy))
    }
}

/// Splits `Mother_12` into `("Mother", Some(12))`.
fn split_name(name: &str) -> (&str, Option<u32>) {
    match name.rsplit_once('_') {
        Some((base, suffix))
            if !base.is_empty()
                && !suffix.is_empty()
                && suffix.chars().all(|c| c.is_ascii_digit()) =>
        {
            match suffix.parse::<u32>() {
                Ok(index) => (base, Some(index)),
                Err(_) => (name, None),
            }
        }
        _ => (name, None),
    }
}
