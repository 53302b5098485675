use crate::DocumentError;
use crate::block::ContentBlock;
use carelabel_types::{BlockId, ContainerId, Rect, RegionId, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named rectangular sub-area of a container, positioned relative to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    #[serde(flatten)]
    pub bounds: Rect,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

impl Region {
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: RegionId::generate(),
            name: name.into(),
            bounds,
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: ContentBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    pub fn block(&self, id: &BlockId) -> Result<&ContentBlock, DocumentError> {
        self.blocks
            .iter()
            .find(|b| &b.id == id)
            .ok_or_else(|| DocumentError::BlockNotFound {
                region: self.id.clone(),
                block: id.clone(),
            })
    }

    /// Inserts `block`, replacing a block with the same id in place.
    pub fn upsert(&mut self, block: ContentBlock) {
        match self.blocks.iter_mut().find(|b| b.id == block.id) {
            Some(existing) => *existing = block,
            None => self.blocks.push(block),
        }
    }

    pub fn remove_block(&mut self, id: &BlockId) -> Result<ContentBlock, DocumentError> {
        let index = self
            .blocks
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| DocumentError::BlockNotFound {
                region: self.id.clone(),
                block: id.clone(),
            })?;
        Ok(self.blocks.remove(index))
    }

    /// Deep copy with fresh region and block ids.
    fn clone_fresh(&self) -> Region {
        Region {
            id: RegionId::generate(),
            blocks: self
                .blocks
                .iter()
                .map(|b| ContentBlock {
                    id: BlockId::generate(),
                    ..b.clone()
                })
                .collect(),
            ..self.clone()
        }
    }
}

/// Where a migrated container's content came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub source: ContainerId,
    pub region: RegionId,
    pub block: BlockId,
    pub created_at: DateTime<Utc>,
}

/// A top-level layout unit ("mother") in millimeters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: ContainerId,
    pub name: String,
    #[serde(flatten)]
    pub bounds: Rect,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl Container {
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: ContainerId::generate(),
            name: name.into(),
            bounds,
            regions: Vec::new(),
            provenance: None,
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    pub fn region(&self, id: &RegionId) -> Result<&Region, DocumentError> {
        self.regions
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| self.region_not_found(id))
    }

    pub fn region_mut(&mut self, id: &RegionId) -> Result<&mut Region, DocumentError> {
        let missing = self.region_not_found(id);
        self.regions
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or(missing)
    }

    pub fn region_index(&self, id: &RegionId) -> Result<usize, DocumentError> {
        self.regions
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| self.region_not_found(id))
    }

    fn region_not_found(&self, id: &RegionId) -> DocumentError {
        DocumentError::RegionNotFound {
            container: self.id.clone(),
            region: id.clone(),
        }
    }

    /// Deep copy under a new id and name, placed `gap` mm to the right.
    ///
    /// Regions and blocks keep their order and receive fresh ids; provenance is
    /// not inherited.
    pub fn clone_fresh(&self, name: String, gap: f64) -> Container {
        Container {
            id: ContainerId::generate(),
            name,
            bounds: self.bounds.beside(gap),
            regions: self.regions.iter().map(Region::clone_fresh).collect(),
            provenance: None,
        }
    }
}
