//! Persisted JSON shape of content blocks.

use crate::error::EngineError;
use carelabel_document::{BlockLayout, Container, ContentBlock, ContentKind, MaterialShare};
use carelabel_style::{LineBreakConfig, OverflowOption, Typography};
use carelabel_traits::DocumentStore;
use carelabel_types::{BlockId, ContainerId, RegionId};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// One block as the surrounding application stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBlock {
    pub container_id: ContainerId,
    pub region_id: RegionId,
    pub block_id: BlockId,
    #[serde(rename = "type")]
    pub content_type: String,
    pub layout: BlockLayout,
    pub typography: Typography,
    pub line_break: LineBreakConfig,
    pub overflow_option: OverflowOption,
    pub text: String,
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_pre_wrapped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<MaterialShare>>,
}

impl PersistedBlock {
    pub fn new(container: &ContainerId, region: &RegionId, block: &ContentBlock) -> Self {
        let materials = match &block.content {
            ContentKind::Composition(c) => Some(c.materials.clone()),
            ContentKind::SingleLine(_) | ContentKind::MultiLine(_) => None,
        };
        Self {
            container_id: container.clone(),
            region_id: region.clone(),
            block_id: block.id.clone(),
            content_type: block.content.kind().to_string(),
            layout: block.layout.clone(),
            typography: block.typography.clone(),
            line_break: block.line_break.clone(),
            overflow_option: block.overflow_option,
            text: block.source_text(),
            lines: block.content.lines().to_vec(),
            is_pre_wrapped: block.content.is_pre_wrapped(),
            materials,
        }
    }
}

/// `"{containerId}/{regionId}/{blockId}"`.
pub fn store_key(container: &ContainerId, region: &RegionId, block: &BlockId) -> String {
    format!("{}/{}/{}", container, region, block)
}

/// Replaces everything stored for `container` with its current blocks and
/// returns how many were written.
pub fn persist_container(
    store: &dyn DocumentStore,
    container: &Container,
) -> Result<usize, EngineError> {
    let removed = store.remove_prefix(&format!("{}/", container.id))?;
    let mut written = 0;
    for region in &container.regions {
        for block in &region.blocks {
            let record = PersistedBlock::new(&container.id, &region.id, block);
            let key = store_key(&container.id, &region.id, &block.id);
            store.put(&key, serde_json::to_vec(&record)?)?;
            written += 1;
        }
    }
    log::info!(
        "Persisted {} block(s) of '{}' to {} (replaced {})",
        written,
        container.name,
        store.name(),
        removed
    );
    Ok(written)
}
