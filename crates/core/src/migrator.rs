use carelabel_document::{
    Container, ContentBlock, DUPLICATE_GAP_MM, DocumentError, LabelDocument, Provenance,
};
use carelabel_types::{ContainerId, RegionId};
use chrono::Utc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrationError {
    #[error("Source container '{0}' not found.")]
    SourceMissing(ContainerId),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Moves overflow lines into a copy of their container.
///
/// The copy keeps every region of the source (with fresh ids) and is placed
/// beside it, `gap_mm` to the right. The region that hosted the overflowing
/// block receives a single pre-wrapped continuation of that block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerMigrator {
    gap_mm: f64,
}

impl Default for ContainerMigrator {
    fn default() -> Self {
        Self::new(DUPLICATE_GAP_MM)
    }
}

impl ContainerMigrator {
    pub fn new(gap_mm: f64) -> Self {
        Self { gap_mm }
    }

    /// Builds the overflow container without adding it to `document`.
    ///
    /// `template` supplies the configuration of the continuation block; its id
    /// is recorded as the provenance block.
    pub fn migrate(
        &self,
        document: &LabelDocument,
        source: &ContainerId,
        region: &RegionId,
        overflow_lines: Vec<String>,
        template: &ContentBlock,
    ) -> Result<Container, MigrationError> {
        let source_container = document
            .container(source)
            .map_err(|_| MigrationError::SourceMissing(source.clone()))?;
        let region_index = source_container.region_index(region)?;

        let name = document.next_name(&source_container.name);
        let mut copy = source_container.clone_fresh(name, self.gap_mm);
        if let Some(target) = copy.regions.get_mut(region_index) {
            target.blocks = vec![template.continuation(overflow_lines)];
        }
        copy.provenance = Some(Provenance {
            source: source.clone(),
            region: region.clone(),
            block: template.id.clone(),
            created_at: Utc::now(),
        });

        log::info!(
            "Migrating overflow of '{}' into '{}' at x={:.2}mm",
            source_container.name,
            copy.name,
            copy.bounds.x
        );
        Ok(copy)
    }

    /// Builds the overflow container and appends it to `document`.
    pub fn migrate_into(
        &self,
        document: &mut LabelDocument,
        source: &ContainerId,
        region: &RegionId,
        overflow_lines: Vec<String>,
        template: &ContentBlock,
    ) -> Result<ContainerId, MigrationError> {
        let container = self.migrate(document, source, region, overflow_lines, template)?;
        Ok(document.add_container(container))
    }
}
