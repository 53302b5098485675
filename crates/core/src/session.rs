//! The explicit context one editing dialog saves through.
//!
//! A save runs validate → space budget → wrap → resolve → overflow strategy, in
//! that order. Keep-flowing saves stop before anything is written and hand back
//! a [`SplitPreview`]; only [`EditSession::confirm_split`] commits it.

use crate::error::EngineError;
use crate::migrator::ContainerMigrator;
use carelabel_document::{Container, ContentBlock, LabelDocument};
use carelabel_layout::{BlockText, RegionSpaceLedger, SpaceReport, TextLayoutEngine};
use carelabel_style::OverflowOption;
use carelabel_types::{BlockId, ContainerId, RegionId};

/// Non-blocking notes attached to a committed save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveWarning {
    /// Overflowing lines were dropped.
    Truncated { discarded_lines: usize },
    /// Shrinking reached the minimum font size; the rest was dropped.
    ShrinkFloor {
        font_size_px: f64,
        discarded_lines: usize,
    },
    /// A single-line block is wider than its content area.
    WidthOverflow,
    /// Widths were estimated because no metrics were available.
    Approximate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub block: BlockId,
    /// The lines stored with the block.
    pub lines: Vec<String>,
    pub font_size_px: f64,
    pub shrunk: bool,
    /// Region usage before this block was placed.
    pub space: SpaceReport,
    pub warnings: Vec<SaveWarning>,
}

impl SaveReport {
    pub fn approximate(&self) -> bool {
        self.warnings.contains(&SaveWarning::Approximate)
    }
}

/// A keep-flowing save waiting for confirmation.
///
/// Confirming consumes the preview, so one overflow event can create at most
/// one container. Dropping it cancels the save.
#[must_use = "dropping a split preview cancels the save"]
#[derive(Debug, PartialEq)]
pub struct SplitPreview {
    container: ContainerId,
    region: RegionId,
    block: ContentBlock,
    fitting_lines: Vec<String>,
    overflow_lines: Vec<String>,
    approximate: bool,
    space: SpaceReport,
}

impl SplitPreview {
    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block.id
    }

    pub fn fitting_lines(&self) -> &[String] {
        &self.fitting_lines
    }

    pub fn overflow_lines(&self) -> &[String] {
        &self.overflow_lines
    }

    pub fn fitting_text(&self) -> String {
        self.block.line_break.symbol.join(&self.fitting_lines)
    }

    pub fn overflow_text(&self) -> String {
        self.block.line_break.symbol.join(&self.overflow_lines)
    }

    pub fn approximate(&self) -> bool {
        self.approximate
    }

    pub fn space(&self) -> &SpaceReport {
        &self.space
    }
}

#[derive(Debug)]
pub enum SaveOutcome {
    Saved(SaveReport),
    PendingSplit(SplitPreview),
}

impl SaveOutcome {
    pub fn report(&self) -> Option<&SaveReport> {
        match self {
            SaveOutcome::Saved(report) => Some(report),
            SaveOutcome::PendingSplit(_) => None,
        }
    }

    pub fn into_preview(self) -> Option<SplitPreview> {
        match self {
            SaveOutcome::Saved(_) => None,
            SaveOutcome::PendingSplit(preview) => Some(preview),
        }
    }
}

/// What a confirmed split wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCommit {
    pub block: BlockId,
    pub overflow_container: ContainerId,
    pub fitting_lines: usize,
    pub overflow_lines: usize,
}

pub struct EditSession<'d, 'p> {
    document: &'d mut LabelDocument,
    engine: TextLayoutEngine<'p>,
}

impl<'d, 'p> EditSession<'d, 'p> {
    pub fn new(document: &'d mut LabelDocument, engine: TextLayoutEngine<'p>) -> Self {
        Self { document, engine }
    }

    pub fn document(&self) -> &LabelDocument {
        self.document
    }

    pub fn engine(&self) -> &TextLayoutEngine<'p> {
        &self.engine
    }

    /// Lays `block` out as it would be saved, without writing anything.
    pub fn preview(
        &self,
        container: &ContainerId,
        region: &RegionId,
        block: &ContentBlock,
    ) -> Result<BlockText, EngineError> {
        block.validate()?;
        let target = self.document.region(container, region)?;
        Ok(self.engine.layout_block(block, target.size()))
    }

    pub fn space_report(
        &self,
        container: &ContainerId,
        region: &RegionId,
    ) -> Result<SpaceReport, EngineError> {
        let target = self.document.region(container, region)?;
        Ok(RegionSpaceLedger::for_region(target, None).remaining())
    }

    /// Saves `block` into a region, replacing a block with the same id.
    pub fn place_block(
        &mut self,
        container: &ContainerId,
        region: &RegionId,
        mut block: ContentBlock,
    ) -> Result<SaveOutcome, EngineError> {
        block.validate()?;
        let (region_size, space) = {
            let target = self.document.region(container, region)?;
            let space =
                RegionSpaceLedger::for_region(target, Some(&block.id)).check(&block.layout)?;
            (target.size(), space)
        };

        let text = self.engine.layout_block(&block, region_size);
        let mut warnings = Vec::new();
        if text.width_overflow {
            warnings.push(SaveWarning::WidthOverflow);
        }
        let symbol = block.line_break.symbol.clone();
        let mut approximate = text.approximate();
        let mut shrunk = false;

        if !text.split.has_overflow {
            block.content.set_lines(text.wrap.lines);
        } else {
            match effective_overflow(&block) {
                OverflowOption::Truncate => {
                    let discarded_lines = text.split.overflow_lines.len();
                    log::warn!(
                        "Block {} overflows; discarding {} line(s)",
                        block.id,
                        discarded_lines
                    );
                    warnings.push(SaveWarning::Truncated { discarded_lines });
                    block.content.retain_lines(text.split.fitting_lines, &symbol);
                }
                OverflowOption::Shrink => {
                    let outcome = self.engine.shrink_to_fit(&block, region_size);
                    approximate |= outcome.wrap.approximate;
                    shrunk = outcome.attempts > 1;
                    block.typography = outcome.typography;
                    if outcome.hit_floor {
                        warnings.push(SaveWarning::ShrinkFloor {
                            font_size_px: block.typography.font_size_px(),
                            discarded_lines: outcome.split.overflow_lines.len(),
                        });
                        block
                            .content
                            .retain_lines(outcome.split.fitting_lines, &symbol);
                    } else {
                        block.content.set_lines(outcome.wrap.lines);
                    }
                }
                OverflowOption::KeepFlowing => {
                    log::debug!(
                        "Block {} overflows by {} line(s); awaiting split confirmation",
                        block.id,
                        text.split.overflow_lines.len()
                    );
                    block
                        .content
                        .retain_lines(text.split.fitting_lines.clone(), &symbol);
                    return Ok(SaveOutcome::PendingSplit(SplitPreview {
                        container: container.clone(),
                        region: region.clone(),
                        block,
                        fitting_lines: text.split.fitting_lines,
                        overflow_lines: text.split.overflow_lines,
                        approximate,
                        space,
                    }));
                }
            }
        }

        if approximate {
            warnings.push(SaveWarning::Approximate);
        }
        let report = SaveReport {
            block: block.id.clone(),
            lines: block.content.lines().to_vec(),
            font_size_px: block.typography.font_size_px(),
            shrunk,
            space,
            warnings,
        };
        self.document.region_mut(container, region)?.upsert(block);
        log::info!(
            "Saved block {} with {} line(s) into region {}",
            report.block,
            report.lines.len(),
            region
        );
        Ok(SaveOutcome::Saved(report))
    }

    /// Commits a keep-flowing save: the fitting lines stay in the source block
    /// and the overflow moves into a new container beside it.
    ///
    /// Nothing is written unless both writes can happen.
    pub fn confirm_split(&mut self, preview: SplitPreview) -> Result<SplitCommit, EngineError> {
        let SplitPreview {
            container,
            region,
            block,
            fitting_lines,
            overflow_lines,
            ..
        } = preview;

        let migrator = ContainerMigrator::new(self.engine.config().duplicate_gap_mm);
        let overflow_count = overflow_lines.len();
        let overflow = migrator.migrate(self.document, &container, &region, overflow_lines, &block)?;

        // The region may have changed since the preview was taken.
        let target = self.document.region(&container, &region)?;
        RegionSpaceLedger::for_region(target, Some(&block.id)).check(&block.layout)?;

        let block_id = block.id.clone();
        self.document.region_mut(&container, &region)?.upsert(block);
        let overflow_container = self.document.add_container(overflow);

        Ok(SplitCommit {
            block: block_id,
            overflow_container,
            fitting_lines: fitting_lines.len(),
            overflow_lines: overflow_count,
        })
    }

    /// Removes every container migrated out of `source`, e.g. before re-flowing it.
    pub fn discard_overflow_children(&mut self, source: &ContainerId) -> Vec<Container> {
        let ids: Vec<ContainerId> = self
            .document
            .overflow_children(source)
            .iter()
            .map(|c| c.id.clone())
            .collect();
        let removed: Vec<Container> = ids
            .iter()
            .filter_map(|id| self.document.remove_container(id).ok())
            .collect();
        if !removed.is_empty() {
            log::info!(
                "Discarded {} overflow container(s) of {}",
                removed.len(),
                source
            );
        }
        removed
    }

    pub fn duplicate_container(&mut self, id: &ContainerId) -> Result<ContainerId, EngineError> {
        let gap = self.engine.config().duplicate_gap_mm;
        Ok(self.document.duplicate_container(id, gap)?)
    }

    pub fn remove_container(&mut self, id: &ContainerId) -> Result<Container, EngineError> {
        Ok(self.document.remove_container(id)?)
    }

    pub fn remove_block(
        &mut self,
        container: &ContainerId,
        region: &RegionId,
        block: &BlockId,
    ) -> Result<ContentBlock, EngineError> {
        Ok(self
            .document
            .region_mut(container, region)?
            .remove_block(block)?)
    }
}

/// Pre-wrapped continuations are never split again: a migrated block that
/// still overflows is truncated.
fn effective_overflow(block: &ContentBlock) -> OverflowOption {
    match block.overflow_option {
        OverflowOption::KeepFlowing if block.content.is_pre_wrapped() => {
            log::debug!("Block {} is a continuation; truncating instead of splitting", block.id);
            OverflowOption::Truncate
        }
        option => option,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelabel_document::{BlockLayout, Region};
    use carelabel_layout::LayoutConfig;
    use carelabel_style::{FontSizeUnit, Length, Padding, Typography};
    use carelabel_traits::FixedAdvanceMetrics;
    use carelabel_types::{Rect, units::px_to_mm};

    /// One container with a 100mm wide region three 12px lines tall.
    fn document() -> (LabelDocument, ContainerId, RegionId) {
        let region = Region::new("body", Rect::new(0.0, 0.0, 100.0, px_to_mm(36.0)));
        let region_id = region.id.clone();
        let mut document = LabelDocument::new();
        let container = document.add_container(
            Container::new("Mother_1", Rect::new(0.0, 0.0, 100.0, 40.0)).with_region(region),
        );
        (document, container, region_id)
    }

    fn block(text: &str, option: OverflowOption) -> ContentBlock {
        ContentBlock::multi_line(text)
            .with_layout(BlockLayout::default().with_padding(Padding::zero()))
            .with_typography(Typography::new("Arial", 10.0, FontSizeUnit::Px))
            .with_overflow(option)
    }

    #[test]
    fn test_fitting_block_is_committed_with_lines() {
        let (mut doc, container, region) = document();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        let outcome = session
            .place_block(&container, &region, block("a\nb", OverflowOption::Truncate))
            .unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.lines, vec!["a", "b"]);
        assert!(report.warnings.is_empty());
        assert_eq!(doc.region(&container, &region).unwrap().blocks.len(), 1);
    }

    #[test]
    fn test_truncate_discards_overflow() {
        let (mut doc, container, region) = document();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        let outcome = session
            .place_block(&container, &region, block("1\n2\n3\n4\n5", OverflowOption::Truncate))
            .unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.lines, vec!["1", "2", "3"]);
        assert_eq!(
            report.warnings,
            vec![SaveWarning::Truncated { discarded_lines: 2 }]
        );
        let stored = &doc.region(&container, &region).unwrap().blocks[0];
        assert_eq!(stored.source_text(), "1\n2\n3");
    }

    #[test]
    fn test_dropping_preview_commits_nothing() {
        let (mut doc, container, region) = document();
        let before = doc.clone();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        let outcome = session
            .place_block(&container, &region, block("1\n2\n3\n4\n5", OverflowOption::KeepFlowing))
            .unwrap();
        let preview = outcome.into_preview().unwrap();
        assert_eq!(preview.fitting_text(), "1\n2\n3");
        assert_eq!(preview.overflow_text(), "4\n5");
        drop(preview);

        assert_eq!(doc, before);
    }

    #[test]
    fn test_confirm_split_writes_both_containers() {
        let (mut doc, container, region) = document();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        let preview = session
            .place_block(&container, &region, block("1\n2\n3\n4\n5", OverflowOption::KeepFlowing))
            .unwrap()
            .into_preview()
            .unwrap();
        let commit = session.confirm_split(preview).unwrap();
        assert_eq!(commit.fitting_lines, 3);
        assert_eq!(commit.overflow_lines, 2);

        let overflow = doc.container(&commit.overflow_container).unwrap();
        assert_eq!(overflow.name, "Mother_2");
        assert_eq!(overflow.regions[0].blocks[0].source_text(), "4\n5");
        assert!(overflow.regions[0].blocks[0].content.is_pre_wrapped());
        let source = &doc.region(&container, &region).unwrap().blocks[0];
        assert_eq!(source.content.lines(), ["1", "2", "3"]);
    }

    #[test]
    fn test_confirm_after_source_deleted_fails_cleanly() {
        let (mut doc, container, region) = document();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        let preview = session
            .place_block(&container, &region, block("1\n2\n3\n4\n5", OverflowOption::KeepFlowing))
            .unwrap()
            .into_preview()
            .unwrap();
        session.remove_container(&container).unwrap();
        let err = session.confirm_split(preview).unwrap_err();
        assert!(matches!(err, EngineError::MigrationSourceMissing(_)));
        assert!(doc.containers.is_empty());
    }

    #[test]
    fn test_confirm_rechecks_region_space() {
        let (mut doc, container, region) = document();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        let flowing = block("1\n2\n3\n4\n5", OverflowOption::KeepFlowing)
            .with_layout(BlockLayout::sized(Length::percent(60.0), Length::percent(100.0)));
        let preview = session
            .place_block(&container, &region, flowing)
            .unwrap()
            .into_preview()
            .unwrap();
        let other = block("x", OverflowOption::Truncate)
            .with_layout(BlockLayout::sized(Length::percent(50.0), Length::percent(100.0)));
        session.place_block(&container, &region, other).unwrap();
        let before = session.document().clone();

        let err = session.confirm_split(preview).unwrap_err();
        assert!(matches!(
            err,
            EngineError::OverBudget { remaining_percent, requested_percent }
                if remaining_percent == 50.0 && requested_percent == 60.0
        ));
        assert_eq!(doc, before);
        let used = RegionSpaceLedger::for_region(doc.region(&container, &region).unwrap(), None)
            .remaining()
            .used_percent;
        assert_eq!(used, 50.0);
    }

    #[test]
    fn test_continuation_is_not_split_again() {
        let (mut doc, container, region) = document();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        let preview = session
            .place_block(&container, &region, block("1\n2\n3\n4\n5\n6\n7", OverflowOption::KeepFlowing))
            .unwrap()
            .into_preview()
            .unwrap();
        let commit = session.confirm_split(preview).unwrap();

        let overflow = session.document().container(&commit.overflow_container).unwrap();
        let overflow_region = overflow.regions[0].id.clone();
        let continuation = overflow.regions[0].blocks[0].clone();
        assert_eq!(continuation.overflow_option, OverflowOption::KeepFlowing);

        let outcome = session
            .place_block(&commit.overflow_container, &overflow_region, continuation)
            .unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.lines, vec!["4", "5", "6"]);
        assert!(report.warnings.contains(&SaveWarning::Truncated { discarded_lines: 1 }));
        assert_eq!(doc.containers.len(), 2);
    }

    #[test]
    fn test_shrink_fits_by_reducing_font_size() {
        let (mut doc, container, region) = document();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        let outcome = session
            .place_block(&container, &region, block("1\n2\n3\n4", OverflowOption::Shrink))
            .unwrap();
        let report = outcome.report().unwrap();
        assert!(report.shrunk);
        assert_eq!(report.lines.len(), 4);
        // Four lines at 1.2 spacing fit 36px at 7.5px or less.
        assert!(report.font_size_px <= 7.5 + 1e-9);
    }

    #[test]
    fn test_over_budget_block_is_rejected() {
        let (mut doc, container, region) = document();
        let metrics = FixedAdvanceMetrics::new(0.5);
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::new(&metrics, LayoutConfig::exact()));

        session
            .place_block(&container, &region, block("full", OverflowOption::Truncate))
            .unwrap();
        let half = block("half", OverflowOption::Truncate)
            .with_layout(BlockLayout::sized(Length::percent(50.0), Length::percent(100.0)));
        let err = session.place_block(&container, &region, half).unwrap_err();
        assert!(matches!(
            err,
            EngineError::OverBudget { remaining_percent, requested_percent }
                if remaining_percent == 0.0 && requested_percent == 50.0
        ));
        assert_eq!(doc.region(&container, &region).unwrap().blocks.len(), 1);
    }

    #[test]
    fn test_invalid_configuration_is_rejected_before_layout() {
        let (mut doc, container, region) = document();
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::estimating(LayoutConfig::default()));
        let bad = block("x", OverflowOption::Truncate)
            .with_typography(Typography::new("Arial", 0.0, FontSizeUnit::Pt));
        assert!(matches!(
            session.place_block(&container, &region, bad),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_estimated_widths_are_flagged() {
        let (mut doc, container, region) = document();
        let mut session = EditSession::new(&mut doc, TextLayoutEngine::estimating(LayoutConfig::default()));
        let outcome = session
            .place_block(&container, &region, block("care text", OverflowOption::Truncate))
            .unwrap();
        assert!(outcome.report().unwrap().approximate());
    }
}
