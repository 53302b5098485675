use crate::LayoutError;
use carelabel_document::{BlockLayout, ContentBlock, Region};
use carelabel_types::{BlockId, Size, units::round6};

/// Area accounting for one region, in mm².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceReport {
    pub region_area_mm2: f64,
    pub used_area_mm2: f64,
    pub remaining_area_mm2: f64,
    pub used_percent: f64,
    pub remaining_percent: f64,
}

/// Tracks how much of a region its blocks already cover.
///
/// Every area is rounded to 6 decimals before it is summed or compared, and a
/// placement that brings usage to exactly 100% is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSpaceLedger {
    region: Size,
    used_area_mm2: f64,
}

impl RegionSpaceLedger {
    pub fn new<'a>(region: Size, blocks: impl IntoIterator<Item = &'a ContentBlock>) -> Self {
        let used_area_mm2 = blocks
            .into_iter()
            .map(|b| block_area(&b.layout, region))
            .fold(0.0, |acc, area| round6(acc + area));
        Self {
            region,
            used_area_mm2,
        }
    }

    /// A ledger over the blocks of `region`, leaving out the block being replaced.
    pub fn for_region(region: &Region, replacing: Option<&BlockId>) -> Self {
        Self::new(
            region.size(),
            region
                .blocks
                .iter()
                .filter(|b| Some(&b.id) != replacing),
        )
    }

    pub fn remaining(&self) -> SpaceReport {
        let region_area_mm2 = round6(self.region.area());
        let remaining_area_mm2 = round6(region_area_mm2 - self.used_area_mm2);
        SpaceReport {
            region_area_mm2,
            used_area_mm2: self.used_area_mm2,
            remaining_area_mm2,
            used_percent: self.percent_of_region(self.used_area_mm2),
            remaining_percent: self.percent_of_region(remaining_area_mm2),
        }
    }

    pub fn would_fit(&self, width_mm: f64, height_mm: f64) -> bool {
        let proposed = round6(width_mm * height_mm);
        round6(self.used_area_mm2 + proposed) <= round6(self.region.area())
    }

    pub fn would_fit_block(&self, layout: &BlockLayout) -> bool {
        let size = layout.resolve_size(self.region);
        self.would_fit(size.width, size.height)
    }

    /// Accepts `layout` or reports how much space it wanted against what is left.
    pub fn check(&self, layout: &BlockLayout) -> Result<SpaceReport, LayoutError> {
        let report = self.remaining();
        if self.would_fit_block(layout) {
            return Ok(report);
        }
        let requested_percent = self.percent_of_region(block_area(layout, self.region));
        log::warn!(
            "Block needs {:.2}% of region, {:.2}% remains",
            requested_percent,
            report.remaining_percent
        );
        Err(LayoutError::OverBudget {
            remaining_percent: report.remaining_percent,
            requested_percent,
        })
    }

    fn percent_of_region(&self, area_mm2: f64) -> f64 {
        let region_area = round6(self.region.area());
        if region_area <= 0.0 {
            return 0.0;
        }
        round6(area_mm2 / region_area * 100.0)
    }
}

fn block_area(layout: &BlockLayout, region: Size) -> f64 {
    round6(layout.resolve_size(region).area())
}
