use carelabel::{
    CareLabelError, ContainerId, ContentBlock, EditSession, EngineError, LabelDocument,
    LayoutConfig, RegionId, SaveOutcome, ShapingMetrics, TextLayoutEngine,
};
use serde::Deserialize;
use std::env;
use std::fs;

/// One save, as the editing dialog would submit it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest {
    container: ContainerId,
    region: RegionId,
    block: ContentBlock,
    /// Commit a keep-flowing split instead of only previewing it.
    #[serde(default)]
    confirm_split: bool,
}

/// A small CLI that applies one block save to a label document.
fn main() -> Result<(), CareLabelError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Applies one content-block save to a care-label document.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/document.json> <path/to/request.json>",
            args[0]
        );
        eprintln!();
        eprintln!("The updated document is printed to stdout.");
        std::process::exit(1);
    }

    let mut document: LabelDocument = serde_json::from_str(&fs::read_to_string(&args[1])?)?;
    let request: SaveRequest = serde_json::from_str(&fs::read_to_string(&args[2])?)?;

    let metrics = font_metrics();
    let engine = TextLayoutEngine::try_new(Some(&metrics), LayoutConfig::default())
        .map_err(EngineError::from)?;
    let mut session = EditSession::new(&mut document, engine);

    let outcome = session.place_block(&request.container, &request.region, request.block)?;
    match outcome {
        SaveOutcome::Saved(report) => {
            eprintln!(
                "Saved {} line(s) at {:.2}px{}",
                report.lines.len(),
                report.font_size_px,
                if report.approximate() { " (approximate)" } else { "" }
            );
            for warning in &report.warnings {
                eprintln!("  warning: {:?}", warning);
            }
        }
        SaveOutcome::PendingSplit(preview) => {
            eprintln!(
                "{} line(s) fit, {} line(s) overflow",
                preview.fitting_lines().len(),
                preview.overflow_lines().len()
            );
            if !request.confirm_split {
                return Err(CareLabelError::Request(
                    "content overflows; resubmit with \"confirmSplit\": true to create an overflow container"
                        .to_string(),
                ));
            }
            let commit = session.confirm_split(preview)?;
            eprintln!("Overflow moved to container {}", commit.overflow_container);
        }
    }

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn font_metrics() -> ShapingMetrics {
    let metrics = ShapingMetrics::new();
    #[cfg(feature = "system-fonts")]
    let metrics = metrics.with_system_fonts(true);
    metrics
}
