//! Redaction synthesis
//!
//! Turns the regions the user accepted from a detection pass, plus any
//! manually drawn redactions, into `Redact` annotations. Redactions are
//! filled regions, not strokes, so thickness is 0.

use std::collections::HashSet;

use tracing::debug;

use scrub_core::{Annotation, Mint, Point, RedactStyle, Shape};
use scrub_detect::PiiRegion;

/// Color recorded on synthesized redactions; the visual treatment comes
/// from the style, the color only marks them in overlays.
pub const REDACTION_COLOR: &str = "#FF0000";

/// Build redaction annotations from accepted detected regions and manual
/// redactions.
///
/// One `Redact` per selected region, in region order, carrying the
/// caller's style and the region's PII type as reason; the manual
/// redactions follow verbatim (they already carry their own style and
/// reason). Selection indices outside the region list are ignored.
pub fn synthesize_redactions(
    regions: &[PiiRegion],
    selected: &HashSet<usize>,
    style: RedactStyle,
    manual: Vec<Annotation>,
    mint: &mut dyn Mint,
) -> Vec<Annotation> {
    let mut redactions: Vec<Annotation> = regions
        .iter()
        .enumerate()
        .filter(|(i, _)| selected.contains(i))
        .map(|(_, region)| {
            Annotation::new(
                mint,
                REDACTION_COLOR,
                0,
                Shape::Redact {
                    origin: Point::new(region.x, region.y),
                    width: region.width,
                    height: region.height,
                    style,
                    reason: region.pii_type.into(),
                },
            )
        })
        .collect();

    debug!(
        detected = redactions.len(),
        manual = manual.len(),
        "synthesized redactions"
    );

    redactions.extend(manual);
    redactions
}
