//! Screenshot embedding and figure numbering.
//!
//! Decoding and re-encoding is independent per shot and runs on the rayon
//! pool when the `rayon-executor` feature is on. Registration with the PDF
//! and figure numbering are sequential, in shot order, so numbers are
//! `1..=K` for the `K` shots that made it.

use crate::options::ShotRecord;
use crate::warnings::Warnings;
use log::{debug, info};
use shotdoc_render_lopdf::{ImageHandle, PdfDocument};
use shotdoc_resource::{PreparedImage, RasterOptions, ResourceError, load_data_url};
use shotdoc_types::{FigureNumber, ShotId, Size};
use std::collections::{HashMap, HashSet};

#[cfg(feature = "rayon-executor")]
use rayon::prelude::*;

/// Screenshots are assumed to be captured at 96 pixels per inch.
const POINTS_PER_PIXEL: f32 = 72.0 / 96.0;

/// A screenshot registered with the document.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedShot {
    pub source_shot_id: ShotId,
    pub image: ImageHandle,
    /// Size in points at 1:1.
    pub intrinsic: Size,
    pub label: Option<String>,
    pub caption: Option<String>,
    pub timecode: Option<String>,
    pub figure: FigureNumber,
}

impl EmbeddedShot {
    /// The first caption line, e.g. `Figure 2: Settings page (00:42)`.
    pub fn caption_title(&self) -> String {
        let mut title = format!("Figure {}", self.figure);
        if let Some(label) = &self.label {
            title.push_str(": ");
            title.push_str(label);
        }
        if let Some(timecode) = &self.timecode {
            title.push_str(&format!(" ({})", timecode));
        }
        title
    }
}

/// Embedded screenshots, looked up by id or walked in figure order.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedShots {
    shots: Vec<EmbeddedShot>,
    by_id: HashMap<ShotId, usize>,
    failed: HashSet<ShotId>,
}

impl EmbeddedShots {
    pub fn get(&self, id: &ShotId) -> Option<&EmbeddedShot> {
        self.by_id.get(id).map(|index| &self.shots[*index])
    }

    /// `true` for shots that were supplied but could not be embedded.
    pub fn is_failed(&self, id: &ShotId) -> bool {
        self.failed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// All shots, ascending by figure number.
    pub fn by_figure_number(&self) -> impl Iterator<Item = &EmbeddedShot> {
        self.shots.iter()
    }

    /// The cover image: figure 1, else the lowest figure number available.
    pub fn hero(&self) -> Option<&EmbeddedShot> {
        self.shots
            .iter()
            .find(|shot| shot.figure == FigureNumber::FIRST)
            .or_else(|| self.shots.iter().min_by_key(|shot| shot.figure))
    }

    fn push(&mut self, shot: EmbeddedShot) {
        self.by_id.insert(shot.source_shot_id.clone(), self.shots.len());
        self.shots.push(shot);
    }
}

fn non_blank(text: &Option<String>) -> Option<String> {
    text.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(feature = "rayon-executor")]
fn prepare_all(shots: &[ShotRecord], options: Option<&RasterOptions>) -> Vec<Result<PreparedImage, ResourceError>> {
    shots
        .par_iter()
        .map(|shot| load_data_url(&shot.data_url, options))
        .collect()
}

#[cfg(not(feature = "rayon-executor"))]
fn prepare_all(shots: &[ShotRecord], options: Option<&RasterOptions>) -> Vec<Result<PreparedImage, ResourceError>> {
    shots
        .iter()
        .map(|shot| load_data_url(&shot.data_url, options))
        .collect()
}

/// Decodes every shot and registers the usable ones with `doc`.
///
/// Shots that cannot be decoded or embedded are left out and reported in
/// `warnings`; drawing a figure for them later yields a placeholder.
pub fn embed_shots(
    doc: &mut PdfDocument,
    shots: &[ShotRecord],
    options: Option<&RasterOptions>,
    warnings: &mut Warnings,
) -> EmbeddedShots {
    let prepared = prepare_all(shots, options);
    let mut embedded = EmbeddedShots::default();
    let mut next_figure = FigureNumber::FIRST;

    for (record, result) in shots.iter().zip(prepared) {
        let id = ShotId::from(record.id.as_str());
        if embedded.get(&id).is_some() || embedded.is_failed(&id) {
            debug!("Screenshot {} is listed more than once; keeping the first.", id);
            continue;
        }

        let image = match result.map_err(|e| e.to_string()).and_then(|image| {
            doc.embed_image(&image)
                .map(|handle| (handle, image.reencoded))
                .map_err(|e| e.to_string())
        }) {
            Ok((handle, reencoded)) => {
                debug!(
                    "Embedded screenshot {} as figure {} ({}x{} px, re-encoded: {}).",
                    id, next_figure, handle.pixel_size.width, handle.pixel_size.height, reencoded
                );
                handle
            }
            Err(e) => {
                warnings.push(format!("Screenshot {} could not be embedded: {}", id, e));
                embedded.failed.insert(id);
                continue;
            }
        };

        embedded.push(EmbeddedShot {
            source_shot_id: id,
            intrinsic: image.pixel_size.scaled(POINTS_PER_PIXEL),
            image,
            label: non_blank(&record.label),
            caption: non_blank(&record.note),
            timecode: non_blank(&record.timecode),
            figure: next_figure,
        });
        next_figure = next_figure.next();
    }

    info!("Embedded {} of {} screenshots.", embedded.len(), shots.len());
    embedded
}
