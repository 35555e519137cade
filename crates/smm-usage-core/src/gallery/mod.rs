//! Display-ready model of a user's gallery: one section per media item, each pairing the
//! original image with its generation outputs laid out in rows of [`GRID_COLUMNS`].

pub mod timestamp;

pub use timestamp::format_timestamp;

use crate::identity::UserId;
use crate::storage::{GenerationRecord, MediaId, MediaItem, Timestamp};
use crate::url::CdnUrlResolver;

pub const GRID_COLUMNS: usize = 3;

/// Shown in place of any metadata field the document does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

pub const NO_MEDIA_NOTICE: &str = "No media found for this user.";
pub const NO_GENERATIONS_NOTICE: &str = "No AI generations for this media.";

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView {
    pub user_id: UserId,
    pub sections: Vec<MediaSection>,
}

impl GalleryView {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn generation_count(&self) -> usize {
        self.sections.iter().map(|s| s.outputs.cell_count()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaSection {
    pub media_id: MediaId,
    /// `None` when the item has no stored path; no image is drawn then.
    pub original_url: Option<String>,
    pub outputs: Outputs,
}

impl MediaSection {
    pub fn new(item: &MediaItem, generations: &[GenerationRecord], urls: &CdnUrlResolver) -> Self {
        MediaSection {
            media_id: item.id.clone(),
            original_url: urls.resolve(item.media_path.as_deref()),
            outputs: Outputs::layout(generations, urls),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outputs {
    /// The media item has no generation records.
    Empty,
    Grid(Vec<GridRow>),
}

impl Outputs {
    /// Groups records into rows of [`GRID_COLUMNS`] in fetch order.
    pub fn layout(generations: &[GenerationRecord], urls: &CdnUrlResolver) -> Self {
        if generations.is_empty() {
            return Outputs::Empty;
        }
        Outputs::Grid(
            generations
                .chunks(GRID_COLUMNS)
                .map(|chunk| GridRow {
                    cells: chunk.iter().map(|record| OutputCell::new(record, urls)).collect(),
                })
                .collect(),
        )
    }

    pub fn rows(&self) -> &[GridRow] {
        match self {
            Outputs::Empty => &[],
            Outputs::Grid(rows) => rows,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows().iter().map(|row| row.cells.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub cells: Vec<OutputCell>,
}

impl GridRow {
    /// Grid slots left blank after the last cell.
    pub fn empty_slots(&self) -> usize {
        GRID_COLUMNS.saturating_sub(self.cells.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputCell {
    pub image_url: Option<String>,
    pub details: OutputDetails,
}

impl OutputCell {
    pub fn new(record: &GenerationRecord, urls: &CdnUrlResolver) -> Self {
        OutputCell {
            image_url: urls.resolve(record.output_path()),
            details: OutputDetails::from_record(record),
        }
    }
}

/// The four metadata lines under every output image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDetails {
    pub process_type: String,
    pub transformation_type: String,
    pub workflow_id: String,
    pub created_at: String,
}

impl OutputDetails {
    pub fn from_record(record: &GenerationRecord) -> Self {
        OutputDetails {
            process_type: or_not_available(record.process_type.as_deref()),
            transformation_type: or_not_available(record.transformation_type.as_deref()),
            workflow_id: or_not_available(record.workflow_id.as_deref()),
            created_at: display_created_at(record.created_at.as_ref()),
        }
    }

    pub fn lines(&self) -> [(&'static str, &str); 4] {
        [
            ("Process Type", self.process_type.as_str()),
            ("Transformation Type", self.transformation_type.as_str()),
            ("GenerationWorkflowId", self.workflow_id.as_str()),
            ("Created At", self.created_at.as_str()),
        ]
    }
}

fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn display_created_at(value: Option<&Timestamp>) -> String {
    value
        .map(format_timestamp)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize, output: Option<&str>) -> GenerationRecord {
        GenerationRecord {
            id: format!("g{}", n).into(),
            media_id: MediaId::new("m1"),
            process_type: Some("staging".to_string()),
            transformation_type: None,
            workflow_id: Some(format!("wf-{}", n)),
            created_at: Some(Timestamp::Text("2024-01-15T10:30:00Z".to_string())),
            output: output.map(|path| crate::storage::OutputDescriptor {
                output_path: Some(path.to_string()),
            }),
        }
    }

    fn records(n: usize) -> Vec<GenerationRecord> {
        (0..n).map(|i| record(i, Some("out.png"))).collect()
    }

    #[test]
    fn test_grouping_law() {
        let urls = CdnUrlResolver::default();
        for n in 1..=10 {
            let outputs = Outputs::layout(&records(n), &urls);
            let rows = outputs.rows();
            assert_eq!(rows.len(), (n + GRID_COLUMNS - 1) / GRID_COLUMNS, "n = {}", n);
            for row in &rows[..rows.len() - 1] {
                assert_eq!(row.cells.len(), GRID_COLUMNS);
            }
            let last = rows.last().unwrap().cells.len();
            let expected_last = if n % GRID_COLUMNS == 0 { GRID_COLUMNS } else { n % GRID_COLUMNS };
            assert_eq!(last, expected_last, "n = {}", n);
            assert_eq!(outputs.cell_count(), n);
        }
    }

    #[test]
    fn test_no_generations_is_empty_not_zero_rows() {
        let outputs = Outputs::layout(&[], &CdnUrlResolver::default());
        assert_eq!(outputs, Outputs::Empty);
        assert!(outputs.rows().is_empty());
    }

    #[test]
    fn test_four_generations_leave_two_empty_slots() {
        let outputs = Outputs::layout(&records(4), &CdnUrlResolver::default());
        let rows = outputs.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].empty_slots(), 0);
        assert_eq!(rows[1].cells.len(), 1);
        assert_eq!(rows[1].empty_slots(), 2);
    }

    #[test]
    fn test_rows_keep_fetch_order() {
        let outputs = Outputs::layout(&records(5), &CdnUrlResolver::default());
        let workflow_ids: Vec<&str> = outputs
            .rows()
            .iter()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.details.workflow_id.as_str())
            .collect();
        assert_eq!(workflow_ids, vec!["wf-0", "wf-1", "wf-2", "wf-3", "wf-4"]);
    }

    #[test]
    fn test_missing_metadata_shows_not_available() {
        let mut bare = record(0, None);
        bare.process_type = None;
        bare.workflow_id = None;
        bare.created_at = None;
        let details = OutputDetails::from_record(&bare);
        for (_, value) in details.lines() {
            assert_eq!(value, NOT_AVAILABLE);
        }
    }

    #[test]
    fn test_cell_resolves_output_url_only_when_present() {
        let urls = CdnUrlResolver::default();
        let with_image = OutputCell::new(&record(0, Some("outputs/x.png")), &urls);
        assert_eq!(
            with_image.image_url.as_deref(),
            Some("https://cdn-2.styldod.com/outputs/x.png")
        );
        assert_eq!(OutputCell::new(&record(0, Some("")), &urls).image_url, None);
        assert_eq!(OutputCell::new(&record(0, None), &urls).image_url, None);
    }

    #[test]
    fn test_section_skips_original_without_path() {
        let item = MediaItem {
            id: MediaId::new("m1"),
            user_id: UserId::new("u1"),
            media_path: Some(String::new()),
            deleted: false,
        };
        let section = MediaSection::new(&item, &[], &CdnUrlResolver::default());
        assert_eq!(section.original_url, None);
        assert_eq!(section.outputs, Outputs::Empty);
    }

    #[test]
    fn test_details_format_created_at() {
        let details = OutputDetails::from_record(&record(7, None));
        assert_eq!(details.created_at, "2024-01-15 10:30:00");
        assert_eq!(details.transformation_type, NOT_AVAILABLE);
    }
}
