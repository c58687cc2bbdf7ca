pub mod error;
pub mod input;
pub mod processor;
pub mod report;

pub use error::{BatchError, InputError, OutputError};
pub use input::{parse_records, read_records};
pub use processor::{BatchOutcome, BatchProcessor, RowProgress};
pub use report::{ResultDocument, generated_now, summary_lines, write_document};

use crate::api::Geocoder;
use crate::resolver::Pause;
use std::path::Path;

/// Read `input`, geocode every row and write the document to `output`.
///
/// Input and output failures abort the run; geocoding misses do not.
pub fn geocode_file<P, F, Z, C>(
    processor: &BatchProcessor<P, F, Z>,
    input: &Path,
    output: &Path,
    title: &str,
    on_row: C,
) -> Result<ResultDocument, BatchError>
where
    P: Geocoder,
    F: Geocoder,
    Z: Pause,
    C: FnMut(RowProgress<'_>),
{
    let records = read_records(input)?;
    log::info!("Read {} rows from {}", records.len(), input.display());

    let outcome = processor.process_with_progress(&records, on_row);
    let document = ResultDocument::new(&outcome, title, generated_now());
    write_document(output, &document)?;

    Ok(document)
}
