use crate::api::Geocoder;
use crate::domain::{AddressRecord, FailedSite, ResolvedSite};
use crate::resolver::{FallbackResolver, Pause, Resolution};
use std::time::Duration;

/// Resolved and failed rows, each in input order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchOutcome {
    pub resolved: Vec<ResolvedSite>,
    pub failed: Vec<FailedSite>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.resolved.len() + self.failed.len()
    }
}

/// Reported after each row finishes
#[derive(Debug)]
pub struct RowProgress<'a> {
    /// 1-based position in the input
    pub index: usize,
    pub total: usize,
    pub record: &'a AddressRecord,
    pub resolution: Option<&'a Resolution>,
}

/// Runs every row through the resolver, one at a time
pub struct BatchProcessor<P, F, Z> {
    resolver: FallbackResolver<P, F, Z>,
    inter_row_delay: Duration,
}

impl<P: Geocoder, F: Geocoder, Z: Pause> BatchProcessor<P, F, Z> {
    pub fn new(resolver: FallbackResolver<P, F, Z>, inter_row_delay: Duration) -> Self {
        Self {
            resolver,
            inter_row_delay,
        }
    }

    pub fn process(&self, rows: &[AddressRecord]) -> BatchOutcome {
        self.process_with_progress(rows, |_| {})
    }

    pub fn process_with_progress<C>(&self, rows: &[AddressRecord], mut on_row: C) -> BatchOutcome
    where
        C: FnMut(RowProgress<'_>),
    {
        let mut outcome = BatchOutcome::default();
        let total = rows.len();

        for (i, record) in rows.iter().enumerate() {
            log::debug!("[{}/{}] processing {}", i + 1, total, record.name);

            let resolution = self.resolver.resolve(&record.address);
            on_row(RowProgress {
                index: i + 1,
                total,
                record,
                resolution: resolution.as_ref(),
            });

            match resolution {
                Some(r) => outcome.resolved.push(ResolvedSite {
                    record: record.clone(),
                    coordinate: r.coordinate,
                }),
                None => outcome.failed.push(record.clone()),
            }

            self.resolver.pause().pause(self.inter_row_delay);
        }

        outcome
    }
}
