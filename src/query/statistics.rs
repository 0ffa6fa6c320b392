use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Wall-clock time spent in each pipeline phase of one request.
///
/// Filled in by `QueryService` as the phases complete and read-only afterwards. Durations
/// serialize as fractional milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QueryPerformanceStatistics {
    #[serde(serialize_with = "as_millis")]
    pub planning: Duration,
    #[serde(serialize_with = "as_millis")]
    pub query: Duration,
    #[serde(serialize_with = "as_millis")]
    pub collection: Duration,
    #[serde(serialize_with = "as_millis")]
    pub merging: Duration,
    #[serde(serialize_with = "as_millis")]
    pub grouping: Duration,
    #[serde(serialize_with = "as_millis")]
    pub ordering: Duration,
    #[serde(serialize_with = "as_millis")]
    pub total: Duration,
    pub planned_steps: usize,
    pub failed_steps: usize,
}

impl QueryPerformanceStatistics {
    /// Sum of the phase timings, which can be slightly below `total`.
    pub fn phase_sum(&self) -> Duration {
        self.planning + self.query + self.collection + self.merging + self.grouping + self.ordering
    }
}

impl fmt::Display for QueryPerformanceStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={:?} (planning={:?}, query={:?}, collection={:?}, merging={:?}, grouping={:?}, ordering={:?}), steps={} failed={}",
            self.total,
            self.planning,
            self.query,
            self.collection,
            self.merging,
            self.grouping,
            self.ordering,
            self.planned_steps,
            self.failed_steps
        )
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}
