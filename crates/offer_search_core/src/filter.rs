use std::collections::BTreeSet;

use crate::JobType;

/// Shortest job duration, in months, a search can ask for.
pub const JOB_MIN_DURATION: u32 = 1;
/// Longest job duration, in months, a search can ask for.
pub const JOB_MAX_DURATION: u32 = 12;
/// Number of offers requested per page.
pub const DEFAULT_PAGE_LIMIT: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("job duration {min} is greater than {max}")]
    InvertedDuration { min: u32, max: u32 },
    #[error("job duration {0} is outside 1..=12 months")]
    DurationOutOfRange(u32),
    #[error("page limit must be at least 1")]
    ZeroLimit,
    #[error("unknown job type {0:?}")]
    UnknownJobType(String),
}

/// Job duration bounds in months; `None` on either side means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationRange {
    min: Option<u32>,
    max: Option<u32>,
}

impl DurationRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(min: Option<u32>, max: Option<u32>) -> Result<Self, FilterError> {
        for months in min.iter().chain(max.iter()) {
            if !(JOB_MIN_DURATION..=JOB_MAX_DURATION).contains(months) {
                return Err(FilterError::DurationOutOfRange(*months));
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(FilterError::InvertedDuration { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Option<u32> {
        self.min
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }
}

/// Search criteria plus the pagination cursor of one page request.
///
/// A search is replaced wholesale on any change; the reducer only derives
/// per-page copies through [`FilterSet::at_offset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    pub value: String,
    pub job_type: Option<JobType>,
    duration: DurationRange,
    pub fields: BTreeSet<String>,
    pub technologies: BTreeSet<String>,
    offset: u64,
    limit: u64,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            value: String::new(),
            job_type: None,
            duration: DurationRange::unbounded(),
            fields: BTreeSet::new(),
            technologies: BTreeSet::new(),
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl FilterSet {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_job_type(mut self, job_type: JobType) -> Self {
        self.job_type = Some(job_type);
        self
    }

    pub fn with_duration(
        mut self,
        min: Option<u32>,
        max: Option<u32>,
    ) -> Result<Self, FilterError> {
        self.duration = DurationRange::new(min, max)?;
        Ok(self)
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = normalize_tags(fields);
        self
    }

    pub fn with_technologies<I, S>(mut self, technologies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.technologies = normalize_tags(technologies);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Result<Self, FilterError> {
        if limit == 0 {
            return Err(FilterError::ZeroLimit);
        }
        self.limit = limit;
        Ok(self)
    }

    /// Copy of these criteria positioned at `offset`.
    pub fn at_offset(&self, offset: u64) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    pub fn duration(&self) -> DurationRange {
        self.duration
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tags.into_iter()
        .map(Into::into)
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
