use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::filter::FilterError;

/// Opaque backend identity of an offer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OfferId(String);

impl OfferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OfferId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    FullTime,
    PartTime,
    SummerInternship,
    CurricularInternship,
    Other,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::SummerInternship,
        JobType::CurricularInternship,
        JobType::Other,
    ];

    /// Value used by the backend, both in offers and in search queries.
    pub fn wire_value(self) -> &'static str {
        match self {
            JobType::FullTime => "FULL-TIME",
            JobType::PartTime => "PART-TIME",
            JobType::SummerInternship => "SUMMER INTERNSHIP",
            JobType::CurricularInternship => "CURRICULAR INTERNSHIP",
            JobType::Other => "OTHER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-Time",
            JobType::PartTime => "Part-Time",
            JobType::SummerInternship => "Summer Internship",
            JobType::CurricularInternship => "Curricular Internship",
            JobType::Other => "Other",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for JobType {
    type Err = FilterError;

    /// Accepts the wire value in any case, with `_`, `-` and spaces interchangeable.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = canonical_job_type(raw);
        JobType::ALL
            .into_iter()
            .find(|job_type| canonical_job_type(job_type.wire_value()) == wanted)
            .ok_or_else(|| FilterError::UnknownJobType(raw.trim().to_string()))
    }
}

fn canonical_job_type(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HiddenReason {
    /// The owning company hid the offer itself.
    CompanyRequest,
    /// An administrator disabled the offer.
    AdminRequest,
    /// The owning company is blocked, so all of its offers are hidden.
    CompanyBlocked,
}

impl HiddenReason {
    pub fn wire_value(self) -> &'static str {
        match self {
            HiddenReason::CompanyRequest => "COMPANY_REQUEST",
            HiddenReason::AdminRequest => "ADMIN_REQUEST",
            HiddenReason::CompanyBlocked => "COMPANY_BLOCKED",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        [
            HiddenReason::CompanyRequest,
            HiddenReason::AdminRequest,
            HiddenReason::CompanyBlocked,
        ]
        .into_iter()
        .find(|reason| reason.wire_value() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OfferVisibility {
    #[default]
    Visible,
    Hidden(HiddenReason),
}

impl OfferVisibility {
    pub fn is_visible(self) -> bool {
        self == OfferVisibility::Visible
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Optional job window: when the job starts and how long it lasts, in months.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobWindow {
    pub start_date: Option<DateTime<Utc>>,
    pub min_duration: Option<u32>,
    pub max_duration: Option<u32>,
}

/// A job/internship posting as returned by a search page.
///
/// Offers are never edited after being fetched; local visibility changes are
/// tracked by the search state instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub company: CompanyRef,
    pub location: String,
    pub description: String,
    pub publish_date: DateTime<Utc>,
    pub publish_end_date: DateTime<Utc>,
    pub job: JobWindow,
    pub job_type: Option<JobType>,
    pub fields: Vec<String>,
    pub technologies: Vec<String>,
    pub contacts: Vec<String>,
    pub visibility: OfferVisibility,
}

impl Offer {
    /// Minimal offer with empty descriptive fields; handy for tests and fixtures.
    pub fn stub(id: impl Into<String>, title: impl Into<String>) -> Self {
        let epoch = DateTime::<Utc>::default();
        Self {
            id: OfferId::new(id),
            title: title.into(),
            company: CompanyRef::default(),
            location: String::new(),
            description: String::new(),
            publish_date: epoch,
            publish_end_date: epoch,
            job: JobWindow::default(),
            job_type: None,
            fields: Vec::new(),
            technologies: Vec::new(),
            contacts: Vec::new(),
            visibility: OfferVisibility::Visible,
        }
    }

    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.publish_date <= now && now <= self.publish_end_date
    }
}
