use chrono::{DateTime, Utc};
use offer_search_core::{
    CompanyRef, HiddenReason, JobType, JobWindow, Offer, OfferId, OfferVisibility,
};
use search_logging::{search_debug, search_warn};
use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response is not a list of offers: {message}")]
    NotAnOfferList { message: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOffer {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    publish_date: Option<String>,
    #[serde(default)]
    publish_end_date: Option<String>,
    #[serde(default)]
    company: Option<RawCompany>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    owner_name: Option<String>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    job_start_date: Option<String>,
    #[serde(default)]
    job_min_duration: Option<u32>,
    #[serde(default)]
    job_max_duration: Option<u32>,
    #[serde(default)]
    job_type: Option<String>,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    technologies: Vec<String>,
    #[serde(default)]
    contacts: Vec<String>,
    #[serde(default)]
    is_hidden: bool,
    #[serde(default)]
    hidden_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCompany {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Parse a search response body into typed offers, in response order.
pub fn decode_offers(bytes: &[u8]) -> Result<Vec<Offer>, DecodeError> {
    let raw: Vec<RawOffer> =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::NotAnOfferList {
            message: err.to_string(),
        })?;
    Ok(raw.into_iter().map(into_offer).collect())
}

fn into_offer(raw: RawOffer) -> Offer {
    let company = match raw.company {
        Some(company) => CompanyRef {
            id: company.id.or(raw.owner),
            name: company.name.or(raw.owner_name),
        },
        None => CompanyRef {
            id: raw.owner,
            name: raw.owner_name,
        },
    };
    let job_type = raw.job_type.as_deref().and_then(|value| {
        let parsed = value.parse::<JobType>().ok();
        if parsed.is_none() {
            search_debug!("offer {} has unknown job type {:?}", raw.id, value);
        }
        parsed
    });
    let publish_date = parse_date(&raw.id, "publishDate", raw.publish_date.as_deref());
    let publish_end_date = parse_date(&raw.id, "publishEndDate", raw.publish_end_date.as_deref());
    let job_start_date = parse_date(&raw.id, "jobStartDate", raw.job_start_date.as_deref());
    Offer {
        visibility: visibility(raw.is_hidden, raw.hidden_reason.as_deref()),
        id: OfferId::new(raw.id),
        title: raw.title,
        company,
        location: raw.location,
        description: raw.description,
        publish_date: publish_date.unwrap_or_default(),
        publish_end_date: publish_end_date.unwrap_or_default(),
        job: JobWindow {
            start_date: job_start_date,
            min_duration: raw.job_min_duration,
            max_duration: raw.job_max_duration,
        },
        job_type,
        fields: raw.fields,
        technologies: raw.technologies,
        contacts: raw.contacts,
    }
}

/// Missing or malformed dates are dropped so one bad record does not fail the page.
fn parse_date(id: &str, field: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(err) => {
            search_warn!("offer {} has unreadable {} {:?}: {}", id, field, raw, err);
            None
        }
    }
}

/// Hidden offers without a reason count as hidden by their company; unknown
/// reasons are treated as administrative so they stay locked.
fn visibility(is_hidden: bool, reason: Option<&str>) -> OfferVisibility {
    if !is_hidden {
        return OfferVisibility::Visible;
    }
    let reason = match reason {
        None => HiddenReason::CompanyRequest,
        Some(raw) => HiddenReason::from_wire(raw).unwrap_or(HiddenReason::AdminRequest),
    };
    OfferVisibility::Hidden(reason)
}

/// First message of a `{"errors": [...]}` body; entries are `{"msg": ...}` objects or strings.
pub fn first_error_message(bytes: &[u8]) -> Option<String> {
    let body: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    let first = body.get("errors")?.as_array()?.first()?;
    let message = match first {
        serde_json::Value::String(message) => message.as_str(),
        other => other.get("msg")?.as_str()?,
    };
    Some(message.to_string())
}
