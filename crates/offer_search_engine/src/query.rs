use offer_search_core::FilterSet;
use url::form_urlencoded;

/// Encodes a search page as an `application/x-www-form-urlencoded` query.
///
/// Keys keep a fixed order: `value`, `jobType`, `jobMinDuration`,
/// `jobMaxDuration`, `fields`, `technologies`, `offset`, `limit`. Unset
/// optional criteria are omitted; list criteria repeat their key per tag.
/// `value` is always present, possibly empty.
pub fn encode_query(filters: &FilterSet, offset: u64) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("value", &filters.value);
    if let Some(job_type) = filters.job_type {
        query.append_pair("jobType", job_type.wire_value());
    }
    let duration = filters.duration();
    if let Some(min) = duration.min() {
        query.append_pair("jobMinDuration", &min.to_string());
    }
    if let Some(max) = duration.max() {
        query.append_pair("jobMaxDuration", &max.to_string());
    }
    for field in &filters.fields {
        query.append_pair("fields", field);
    }
    for technology in &filters.technologies {
        query.append_pair("technologies", technology);
    }
    query.append_pair("offset", &offset.to_string());
    query.append_pair("limit", &filters.limit().to_string());
    query.finish()
}
