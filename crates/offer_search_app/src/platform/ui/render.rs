use std::collections::HashMap;

use chrono::{DateTime, Utc};
use offer_search_core::{
    FetchState, HiddenReason, Offer, OfferId, OfferRowView, OfferVisibility, SearchGeneration,
    SearchViewModel,
};

/// What has already been written to the terminal for the current search.
#[derive(Debug, Default)]
pub struct RenderCursor {
    generation: Option<SearchGeneration>,
    rows_printed: usize,
    shown: HashMap<OfferId, OfferVisibility>,
    status: Option<String>,
}

/// Lines to print so the terminal catches up with `view`.
///
/// A terminal cannot redraw, so only new rows, visibility changes of rows
/// already printed and status changes are emitted.
pub fn render(
    view: &SearchViewModel,
    cursor: &mut RenderCursor,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut lines = Vec::new();

    if cursor.generation != Some(view.generation) {
        *cursor = RenderCursor {
            generation: Some(view.generation),
            ..RenderCursor::default()
        };
        lines.push(format!(
            "== search {} {}",
            view.generation,
            describe_filters(view)
        ));
    }

    for row in view.offers.iter().take(cursor.rows_printed) {
        if let Some(previous) = cursor.shown.get_mut(&row.id) {
            if *previous != row.visibility {
                *previous = row.visibility;
                lines.push(format!(
                    "   {} is now {}",
                    row.id,
                    visibility_label(row.visibility)
                ));
            }
        }
    }

    for (index, row) in view.offers.iter().enumerate().skip(cursor.rows_printed) {
        lines.push(row_line(index + 1, row, now));
        cursor.shown.insert(row.id.clone(), row.visibility);
    }
    cursor.rows_printed = cursor.rows_printed.max(view.offers.len());

    let status = status_line(view);
    if status.is_some() && status != cursor.status {
        lines.extend(status.clone());
    }
    cursor.status = status;

    lines
}

fn describe_filters(view: &SearchViewModel) -> String {
    let filters = &view.filters;
    let mut parts = vec![format!("\"{}\"", filters.value)];
    if let Some(job_type) = filters.job_type {
        parts.push(format!("type={job_type}"));
    }
    let duration = filters.duration();
    if duration.min().is_some() || duration.max().is_some() {
        let bound = |months: Option<u32>| months.map_or("-".to_string(), |m| m.to_string());
        parts.push(format!(
            "months={}..{}",
            bound(duration.min()),
            bound(duration.max())
        ));
    }
    if !filters.fields.is_empty() {
        parts.push(format!("fields={}", join(filters.fields.iter())));
    }
    if !filters.technologies.is_empty() {
        parts.push(format!("tech={}", join(filters.technologies.iter())));
    }
    parts.join(" ")
}

fn join<'a>(tags: impl Iterator<Item = &'a String>) -> String {
    tags.map(String::as_str).collect::<Vec<_>>().join(",")
}

fn row_line(position: usize, row: &OfferRowView, now: DateTime<Utc>) -> String {
    let mut line = format!("{position:>3}. {}", row.title);
    if let Some(company) = &row.company_name {
        line.push_str(&format!(" @ {company}"));
    }
    if !row.location.is_empty() {
        line.push_str(&format!(" | {}", row.location));
    }
    if let Some(job_type) = row.job_type {
        line.push_str(&format!(" | {}", job_type.label()));
    }
    if row.publish_end_date < now {
        line.push_str(" | expired");
    }
    if !row.visibility.is_visible() {
        line.push_str(&format!(" | {}", visibility_label(row.visibility)));
    }
    if row.visibility_pending {
        line.push_str(" | updating");
    }
    line.push_str(&format!(" [{}]", row.id));
    line
}

fn status_line(view: &SearchViewModel) -> Option<String> {
    match view.fetch_state {
        FetchState::Idle => None,
        FetchState::Loading => Some("-- loading offers...".to_string()),
        FetchState::Success if view.has_more => Some(format!(
            "-- {} offers so far, 'more' loads the next page",
            view.offer_count
        )),
        FetchState::Success => Some(format!("-- end of results ({} offers)", view.offer_count)),
        FetchState::Error(failure) => Some(format!(
            "-- loading stopped ({failure}); run a search to retry"
        )),
    }
}

pub fn visibility_label(visibility: OfferVisibility) -> &'static str {
    match visibility {
        OfferVisibility::Visible => "visible",
        OfferVisibility::Hidden(HiddenReason::CompanyRequest) => "hidden",
        OfferVisibility::Hidden(HiddenReason::AdminRequest) => "disabled by admin",
        OfferVisibility::Hidden(HiddenReason::CompanyBlocked) => "hidden (company blocked)",
    }
}

/// Full listing of one offer for the `show` command.
pub fn offer_details(
    offer: &Offer,
    visibility: OfferVisibility,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut lines = vec![format!("{} [{}]", offer.title, offer.id)];
    if let Some(company) = &offer.company.name {
        lines.push(format!("company:      {company}"));
    }
    if !offer.location.is_empty() {
        lines.push(format!("location:     {}", offer.location));
    }
    if let Some(job_type) = offer.job_type {
        lines.push(format!("type:         {}", job_type.label()));
    }
    let job = &offer.job;
    if job.min_duration.is_some() || job.max_duration.is_some() {
        let months = |bound: Option<u32>| bound.map_or("?".to_string(), |m| m.to_string());
        lines.push(format!(
            "duration:     {}-{} months",
            months(job.min_duration),
            months(job.max_duration)
        ));
    }
    if let Some(start) = job.start_date {
        lines.push(format!("starts:       {}", start.format("%Y-%m-%d")));
    }
    lines.push(format!(
        "published:    {} to {}{}",
        offer.publish_date.format("%Y-%m-%d"),
        offer.publish_end_date.format("%Y-%m-%d"),
        if offer.is_published_at(now) {
            ""
        } else {
            " (not live)"
        }
    ));
    if !offer.fields.is_empty() {
        lines.push(format!("fields:       {}", offer.fields.join(", ")));
    }
    if !offer.technologies.is_empty() {
        lines.push(format!("technologies: {}", offer.technologies.join(", ")));
    }
    if !offer.contacts.is_empty() {
        lines.push(format!("contacts:     {}", offer.contacts.join(", ")));
    }
    lines.push(format!("visibility:   {}", visibility_label(visibility)));
    if !offer.description.is_empty() {
        lines.push(String::new());
        lines.push(offer.description.clone());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use offer_search_core::{FetchFailure, FilterSet, JobType};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn row(id: &str, title: &str) -> OfferRowView {
        OfferRowView {
            id: OfferId::new(id),
            title: title.to_string(),
            company_name: Some("Acme".to_string()),
            location: "Porto".to_string(),
            job_type: Some(JobType::FullTime),
            publish_end_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            visibility: OfferVisibility::Visible,
            visibility_pending: false,
        }
    }

    fn view(
        generation: u64,
        offers: Vec<OfferRowView>,
        fetch_state: FetchState,
    ) -> SearchViewModel {
        SearchViewModel {
            generation: SearchGeneration::new(generation),
            filters: FilterSet::new("rust").with_job_type(JobType::FullTime),
            offer_count: offers.len(),
            offers,
            has_more: true,
            loading: fetch_state == FetchState::Loading,
            fetch_state,
            dirty: true,
        }
    }

    #[test]
    fn new_search_prints_header_then_only_new_rows() {
        let mut cursor = RenderCursor::default();

        let first = render(&view(1, vec![], FetchState::Loading), &mut cursor, now());
        assert_eq!(
            first,
            vec![
                "== search #1 \"rust\" type=FULL-TIME".to_string(),
                "-- loading offers...".to_string(),
            ]
        );

        let second = render(
            &view(1, vec![row("a", "Backend dev")], FetchState::Success),
            &mut cursor,
            now(),
        );
        assert_eq!(
            second,
            vec![
                "  1. Backend dev @ Acme | Porto | Full-Time [a]".to_string(),
                "-- 1 offers so far, 'more' loads the next page".to_string(),
            ]
        );

        let unchanged = render(
            &view(1, vec![row("a", "Backend dev")], FetchState::Success),
            &mut cursor,
            now(),
        );
        assert!(unchanged.is_empty());
    }

    #[test]
    fn visibility_change_of_printed_row_is_announced() {
        let mut cursor = RenderCursor::default();
        render(&view(1, vec![row("a", "Dev")], FetchState::Success), &mut cursor, now());

        let mut hidden = row("a", "Dev");
        hidden.visibility = OfferVisibility::Hidden(HiddenReason::CompanyRequest);
        let lines = render(&view(1, vec![hidden], FetchState::Success), &mut cursor, now());

        assert_eq!(lines, vec!["   a is now hidden".to_string()]);
    }

    #[test]
    fn failure_and_expiry_are_shown() {
        let mut cursor = RenderCursor::default();
        let mut expired = row("a", "Dev");
        expired.publish_end_date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let lines = render(
            &view(
                2,
                vec![expired],
                FetchState::Error(FetchFailure::BadResponse(500)),
            ),
            &mut cursor,
            now(),
        );

        assert_eq!(lines[1], "  1. Dev @ Acme | Porto | Full-Time | expired [a]");
        assert_eq!(
            lines[2],
            "-- loading stopped (bad response (status 500)); run a search to retry"
        );
    }

    #[test]
    fn details_flag_offers_outside_their_publish_window() {
        let offer = Offer::stub("x", "Old offer");
        let lines = offer_details(&offer, OfferVisibility::Visible, now());

        assert_eq!(lines[0], "Old offer [x]");
        assert!(lines.iter().any(|line| line.ends_with("(not live)")));
        assert_eq!(lines.last().unwrap(), "visibility:   visible");
    }
}
