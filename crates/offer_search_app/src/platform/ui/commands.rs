use offer_search_core::{FilterError, FilterSet, JobType, OfferId, VisibilityAction};

pub const HELP: &str = "\
commands:
  search <text>             new search with the current filters
  type <job type|any>       filter by job type and search again
  duration <min|-> <max|->  filter by duration in months
  field [tags...]           filter by fields (no tags clears)
  tech [tags...]            filter by technologies (no tags clears)
  more                      scroll to the end of the list (empty line works too)
  show <id>                 print an offer
  hide <id> | enable <id>   company visibility controls
  disable <id> <reason>     admin disable with a reason
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Search(String),
    JobType(Option<JobType>),
    Duration { min: Option<u32>, max: Option<u32> },
    Fields(Vec<String>),
    Technologies(Vec<String>),
    More,
    Show(OfferId),
    Visibility {
        offer_id: OfferId,
        action: VisibilityAction,
    },
    Help,
    Quit,
}

impl UiCommand {
    /// Applies a filter edit to the draft; `None` for commands that are not edits.
    pub fn edit_filters(&self, draft: &FilterSet) -> Option<Result<FilterSet, FilterError>> {
        let mut next = draft.clone();
        match self {
            UiCommand::Search(value) => next.value = value.clone(),
            UiCommand::JobType(job_type) => next.job_type = *job_type,
            UiCommand::Duration { min, max } => {
                return Some(next.with_duration(*min, *max));
            }
            UiCommand::Fields(tags) => next = next.with_fields(tags.iter().cloned()),
            UiCommand::Technologies(tags) => next = next.with_technologies(tags.iter().cloned()),
            _ => return None,
        }
        Some(Ok(next))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a number of months")]
    BadMonths(String),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

pub fn parse_command(line: &str) -> Result<UiCommand, CommandError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match head.to_ascii_lowercase().as_str() {
        "" | "more" => Ok(UiCommand::More),
        "search" | "s" => Ok(UiCommand::Search(rest.to_string())),
        "type" => match args.as_slice() {
            [] => Err(CommandError::Usage("type <job type|any>")),
            _ if rest.eq_ignore_ascii_case("any") => Ok(UiCommand::JobType(None)),
            _ => Ok(UiCommand::JobType(Some(rest.parse()?))),
        },
        "duration" => match args.as_slice() {
            [min, max] => Ok(UiCommand::Duration {
                min: parse_months(min)?,
                max: parse_months(max)?,
            }),
            _ => Err(CommandError::Usage("duration <min|-> <max|->")),
        },
        "field" | "fields" => Ok(UiCommand::Fields(owned(&args))),
        "tech" | "technologies" => Ok(UiCommand::Technologies(owned(&args))),
        "show" => single_id(&args, "show <id>").map(UiCommand::Show),
        "hide" => single_id(&args, "hide <id>").map(|offer_id| UiCommand::Visibility {
            offer_id,
            action: VisibilityAction::Hide,
        }),
        "enable" => single_id(&args, "enable <id>").map(|offer_id| UiCommand::Visibility {
            offer_id,
            action: VisibilityAction::Enable,
        }),
        "disable" => match rest.split_once(char::is_whitespace) {
            Some((id, reason)) if !reason.trim().is_empty() => Ok(UiCommand::Visibility {
                offer_id: OfferId::new(id),
                action: VisibilityAction::Disable {
                    admin_reason: reason.trim().to_string(),
                },
            }),
            _ => Err(CommandError::Usage("disable <id> <reason>")),
        },
        "help" | "?" => Ok(UiCommand::Help),
        "quit" | "exit" | "q" => Ok(UiCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_months(raw: &str) -> Result<Option<u32>, CommandError> {
    if raw == "-" {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| CommandError::BadMonths(raw.to_string()))
}

fn single_id(args: &[&str], usage: &'static str) -> Result<OfferId, CommandError> {
    match args {
        [id] => Ok(OfferId::new(*id)),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_line_scrolls() {
        assert_eq!(parse_command("   "), Ok(UiCommand::More));
        assert_eq!(parse_command("more"), Ok(UiCommand::More));
    }

    #[test]
    fn search_keeps_inner_spacing() {
        assert_eq!(
            parse_command("search  rust  backend "),
            Ok(UiCommand::Search("rust  backend".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(UiCommand::Search(String::new())));
    }

    #[test]
    fn job_type_accepts_multiword_values() {
        assert_eq!(
            parse_command("type summer internship"),
            Ok(UiCommand::JobType(Some(JobType::SummerInternship)))
        );
        assert_eq!(parse_command("type ANY"), Ok(UiCommand::JobType(None)));
        assert!(matches!(
            parse_command("type gig"),
            Err(CommandError::Filter(FilterError::UnknownJobType(_)))
        ));
    }

    #[test]
    fn duration_uses_dash_for_open_bounds() {
        assert_eq!(
            parse_command("duration - 6"),
            Ok(UiCommand::Duration {
                min: None,
                max: Some(6)
            })
        );
        assert_eq!(
            parse_command("duration two 6"),
            Err(CommandError::BadMonths("two".to_string()))
        );
        assert!(matches!(
            parse_command("duration 3"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn disable_requires_a_reason() {
        assert_eq!(
            parse_command("disable abc spam posting"),
            Ok(UiCommand::Visibility {
                offer_id: OfferId::new("abc"),
                action: VisibilityAction::Disable {
                    admin_reason: "spam posting".to_string()
                },
            })
        );
        assert!(matches!(
            parse_command("disable abc"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(
            parse_command("frobnicate now"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn edits_replace_one_criterion() {
        let draft = FilterSet::new("rust")
            .with_fields(["BACKEND"])
            .with_limit(3)
            .unwrap();

        let edited = UiCommand::Technologies(vec!["Go".to_string()])
            .edit_filters(&draft)
            .unwrap()
            .unwrap();
        assert_eq!(edited.value, "rust");
        assert_eq!(edited.fields, draft.fields);
        assert!(edited.technologies.contains("Go"));
        assert_eq!(edited.limit(), 3);

        let inverted = UiCommand::Duration {
            min: Some(8),
            max: Some(2),
        }
        .edit_filters(&draft)
        .unwrap();
        assert!(inverted.is_err());

        assert!(UiCommand::More.edit_filters(&draft).is_none());
    }
}
