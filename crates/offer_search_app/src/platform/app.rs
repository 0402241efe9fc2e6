use std::io::{self, BufRead};
use std::ops::ControlFlow;
use std::sync::mpsc;
use std::thread;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use offer_search_core::{
    update, FilterSet, Msg, OfferId, ScrollTrigger, SearchState, VisibilityAction,
};
use search_logging::{search_debug, search_error, search_info};

use super::cli::Args;
use super::config::{self, API_HOST_ENV};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, UiCommand, HELP};
use super::ui::render::{offer_details, render, visibility_label, RenderCursor};
use super::watcher::TerminalWatcher;

/// Everything the main loop reacts to.
pub enum AppEvent {
    Line(String),
    Engine(Msg),
    InputClosed,
}

pub fn run_app() -> Result<()> {
    let args = Args::parse();
    logging::initialize(&args);

    let config = config::resolve(&args, std::env::var(API_HOST_ENV).ok())
        .inspect_err(|err| search_error!("Invalid configuration: {:#}", err))?;
    search_info!("Starting offer-search against {}", config.fetch.api_host);

    let (event_tx, event_rx) = mpsc::channel();
    let runner = EffectRunner::new(config.fetch, event_tx.clone())
        .inspect_err(|err| search_error!("Engine failed to start: {}", err))?;
    spawn_input_reader(event_tx);

    let mut app = App::new(runner, config.initial_filters);
    println!("type 'help' for commands");
    app.submit_draft();

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Line(line) => {
                if app.handle_line(&line).is_break() {
                    break;
                }
            }
            AppEvent::Engine(msg) => app.dispatch(msg),
            AppEvent::InputClosed => break,
        }
    }

    search_info!("Shutting down");
    Ok(())
}

fn spawn_input_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if events.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = events.send(AppEvent::InputClosed);
    });
}

struct App {
    state: SearchState,
    draft: FilterSet,
    trigger: ScrollTrigger<TerminalWatcher>,
    cursor: RenderCursor,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner, draft: FilterSet) -> Self {
        Self {
            state: SearchState::new(),
            draft,
            trigger: ScrollTrigger::new(TerminalWatcher::default()),
            cursor: RenderCursor::default(),
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Msg::PageLoaded {
            generation, offset, ..
        } = &msg
        {
            if *generation != self.state.generation() {
                search_debug!(
                    "Dropping page at offset {} from search {} (current {})",
                    offset,
                    generation,
                    self.state.generation()
                );
            }
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        for notification in self.runner.run(effects) {
            println!("* {}", notification.message);
        }

        if was_dirty {
            let view = self.state.view();
            self.trigger.sync_anchor(&view);
            for line in render(&view, &mut self.cursor, Utc::now()) {
                println!("{line}");
            }
        }
    }

    fn submit_draft(&mut self) {
        self.dispatch(Msg::SearchSubmitted(self.draft.clone()));
    }

    fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                return ControlFlow::Continue(());
            }
        };

        if let Some(edit) = command.edit_filters(&self.draft) {
            match edit {
                Ok(filters) => {
                    self.draft = filters;
                    self.submit_draft();
                }
                Err(err) => println!("{err}"),
            }
            return ControlFlow::Continue(());
        }

        match command {
            UiCommand::More => self.scroll_to_end(),
            UiCommand::Show(offer_id) => self.show(&offer_id),
            UiCommand::Visibility { offer_id, action } => self.request_visibility(offer_id, action),
            UiCommand::Help => println!("{HELP}"),
            UiCommand::Quit => return ControlFlow::Break(()),
            // Filter edits were handled above.
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn scroll_to_end(&mut self) {
        let view = self.state.view();
        let msg = self
            .trigger
            .watcher()
            .observed()
            .and_then(|anchor| self.trigger.on_intersection(anchor, true, &view));
        match msg {
            Some(msg) => self.dispatch(msg),
            None if view.loading => println!("-- still loading"),
            None if view.pagination_halted() => {
                println!("-- loading stopped; run a search to retry")
            }
            None => println!("-- no more offers"),
        }
    }

    fn show(&self, offer_id: &OfferId) {
        let Some(offer) = self.state.results().get(offer_id) else {
            println!("no offer {offer_id} in the current results");
            return;
        };
        let visibility = self
            .state
            .effective_visibility(offer_id)
            .unwrap_or(offer.visibility);
        for line in offer_details(offer, visibility, Utc::now()) {
            println!("{line}");
        }
    }

    fn request_visibility(&mut self, offer_id: OfferId, action: VisibilityAction) {
        match self.state.effective_visibility(&offer_id) {
            None => println!("no offer {offer_id} in the current results"),
            Some(current) if !action.is_allowed_from(current) => {
                println!("offer {offer_id} is {}", visibility_label(current));
            }
            Some(_) => self.dispatch(Msg::VisibilityRequested { offer_id, action }),
        }
    }
}
