use log::{info, trace, warn};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use uuid::Uuid;

use super::input_translator::{InputEvent, InputTranslator, HELP_TEXT};
use super::text_view::TextView;
use crate::destroyable::Destroyable;
use crate::events::{Channel, EventEmitter, EventHandler, Unsubscriber};
use crate::game::{EngineConfig, GameEngine, Leaderboard, Settings, Ticker};
use crate::model::{player_name_or_default, GameEngineCommand, GameEngineEvent};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Everything the main loop reacts to. Producer threads only ever send these;
/// the engine itself stays on the loop thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Input(String),
    InputClosed,
    Tick(Uuid),
}

/// Keeps at most one ticker alive, tied to the round that started it.
struct RoundTimer {
    app_events: Sender<AppEvent>,
    period: Duration,
    ticker: Option<Ticker>,
}

impl RoundTimer {
    fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn start(&mut self, round_id: Uuid) {
        self.stop();
        let app_events = self.app_events.clone();
        self.ticker = Some(Ticker::start(self.period, move || {
            app_events.send(AppEvent::Tick(round_id)).is_ok()
        }));
    }
}

impl EventHandler<GameEngineEvent> for RoundTimer {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::RoundStarted {
                round_id, timed, ..
            } => {
                if *timed {
                    self.start(*round_id);
                } else {
                    self.stop();
                }
            }
            GameEngineEvent::RoundWon { .. } => self.stop(),
            _ => (),
        }
    }
}

pub struct Session<W: Write + 'static> {
    engine: Rc<RefCell<GameEngine>>,
    command_emitter: EventEmitter<GameEngineCommand>,
    view: Rc<RefCell<TextView<W>>>,
    timer: Rc<RefCell<RoundTimer>>,
    subscriptions: Vec<Unsubscriber<GameEngineEvent>>,
    translator: InputTranslator,
    settings: Settings,
    data_dir: PathBuf,
}

impl<W: Write + 'static> Session<W> {
    pub fn new(
        out: W,
        leaderboard: Leaderboard,
        config: EngineConfig,
        settings: Settings,
        data_dir: PathBuf,
        app_events: Sender<AppEvent>,
    ) -> Self {
        Self::with_tick_period(
            out,
            leaderboard,
            config,
            settings,
            data_dir,
            app_events,
            TICK_PERIOD,
        )
    }

    pub fn with_tick_period(
        out: W,
        leaderboard: Leaderboard,
        config: EngineConfig,
        settings: Settings,
        data_dir: PathBuf,
        app_events: Sender<AppEvent>,
        period: Duration,
    ) -> Self {
        let (command_emitter, command_observer) = Channel::<GameEngineCommand>::new();
        let (event_emitter, event_observer) = Channel::<GameEngineEvent>::new();

        let engine = GameEngine::new(event_emitter, leaderboard, config).wire(command_observer);

        let view = Rc::new(RefCell::new(TextView::new(out)));
        let view_handler = Rc::clone(&view);
        let view_subscription =
            event_observer.subscribe(move |event| view_handler.borrow_mut().handle_event(event));

        let timer = Rc::new(RefCell::new(RoundTimer {
            app_events,
            period,
            ticker: None,
        }));
        let timer_handler = Rc::clone(&timer);
        let timer_subscription =
            event_observer.subscribe(move |event| timer_handler.borrow_mut().handle_event(event));

        let translator = InputTranslator::new(settings.player_name.clone());
        Self {
            engine,
            command_emitter,
            view,
            timer,
            subscriptions: vec![view_subscription, timer_subscription],
            translator,
            settings,
            data_dir,
        }
    }

    pub fn engine(&self) -> &Rc<RefCell<GameEngine>> {
        &self.engine
    }

    /// Starts the first round and shows the high scores.
    pub fn start(&mut self) {
        let difficulty = self.settings.difficulty;
        self.command_emitter
            .emit(GameEngineCommand::NewRound(Some(difficulty)));
        self.command_emitter.emit(GameEngineCommand::ShowStandings);
        self.view.borrow_mut().prompt();
    }

    /// Handles one event to completion. Returns false once the session is over.
    pub fn handle_app_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Tick(round_id) => {
                self.command_emitter.emit(GameEngineCommand::Tick(round_id));
                true
            }
            AppEvent::InputClosed => false,
            AppEvent::Input(line) => {
                let keep_going = self.handle_input(&line);
                if keep_going {
                    self.view.borrow_mut().prompt();
                }
                keep_going
            }
        }
    }

    fn handle_input(&mut self, line: &str) -> bool {
        match self.translator.translate(line) {
            InputEvent::Quit => return false,
            InputEvent::Help => self.view.borrow_mut().show_text(HELP_TEXT),
            InputEvent::ShowTime => self.view.borrow_mut().show_time(),
            InputEvent::Engine(command) => {
                if let GameEngineCommand::NewRound(Some(difficulty)) = &command {
                    self.settings.difficulty = *difficulty;
                    self.save_settings();
                }
                let saving = match &command {
                    GameEngineCommand::SaveScore(name)
                        if self.engine.borrow().pending_result().is_some() =>
                    {
                        Some(name.clone())
                    }
                    _ => None,
                };
                self.command_emitter.emit(command);
                // the engine drops the pending result only once the score is written
                if let Some(name) = saving {
                    if self.engine.borrow().pending_result().is_none() {
                        self.remember_player(&name);
                    }
                }
            }
        }
        true
    }

    fn remember_player(&mut self, name: &str) {
        let name = player_name_or_default(name);
        self.translator.set_default_name(Some(name.clone()));
        self.settings.player_name = Some(name);
        self.save_settings();
    }

    fn save_settings(&self) {
        if let Err(err) = self.settings.save(&self.data_dir) {
            warn!(target: "session", "Could not save settings: {}", err);
        }
    }

    /// Processes events until input ends or the player quits.
    pub fn run(mut self, app_events: Receiver<AppEvent>) {
        self.start();
        for event in app_events.iter() {
            trace!(target: "session", "App event: {:?}", event);
            if !self.handle_app_event(event) {
                break;
            }
        }
        info!(target: "session", "Session finished");
    }
}

impl<W: Write + 'static> Drop for Session<W> {
    fn drop(&mut self) {
        self.timer.borrow_mut().stop();
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        self.engine.borrow_mut().destroy();
    }
}

/// Forwards lines from `input` as [`AppEvent::Input`], then `InputClosed`.
pub fn spawn_input_reader<R>(input: R, app_events: Sender<AppEvent>) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if app_events.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    warn!(target: "session", "Stopped reading input: {}", err);
                    break;
                }
            }
        }
        let _ = app_events.send(AppEvent::InputClosed);
    })
}

pub fn app_channel() -> (Sender<AppEvent>, Receiver<AppEvent>) {
    mpsc::channel()
}
