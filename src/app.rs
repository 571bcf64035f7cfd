use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, B256, U256};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::components::Component;
use crate::components::achievements::AchievementsView;
use crate::components::connect::{ConnectAction, ConnectDialog};
use crate::components::courses::CoursesView;
use crate::components::goals::GoalsView;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::landing::Landing;
use crate::components::notes::NotesView;
use crate::components::status_bar::StatusBar;
use crate::data::types::{ChainConfig, RecordKind, WriteCall, WriteStatus};
use crate::data::{DataService, ReadCall, plan_reads};
use crate::events::{AppEvent, View};
use crate::theme::THEME;
use crate::utils;

pub struct App {
    current_view: View,

    // Components
    header: Header,
    courses: CoursesView,
    notes: NotesView,
    achievements: AchievementsView,
    goals: GoalsView,
    landing: Landing,
    status_bar: StatusBar,
    connect: ConnectDialog,
    help: HelpOverlay,

    // Session
    account: Option<Address>,
    entry_fee: Option<U256>,
    chain: ChainConfig,
    pending_reads: usize,

    // Data
    data_service: Arc<DataService>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(
        data_service: Arc<DataService>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        chain: ChainConfig,
        tick_rate_ms: u64,
    ) -> Self {
        Self {
            current_view: View::Section(RecordKind::Course),
            header: Header::new(chain.name.clone()),
            courses: CoursesView::new(),
            notes: NotesView::new(),
            achievements: AchievementsView::new(),
            goals: GoalsView::new(),
            landing: Landing,
            status_bar: StatusBar::new(chain.symbol.clone()),
            connect: ConnectDialog::new(),
            help: HelpOverlay::new(),
            account: None,
            entry_fee: None,
            chain,
            pending_reads: 0,
            data_service,
            event_rx,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // header (1) | content (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0]);

        match self.current_view.visible(self.account) {
            View::Landing => self.landing.render(frame, chunks[1]),
            View::Section(kind) => self.section_view(kind).render(frame, chunks[1]),
        }

        self.status_bar.render(frame, chunks[2]);

        // Overlays
        self.connect.render(frame, area);
        self.help.render(frame, area);
    }

    fn section_view(&mut self, kind: RecordKind) -> &mut dyn Component {
        match kind {
            RecordKind::Course => &mut self.courses,
            RecordKind::Note => &mut self.notes,
            RecordKind::Achievement => &mut self.achievements,
            RecordKind::Goal => &mut self.goals,
        }
    }

    fn form_open(&self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::Course => self.courses.section.show_form,
            RecordKind::Note => self.notes.section.show_form,
            RecordKind::Achievement => self.achievements.section.show_form,
            RecordKind::Goal => self.goals.section.show_form,
        }
    }

    fn handle_terminal_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.help.dismiss() {
            return;
        }

        if self.connect.active {
            match self.connect.handle_key(key) {
                Some(ConnectAction::Connect(private_key)) => {
                    self.data_service.connect_wallet(private_key);
                }
                Some(ConnectAction::Cancel) | None => {}
            }
            return;
        }

        let visible = self.current_view.visible(self.account);

        // An open form takes every key so titles can contain digits and 'q'.
        if let View::Section(kind) = visible {
            if self.form_open(kind) {
                self.delegate_key(kind, key);
                return;
            }
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.help.toggle();
                return;
            }
            KeyCode::Char('w') => {
                self.connect.activate();
                return;
            }
            KeyCode::Char('r') => {
                self.refresh_all();
                return;
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.navigate_to(View::Section(RecordKind::ALL[index]));
                return;
            }
            KeyCode::Tab => {
                let next = match visible {
                    View::Section(kind) => next_section(kind),
                    View::Landing => RecordKind::Course,
                };
                self.navigate_to(View::Section(next));
                return;
            }
            _ => {}
        }

        if let View::Section(kind) = visible {
            self.delegate_key(kind, key);
        }
    }

    fn delegate_key(&mut self, kind: RecordKind, key: KeyEvent) {
        if let Some(event) = self.section_view(kind).handle_key(key) {
            self.handle_app_event(event);
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Connected(chain_id) => {
                self.status_bar.chain_id = Some(chain_id);
                if chain_id != self.chain.chain_id {
                    tracing::warn!(
                        expected = self.chain.chain_id,
                        actual = chain_id,
                        "endpoint chain differs from preset"
                    );
                }
            }
            AppEvent::AccountConnected(account) => {
                self.connect.deactivate();
                self.set_account(account);
                self.status_bar
                    .set_info(format!("Connected {}", utils::truncate_address(&account)));
                self.refresh_all();
            }
            AppEvent::WalletError(msg) => {
                if self.connect.active {
                    self.connect.fail(msg.clone());
                }
                self.status_bar.set_error(msg);
            }
            AppEvent::CoursesLoaded { account, records } => {
                self.read_done();
                if self.is_current(account) {
                    self.courses.section.set_records(records);
                }
            }
            AppEvent::NotesLoaded { account, records } => {
                self.read_done();
                if self.is_current(account) {
                    self.notes.section.set_records(records);
                }
            }
            AppEvent::AchievementsLoaded { account, records } => {
                self.read_done();
                if self.is_current(account) {
                    self.achievements.section.set_records(records);
                }
            }
            AppEvent::GoalsLoaded { account, records } => {
                self.read_done();
                if self.is_current(account) {
                    self.goals.section.set_records(records);
                }
            }
            AppEvent::EntryFeeLoaded(fee) => {
                self.read_done();
                self.set_entry_fee(fee);
            }
            AppEvent::ReadFailed { read, message } => {
                self.read_done();
                if read.account().is_some_and(|account| !self.is_current(account)) {
                    return;
                }
                self.status_bar
                    .set_error(format!("Could not read {}: {message}", read_label(read)));
                match read {
                    ReadCall::Courses(_) => self.courses.section.set_load_error(message),
                    ReadCall::Notes(_) => self.notes.section.set_load_error(message),
                    ReadCall::Achievements(_) => {
                        self.achievements.section.set_load_error(message)
                    }
                    ReadCall::Goals(_) => self.goals.section.set_load_error(message),
                    ReadCall::EntryFee => {}
                }
            }
            AppEvent::Submit(call) => {
                let value = write_value(&call, self.entry_fee);
                self.status_bar.clear_messages();
                self.data_service.submit(call, value);
            }
            AppEvent::WriteStatusChanged { kind, status } => {
                match &status {
                    WriteStatus::Confirmed(hash) => {
                        let link = self
                            .chain
                            .tx_url(hash)
                            .unwrap_or_else(|| format!("{hash}"));
                        self.status_bar.set_info(format!("Confirmed: {link}"));
                    }
                    WriteStatus::Failed(msg) => self.status_bar.set_error(msg.clone()),
                    _ => {}
                }
                self.set_write_status(kind, status);
            }
            AppEvent::WriteSettled { kind, hash } => {
                self.settle(kind, hash);
                self.refresh_all();
            }
            AppEvent::Error(msg) => {
                self.status_bar.set_error(msg);
            }
        }
    }

    fn set_account(&mut self, account: Address) {
        self.account = Some(account);
        self.header.account = Some(account);

        let account = Some(account);
        self.courses.section.account = account;
        self.courses.section.clear();
        self.notes.section.account = account;
        self.notes.section.clear();
        self.achievements.section.account = account;
        self.achievements.section.clear();
        self.goals.section.account = account;
        self.goals.section.clear();

        self.header.current_tab = self.current_view.tab_index();
    }

    fn set_entry_fee(&mut self, fee: U256) {
        self.entry_fee = Some(fee);
        self.status_bar.entry_fee = Some(fee);
        self.courses.section.entry_fee = Some(fee);
        self.notes.section.entry_fee = Some(fee);
        self.achievements.section.entry_fee = Some(fee);
        self.goals.section.entry_fee = Some(fee);
    }

    fn set_write_status(&mut self, kind: RecordKind, status: WriteStatus) {
        match kind {
            RecordKind::Course => self.courses.section.set_write_status(status),
            RecordKind::Note => self.notes.section.set_write_status(status),
            RecordKind::Achievement => self.achievements.section.set_write_status(status),
            RecordKind::Goal => self.goals.section.set_write_status(status),
        }
    }

    fn settle(&mut self, kind: RecordKind, hash: B256) {
        let settled = match kind {
            RecordKind::Course => self.courses.section.settle(hash),
            RecordKind::Note => self.notes.section.settle(hash),
            RecordKind::Achievement => self.achievements.section.settle(hash),
            RecordKind::Goal => self.goals.section.settle(hash),
        };
        if !settled {
            tracing::debug!(%kind, %hash, "newer write in flight, form left as is");
        }
    }

    /// Whether a read made for `account` still belongs to the session.
    fn is_current(&self, account: Address) -> bool {
        self.account == Some(account)
    }

    /// Re-read all four lists and the fee for the connected account.
    fn refresh_all(&mut self) {
        let planned = plan_reads(self.account).len();
        if planned == 0 {
            return;
        }
        self.pending_reads += planned;
        self.status_bar.loading = true;
        self.data_service.fetch_all(self.account);
    }

    fn read_done(&mut self) {
        self.pending_reads = self.pending_reads.saturating_sub(1);
        self.status_bar.loading = self.pending_reads > 0;
    }

    fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.header.current_tab = view.tab_index();
        self.status_bar.clear_messages();
    }
}

/// Value attached to a write: the entry fee for record-creating calls.
fn write_value(call: &WriteCall, entry_fee: Option<U256>) -> U256 {
    if call.is_payable() {
        entry_fee.unwrap_or(U256::ZERO)
    } else {
        U256::ZERO
    }
}

fn next_section(kind: RecordKind) -> RecordKind {
    let index = RecordKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
    RecordKind::ALL[(index + 1) % RecordKind::ALL.len()]
}

fn read_label(read: ReadCall) -> &'static str {
    match read {
        ReadCall::Courses(_) => "courses",
        ReadCall::Notes(_) => "notes",
        ReadCall::Achievements(_) => "achievements",
        ReadCall::Goals(_) => "goals",
        ReadCall::EntryFee => "entry fee",
    }
}
