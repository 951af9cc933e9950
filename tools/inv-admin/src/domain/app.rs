//! Application state management.
//!
//! Input goes through [`App::handle_key`], which may return a [`Command`].
//! Results come back through [`App::apply`], which may return follow-ups.
//! Neither performs IO.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{DateTime, Local};
use shared_types::{ActionType, HistoryEntry, InventoryObject, NewHistoryEntry};

use super::{
    AlertBanner, BulkScope, BulkTarget, Command, Form, Modal, Outcome, ReferenceData, Tab,
    TabController,
};
use crate::view::{history_table, objects_table, zones_table, TableView};

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Browsing the tabs.
    #[default]
    Browsing,
    /// Help overlay.
    Help,
    /// Quitting.
    Quit,
}

/// Terminal-independent key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

/// Main application model.
pub struct App {
    pub state: AppState,
    pub tabs: TabController,
    pub reference: ReferenceData,
    pub objects: Vec<InventoryObject>,
    pub history: Vec<HistoryEntry>,
    pub objects_view: TableView,
    pub zones_view: TableView,
    pub history_view: TableView,
    /// Selected row per tab.
    selection: [usize; 4],
    pub modal: Option<Modal>,
    /// Dialogs raised by results while another dialog was open.
    queued_modals: VecDeque<Modal>,
    pub alerts: AlertBanner,
    pub last_refresh: Option<DateTime<Local>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_alerts(AlertBanner::default())
    }

    pub fn with_alerts(alerts: AlertBanner) -> Self {
        Self {
            state: AppState::Browsing,
            tabs: TabController::new(),
            reference: ReferenceData::default(),
            objects: Vec::new(),
            history: Vec::new(),
            objects_view: objects_table(&[]),
            zones_view: zones_table(&[]),
            history_view: history_table(&[]),
            selection: [0; 4],
            modal: None,
            queued_modals: VecDeque::new(),
            alerts,
            last_refresh: None,
        }
    }

    /// Commands issued once at launch.
    pub fn startup_commands() -> Vec<Command> {
        vec![Command::LoadReference, Command::Reload(Tab::Objects)]
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }

    pub fn prune_alerts(&mut self, now: Instant) {
        self.alerts.prune(now);
    }

    /// Table for `tab`; the bulk tab has none.
    pub fn table(&self, tab: Tab) -> Option<&TableView> {
        match tab {
            Tab::Objects => Some(&self.objects_view),
            Tab::Zones => Some(&self.zones_view),
            Tab::History => Some(&self.history_view),
            Tab::Bulk => None,
        }
    }

    pub fn selected_row(&self) -> usize {
        self.selection[self.tabs.active().index()]
    }

    fn selected_id(&self) -> Option<i64> {
        self.table(self.tabs.active())?.row_id(self.selected_row())
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Handle one key press.
    pub fn handle_key(&mut self, key: Key) -> Option<Command> {
        match self.state {
            AppState::Help => {
                // Any key closes help
                self.state = AppState::Browsing;
                None
            }
            AppState::Quit => None,
            AppState::Browsing if self.modal.is_some() => self.handle_modal_key(key),
            AppState::Browsing => self.handle_browse_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: Key) -> Option<Command> {
        let active = self.tabs.active();
        match key {
            Key::Char('q') | Key::Char('Q') | Key::Esc => {
                self.state = AppState::Quit;
                None
            }
            Key::Char('?') => {
                self.state = AppState::Help;
                None
            }
            Key::Char(c) if Tab::from_key(c).is_some() => {
                let tab = Tab::from_key(c)?;
                self.tabs.activate(tab).map(Command::Reload)
            }
            Key::Left => self.tabs.prev().map(Command::Reload),
            Key::Right => self.tabs.next().map(Command::Reload),
            Key::Up => {
                self.move_selection(-1);
                None
            }
            Key::Down => {
                self.move_selection(1);
                None
            }
            Key::Char('r') | Key::Char('R') => Some(Command::Reload(active)),
            Key::Char('a') => {
                match active {
                    Tab::Objects => self.open_form(Form::create_object(&self.reference)),
                    Tab::Zones => self.open_form(Form::create_zone()),
                    _ => {}
                }
                None
            }
            Key::Char('k') => {
                self.open_form(Form::create_category());
                None
            }
            Key::Char('e') if active == Tab::Objects => self.selected_id().map(Command::FetchForEdit),
            Key::Char('d') => {
                self.confirm_delete();
                None
            }
            Key::Char('x') if active == Tab::Bulk => {
                self.open_form(Form::bulk_delete(BulkTarget::All, &self.reference));
                None
            }
            Key::Char('z') if active == Tab::Bulk => {
                self.open_form(Form::bulk_delete(BulkTarget::Zone, &self.reference));
                None
            }
            Key::Char('c') if active == Tab::Bulk => {
                self.open_form(Form::bulk_delete(BulkTarget::Category, &self.reference));
                None
            }
            _ => None,
        }
    }

    fn handle_modal_key(&mut self, key: Key) -> Option<Command> {
        if let Some(Modal::Confirm(_)) = &self.modal {
            return match key {
                Key::Char('y') | Key::Char('Y') => match self.close_modal() {
                    Some(Modal::Confirm(confirm)) => Some(confirm.command),
                    _ => None,
                },
                Key::Char('n') | Key::Char('N') | Key::Esc => {
                    self.close_modal();
                    None
                }
                _ => None,
            };
        }

        let Some(Modal::Form(form)) = self.modal.as_mut() else {
            return None;
        };
        match key {
            Key::Esc => {
                self.close_modal();
            }
            Key::Enter => {
                return match form.submit()? {
                    command @ Command::BulkDelete { scope: BulkScope::All, .. } => {
                        self.modal = Some(Modal::confirm(
                            "Are you sure? This will delete ALL objects!",
                            command,
                        ));
                        None
                    }
                    command => {
                        self.close_modal();
                        Some(command)
                    }
                };
            }
            Key::Tab | Key::Down => form.focus_next(),
            Key::BackTab | Key::Up => form.focus_prev(),
            Key::Left => form.cycle(-1),
            Key::Right => form.cycle(1),
            Key::Backspace => form.backspace(),
            Key::Char(c) => form.push_char(c),
        }
        None
    }

    fn open_form(&mut self, form: Form) {
        self.modal = Some(Modal::Form(form));
    }

    /// Show `modal` now, or after the open one closes.
    fn raise_modal(&mut self, modal: Modal) {
        if self.modal.is_some() {
            self.queued_modals.push_back(modal);
        } else {
            self.modal = Some(modal);
        }
    }

    /// Close the open dialog and bring up the next queued one.
    fn close_modal(&mut self) -> Option<Modal> {
        let closed = self.modal.take();
        self.modal = self.queued_modals.pop_front();
        closed
    }

    fn confirm_delete(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.tabs.active() {
            Tab::Objects => {
                let name = self
                    .objects
                    .iter()
                    .find(|o| o.id == id)
                    .map(|o| o.name.clone())
                    .unwrap_or_default();
                self.modal = Some(Modal::confirm(
                    format!("Are you sure you want to delete object '{}'?", name),
                    Command::DeleteObject { id, name },
                ));
            }
            Tab::Zones => {
                let name = self.reference.zone_name(id).unwrap_or_default().to_string();
                self.modal = Some(Modal::confirm(
                    format!("Are you sure you want to delete zone '{}'?", name),
                    Command::DeleteZone { id, name },
                ));
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, step: isize) {
        let active = self.tabs.active();
        let len = self.table(active).map(|t| t.data_len()).unwrap_or(0) as isize;
        if len == 0 {
            return;
        }
        let slot = &mut self.selection[active.index()];
        *slot = (*slot as isize + step).rem_euclid(len) as usize;
    }

    fn clamp_selection(&mut self, tab: Tab) {
        let len = self.table(tab).map(|t| t.data_len()).unwrap_or(0);
        let slot = &mut self.selection[tab.index()];
        *slot = (*slot).min(len.saturating_sub(1));
    }

    // =========================================================================
    // OUTCOMES
    // =========================================================================

    /// Fold a command's outcome into the state. Returns follow-up commands.
    ///
    /// Every failure becomes exactly one danger alert.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Objects(Ok(objects)) => {
                self.objects_view = objects_table(&objects);
                self.objects = objects;
                self.clamp_selection(Tab::Objects);
                self.mark_refreshed();
            }
            Outcome::Objects(Err(e)) => self.alerts.danger(format!("Error loading objects: {}", e)),

            Outcome::Zones(Ok(zones)) => {
                self.reference.zones = zones;
                self.rebuild_zones();
            }
            Outcome::Zones(Err(e)) => self.alerts.danger(format!("Error loading zones: {}", e)),

            Outcome::History(Ok(history)) => {
                self.history_view = history_table(&history);
                self.history = history;
                self.clamp_selection(Tab::History);
                self.mark_refreshed();
            }
            Outcome::History(Err(e)) => self.alerts.danger(format!("Error loading history: {}", e)),

            Outcome::Reference(Ok(reference)) => {
                self.reference = reference;
                self.rebuild_zones();
            }
            Outcome::Reference(Err(e)) => self.alerts.danger(format!("Error loading data: {}", e)),

            Outcome::ObjectForEdit(Ok(object)) => {
                self.raise_modal(Modal::Form(Form::edit_object(&self.reference, &object)));
            }
            Outcome::ObjectForEdit(Err(e)) => {
                self.alerts.danger(format!("Error loading object details: {}", e))
            }

            Outcome::ObjectCreated(Ok(_)) => {
                self.alerts.success("Object added successfully");
                return vec![Command::Reload(Tab::Objects)];
            }
            Outcome::ObjectCreated(Err(e)) => self.alerts.danger(format!("Error: {}", e)),

            Outcome::ObjectUpdated(Ok(_)) => {
                self.alerts.success("Object updated successfully");
                return vec![Command::Reload(Tab::Objects)];
            }
            Outcome::ObjectUpdated(Err(e)) => {
                self.alerts.danger(format!("Error updating object: {}", e))
            }

            Outcome::ObjectDeleted { id, name, result } => match result {
                Ok(()) => {
                    self.alerts.success("Object deleted successfully");
                    self.raise_modal(Modal::Form(Form::delete_comment(id, &name)));
                    return vec![Command::Reload(Tab::Objects)];
                }
                Err(e) if e.is_not_found() => {
                    self.alerts.info(format!("Object '{}' was already deleted", name));
                    return vec![Command::Reload(Tab::Objects)];
                }
                Err(e) => self.alerts.danger(format!("Error deleting object: {}", e)),
            },

            Outcome::HistoryAdded(Ok(_)) => {
                if self.tabs.active() == Tab::History {
                    return vec![Command::Reload(Tab::History)];
                }
            }
            Outcome::HistoryAdded(Err(e)) => self.alerts.danger(format!("Error saving history: {}", e)),

            Outcome::ZoneCreated(Ok(_)) => {
                self.alerts.success("Zone added successfully");
                return vec![Command::Reload(Tab::Zones)];
            }
            Outcome::ZoneCreated(Err(e)) => self.alerts.danger(format!("Error adding zone: {}", e)),

            Outcome::ZoneDeleted { id, name, result } => match result {
                Ok(()) => {
                    self.alerts.success("Zone deleted successfully");
                    return vec![
                        Command::AddHistory(NewHistoryEntry {
                            object_id: None,
                            zone_id: Some(id),
                            action_type: ActionType::Delete,
                            comment: None,
                        }),
                        Command::Reload(Tab::Zones),
                    ];
                }
                Err(e) if e.is_not_found() => {
                    self.alerts.info(format!("Zone '{}' was already deleted", name));
                    return vec![Command::Reload(Tab::Zones)];
                }
                Err(e) => self.alerts.danger(format!("Error deleting zone: {}", e)),
            },

            Outcome::CategoryCreated(Ok(_)) => {
                self.alerts.success("Category added successfully");
                return vec![Command::LoadReference];
            }
            Outcome::CategoryCreated(Err(e)) => {
                self.alerts.danger(format!("Error adding category: {}", e))
            }

            Outcome::BulkDeleted { scope, result } => match result {
                Ok(response) => {
                    let what = match scope {
                        BulkScope::All => "All objects",
                        BulkScope::Zone(_) => "Zone objects",
                        BulkScope::Category(_) => "Category objects",
                    };
                    self.alerts.success(format!(
                        "{} deleted successfully ({} removed)",
                        what, response.deleted
                    ));
                    return vec![Command::Reload(Tab::Objects)];
                }
                Err(e) => self.alerts.danger(format!("Error: {}", e)),
            },
        }
        Vec::new()
    }

    fn rebuild_zones(&mut self) {
        self.zones_view = zones_table(&self.reference.zones);
        self.clamp_selection(Tab::Zones);
        self.mark_refreshed();
    }

    fn mark_refreshed(&mut self) {
        self.last_refresh = Some(Local::now());
    }
}
