//! Tabs and the controller that owns the active one.

/// Console tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Objects,
    Zones,
    History,
    Bulk,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Objects, Tab::Zones, Tab::History, Tab::Bulk];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Objects => "Objects",
            Tab::Zones => "Zones",
            Tab::History => "History",
            Tab::Bulk => "Bulk Operations",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Objects => 0,
            Tab::Zones => 1,
            Tab::History => 2,
            Tab::Bulk => 3,
        }
    }

    /// Tab bound to a number key ('1'-'4').
    pub fn from_key(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        Tab::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn next(&self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Owns the active tab.
///
/// Every activation path goes through [`TabController::activate`], which
/// reports the tab to reload only when the active tab actually changed.
#[derive(Debug, Clone)]
pub struct TabController {
    active: Tab,
}

impl Default for TabController {
    fn default() -> Self {
        Self::new()
    }
}

impl TabController {
    pub fn new() -> Self {
        Self { active: Tab::Objects }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Switch to `tab`. Returns `Some(tab)` if it needs a reload.
    pub fn activate(&mut self, tab: Tab) -> Option<Tab> {
        if tab == self.active {
            return None;
        }
        self.active = tab;
        Some(tab)
    }

    pub fn next(&mut self) -> Option<Tab> {
        self.activate(self.active.next())
    }

    pub fn prev(&mut self) -> Option<Tab> {
        self.activate(self.active.prev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_reports_change_once() {
        let mut tabs = TabController::new();

        assert_eq!(tabs.activate(Tab::History), Some(Tab::History));
        assert_eq!(tabs.activate(Tab::History), None);
        assert_eq!(tabs.active(), Tab::History);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut tabs = TabController::new();
        assert_eq!(tabs.prev(), Some(Tab::Bulk));
        assert_eq!(tabs.next(), Some(Tab::Objects));
    }

    #[test]
    fn test_number_keys() {
        assert_eq!(Tab::from_key('1'), Some(Tab::Objects));
        assert_eq!(Tab::from_key('4'), Some(Tab::Bulk));
        assert_eq!(Tab::from_key('0'), None);
        assert_eq!(Tab::from_key('5'), None);
        assert_eq!(Tab::from_key('x'), None);
    }
}
