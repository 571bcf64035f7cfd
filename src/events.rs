use alloy::primitives::{Address, B256, U256};

use crate::data::ReadCall;
use crate::data::types::{
    Achievement, Course, Goal, Note, RecordKind, WriteCall, WriteStatus,
};

/// Views the user can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Section(RecordKind),
}

impl View {
    /// Header tab index; the landing view has none.
    pub fn tab_index(&self) -> Option<usize> {
        match self {
            View::Landing => None,
            View::Section(kind) => RecordKind::ALL.iter().position(|k| k == kind),
        }
    }

    /// What is actually drawn: record lists need an account, so without one
    /// the landing view stands in for every section.
    pub fn visible(self, account: Option<Address>) -> View {
        match account {
            Some(_) => self,
            None => View::Landing,
        }
    }
}

/// Events sent from background data tasks and components to the main app loop
#[derive(Debug)]
pub enum AppEvent {
    // Session
    Connected(u64), // chain_id
    AccountConnected(Address),
    WalletError(String),

    // Reads, tagged with the account they were made for
    CoursesLoaded { account: Address, records: Vec<Course> },
    NotesLoaded { account: Address, records: Vec<Note> },
    AchievementsLoaded { account: Address, records: Vec<Achievement> },
    GoalsLoaded { account: Address, records: Vec<Goal> },
    EntryFeeLoaded(U256),
    ReadFailed { read: ReadCall, message: String },

    // Writes
    Submit(WriteCall),
    WriteStatusChanged { kind: RecordKind, status: WriteStatus },
    WriteSettled { kind: RecordKind, hash: B256 },

    // Status
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_always_shows_landing() {
        for kind in RecordKind::ALL {
            assert_eq!(View::Section(kind).visible(None), View::Landing);
        }
    }

    #[test]
    fn test_connected_shows_selected_section() {
        let account = Some(Address::from_slice(&[0x09; 20]));
        assert_eq!(
            View::Section(RecordKind::Note).visible(account),
            View::Section(RecordKind::Note)
        );
    }

    #[test]
    fn test_tab_index() {
        assert_eq!(View::Landing.tab_index(), None);
        assert_eq!(View::Section(RecordKind::Course).tab_index(), Some(0));
        assert_eq!(View::Section(RecordKind::Goal).tab_index(), Some(3));
    }
}
