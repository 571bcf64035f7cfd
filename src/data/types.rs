use alloy::primitives::{Address, B256, U256};

/// The four categories of entry stored by the Study contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Course,
    Note,
    Achievement,
    Goal,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Course,
        RecordKind::Note,
        RecordKind::Achievement,
        RecordKind::Goal,
    ];

    /// Section heading shown above the record list.
    pub fn heading(&self) -> &'static str {
        match self {
            RecordKind::Course => "Courses",
            RecordKind::Note => "Study Notes",
            RecordKind::Achievement => "Achievements",
            RecordKind::Goal => "Learning Goals",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Course => write!(f, "Course"),
            RecordKind::Note => write!(f, "Note"),
            RecordKind::Achievement => write!(f, "Achievement"),
            RecordKind::Goal => write!(f, "Goal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: U256,
    pub owner: Address,
    pub title: String,
    pub platform: String,
    pub instructor: String,
    pub progress: u8,
    pub completed: bool,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: U256,
    pub owner: Address,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub timestamp: u64,
}

impl Note {
    /// Tags from the comma-separated tag string, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: U256,
    pub owner: Address,
    pub title: String,
    pub description: String,
    pub certificate_url: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: U256,
    pub owner: Address,
    pub title: String,
    pub description: String,
    pub target_date: u64,
    pub achieved: bool,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalState {
    Achieved,
    Overdue,
    Open,
}

impl Goal {
    pub fn state(&self, now: u64) -> GoalState {
        if self.achieved {
            GoalState::Achieved
        } else if self.target_date < now {
            GoalState::Overdue
        } else {
            GoalState::Open
        }
    }
}

/// Records in display order: the contract returns oldest first, lists show newest first.
pub fn newest_first<T>(records: &[T]) -> Vec<&T> {
    records.iter().rev().collect()
}

/// Whether the connected account owns a record.
///
/// `Address` equality is byte equality, so two hex spellings that differ only
/// in letter case (checksummed vs lowercase) compare equal once parsed.
pub fn is_owner(connected: Option<Address>, owner: Address) -> bool {
    connected.is_some_and(|account| account == owner)
}

/// A state-changing contract call, with its arguments in ABI order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCall {
    AddCourse {
        title: String,
        platform: String,
        instructor: String,
        progress: u8,
    },
    AddNote {
        title: String,
        content: String,
        tags: String,
    },
    AddAchievement {
        title: String,
        description: String,
        certificate_url: String,
    },
    AddGoal {
        title: String,
        description: String,
        target_date: u64,
    },
    UpdateCourseProgress {
        id: U256,
        progress: u8,
    },
    MarkGoalAchieved {
        id: U256,
    },
}

impl WriteCall {
    pub fn kind(&self) -> RecordKind {
        match self {
            WriteCall::AddCourse { .. } | WriteCall::UpdateCourseProgress { .. } => {
                RecordKind::Course
            }
            WriteCall::AddNote { .. } => RecordKind::Note,
            WriteCall::AddAchievement { .. } => RecordKind::Achievement,
            WriteCall::AddGoal { .. } | WriteCall::MarkGoalAchieved { .. } => RecordKind::Goal,
        }
    }

    /// Record-creating calls must carry the entry fee as value.
    pub fn is_payable(&self) -> bool {
        matches!(
            self,
            WriteCall::AddCourse { .. }
                | WriteCall::AddNote { .. }
                | WriteCall::AddAchievement { .. }
                | WriteCall::AddGoal { .. }
        )
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            WriteCall::AddCourse { .. } => "addCourse",
            WriteCall::AddNote { .. } => "addNote",
            WriteCall::AddAchievement { .. } => "addAchievement",
            WriteCall::AddGoal { .. } => "addGoal",
            WriteCall::UpdateCourseProgress { .. } => "updateCourseProgress",
            WriteCall::MarkGoalAchieved { .. } => "markGoalAchieved",
        }
    }
}

/// Lifecycle of the one in-flight write a section may have.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WriteStatus {
    #[default]
    Idle,
    /// Handed to the signer, no hash yet.
    Pending,
    /// Broadcast, waiting for a receipt.
    Confirming(B256),
    /// Receipt observed with success status.
    Confirmed(B256),
    Failed(String),
}

impl WriteStatus {
    /// True while submitting again must be refused.
    pub fn is_busy(&self) -> bool {
        matches!(self, WriteStatus::Pending | WriteStatus::Confirming(_))
    }
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub symbol: String,
    pub explorer_url: Option<String>,
}
