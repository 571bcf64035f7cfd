use alloy::json_abi::JsonAbi;
use alloy::primitives::{Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use color_eyre::eyre::Result;

use crate::data::ReadCall;
use crate::data::types::{Achievement, Course, Goal, Note, WriteCall};

sol! {
    contract Study {
        struct Course {
            uint256 id;
            address owner;
            string title;
            string platform;
            string instructor;
            uint256 progress;
            bool completed;
            uint256 timestamp;
            bool exists;
        }

        struct Note {
            uint256 id;
            address owner;
            string title;
            string content;
            string tags;
            uint256 timestamp;
            bool exists;
        }

        struct Achievement {
            uint256 id;
            address owner;
            string title;
            string description;
            string certificateUrl;
            uint256 timestamp;
            bool exists;
        }

        struct Goal {
            uint256 id;
            address owner;
            string title;
            string description;
            uint256 targetDate;
            bool achieved;
            uint256 timestamp;
            bool exists;
        }

        event CourseAdded(uint256 indexed id, address indexed owner, string title);
        event CourseUpdated(uint256 indexed id, uint256 progress, bool completed);
        event NoteAdded(uint256 indexed id, address indexed owner, string title);
        event AchievementAdded(uint256 indexed id, address indexed owner, string title);
        event GoalAdded(uint256 indexed id, address indexed owner, string title);
        event GoalAchieved(uint256 indexed id, address indexed owner);

        function entryFee() external view returns (uint256);
        function getBalance() external view returns (uint256);

        function getUserCourses(address _user) external view returns (Course[] memory);
        function getUserNotes(address _user) external view returns (Note[] memory);
        function getUserAchievements(address _user) external view returns (Achievement[] memory);
        function getUserGoals(address _user) external view returns (Goal[] memory);

        function addCourse(string _title, string _platform, string _instructor, uint256 _progress) external payable;
        function addNote(string _title, string _content, string _tags) external payable;
        function addAchievement(string _title, string _description, string _certificateUrl) external payable;
        function addGoal(string _title, string _description, uint256 _targetDate) external payable;

        function updateCourseProgress(uint256 _courseId, uint256 _progress) external;
        function markGoalAchieved(uint256 _goalId) external;
    }
}

const STUDY_ABI_JSON: &str = include_str!("../../abis/study.json");

/// The contract's JSON ABI, as published alongside the deployment.
pub fn study_abi() -> Result<JsonAbi> {
    Ok(serde_json::from_str(STUDY_ABI_JSON)?)
}

/// ABI-encode a write call, selector included.
pub fn encode_write(call: &WriteCall) -> Bytes {
    let data = match call {
        WriteCall::AddCourse {
            title,
            platform,
            instructor,
            progress,
        } => Study::addCourseCall {
            _title: title.clone(),
            _platform: platform.clone(),
            _instructor: instructor.clone(),
            _progress: U256::from(*progress),
        }
        .abi_encode(),
        WriteCall::AddNote {
            title,
            content,
            tags,
        } => Study::addNoteCall {
            _title: title.clone(),
            _content: content.clone(),
            _tags: tags.clone(),
        }
        .abi_encode(),
        WriteCall::AddAchievement {
            title,
            description,
            certificate_url,
        } => Study::addAchievementCall {
            _title: title.clone(),
            _description: description.clone(),
            _certificateUrl: certificate_url.clone(),
        }
        .abi_encode(),
        WriteCall::AddGoal {
            title,
            description,
            target_date,
        } => Study::addGoalCall {
            _title: title.clone(),
            _description: description.clone(),
            _targetDate: U256::from(*target_date),
        }
        .abi_encode(),
        WriteCall::UpdateCourseProgress { id, progress } => Study::updateCourseProgressCall {
            _courseId: *id,
            _progress: U256::from(*progress),
        }
        .abi_encode(),
        WriteCall::MarkGoalAchieved { id } => {
            Study::markGoalAchievedCall { _goalId: *id }.abi_encode()
        }
    };
    Bytes::from(data)
}

/// ABI-encode a view call.
pub fn encode_read(read: &ReadCall) -> Bytes {
    let data = match read {
        ReadCall::Courses(user) => Study::getUserCoursesCall { _user: *user }.abi_encode(),
        ReadCall::Notes(user) => Study::getUserNotesCall { _user: *user }.abi_encode(),
        ReadCall::Achievements(user) => {
            Study::getUserAchievementsCall { _user: *user }.abi_encode()
        }
        ReadCall::Goals(user) => Study::getUserGoalsCall { _user: *user }.abi_encode(),
        ReadCall::EntryFee => Study::entryFeeCall {}.abi_encode(),
    };
    Bytes::from(data)
}

pub fn decode_courses(data: &[u8]) -> Result<Vec<Course>> {
    let ret = Study::getUserCoursesCall::abi_decode_returns(data, true)?;
    Ok(ret
        ._0
        .into_iter()
        .filter(|c| c.exists)
        .map(|c| Course {
            id: c.id,
            owner: c.owner,
            title: c.title,
            platform: c.platform,
            instructor: c.instructor,
            progress: c.progress.saturating_to::<u8>().min(100),
            completed: c.completed,
            timestamp: c.timestamp.saturating_to(),
        })
        .collect())
}

pub fn decode_notes(data: &[u8]) -> Result<Vec<Note>> {
    let ret = Study::getUserNotesCall::abi_decode_returns(data, true)?;
    Ok(ret
        ._0
        .into_iter()
        .filter(|n| n.exists)
        .map(|n| Note {
            id: n.id,
            owner: n.owner,
            title: n.title,
            content: n.content,
            tags: n.tags,
            timestamp: n.timestamp.saturating_to(),
        })
        .collect())
}

pub fn decode_achievements(data: &[u8]) -> Result<Vec<Achievement>> {
    let ret = Study::getUserAchievementsCall::abi_decode_returns(data, true)?;
    Ok(ret
        ._0
        .into_iter()
        .filter(|a| a.exists)
        .map(|a| Achievement {
            id: a.id,
            owner: a.owner,
            title: a.title,
            description: a.description,
            certificate_url: a.certificateUrl,
            timestamp: a.timestamp.saturating_to(),
        })
        .collect())
}

pub fn decode_goals(data: &[u8]) -> Result<Vec<Goal>> {
    let ret = Study::getUserGoalsCall::abi_decode_returns(data, true)?;
    Ok(ret
        ._0
        .into_iter()
        .filter(|g| g.exists)
        .map(|g| Goal {
            id: g.id,
            owner: g.owner,
            title: g.title,
            description: g.description,
            target_date: g.targetDate.saturating_to(),
            achieved: g.achieved,
            timestamp: g.timestamp.saturating_to(),
        })
        .collect())
}

pub fn decode_entry_fee(data: &[u8]) -> Result<U256> {
    Ok(Study::entryFeeCall::abi_decode_returns(data, true)?._0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use alloy::sol_types::SolValue;

    fn selector_of(name: &str) -> [u8; 4] {
        let abi = study_abi().unwrap();
        let funcs = abi
            .function(name)
            .unwrap_or_else(|| panic!("{name} missing from ABI"));
        funcs[0].selector().0
    }

    #[test]
    fn test_binding_matches_json_abi() {
        assert_eq!(selector_of("addCourse"), Study::addCourseCall::SELECTOR);
        assert_eq!(selector_of("addNote"), Study::addNoteCall::SELECTOR);
        assert_eq!(selector_of("addAchievement"), Study::addAchievementCall::SELECTOR);
        assert_eq!(selector_of("addGoal"), Study::addGoalCall::SELECTOR);
        assert_eq!(
            selector_of("updateCourseProgress"),
            Study::updateCourseProgressCall::SELECTOR
        );
        assert_eq!(
            selector_of("markGoalAchieved"),
            Study::markGoalAchievedCall::SELECTOR
        );
        assert_eq!(selector_of("getUserCourses"), Study::getUserCoursesCall::SELECTOR);
        assert_eq!(selector_of("getUserGoals"), Study::getUserGoalsCall::SELECTOR);
        assert_eq!(selector_of("entryFee"), Study::entryFeeCall::SELECTOR);
    }

    #[test]
    fn test_json_abi_marks_create_calls_payable() {
        let abi = study_abi().unwrap();
        for name in ["addCourse", "addNote", "addAchievement", "addGoal"] {
            let func = &abi.function(name).unwrap()[0];
            assert_eq!(
                func.state_mutability,
                alloy::json_abi::StateMutability::Payable,
                "{name}"
            );
        }
    }

    #[test]
    fn test_encode_add_course_argument_order() {
        let call = WriteCall::AddCourse {
            title: "Rust in Action".to_string(),
            platform: "Manning".to_string(),
            instructor: "Tim".to_string(),
            progress: 40,
        };
        let data = encode_write(&call);
        assert_eq!(&data[..4], Study::addCourseCall::SELECTOR.as_slice());

        let decoded = Study::addCourseCall::abi_decode(&data, true).unwrap();
        assert_eq!(decoded._title, "Rust in Action");
        assert_eq!(decoded._platform, "Manning");
        assert_eq!(decoded._instructor, "Tim");
        assert_eq!(decoded._progress, U256::from(40));
    }

    #[test]
    fn test_encode_add_goal_target_date() {
        let call = WriteCall::AddGoal {
            title: "Finish book".to_string(),
            description: String::new(),
            target_date: 1_735_689_600,
        };
        let decoded = Study::addGoalCall::abi_decode(&encode_write(&call), true).unwrap();
        assert_eq!(decoded._title, "Finish book");
        assert_eq!(decoded._description, "");
        assert_eq!(decoded._targetDate, U256::from(1_735_689_600u64));
    }

    #[test]
    fn test_encode_mark_goal_achieved() {
        let data = encode_write(&WriteCall::MarkGoalAchieved { id: U256::from(7) });
        let decoded = Study::markGoalAchievedCall::abi_decode(&data, true).unwrap();
        assert_eq!(decoded._goalId, U256::from(7));
    }

    #[test]
    fn test_encode_read_passes_user() {
        let user = Address::from_slice(&[0x11; 20]);
        let data = encode_read(&ReadCall::Notes(user));
        let decoded = Study::getUserNotesCall::abi_decode(&data, true).unwrap();
        assert_eq!(decoded._user, user);
    }

    #[test]
    fn test_decode_goals_drops_missing_records() {
        let owner = Address::from_slice(&[0x22; 20]);
        let live = Study::Goal {
            id: U256::from(1),
            owner,
            title: "Learn alloy".to_string(),
            description: "providers and signers".to_string(),
            targetDate: U256::from(2_000_000_000u64),
            achieved: false,
            timestamp: U256::from(1_700_000_000u64),
            exists: true,
        };
        let deleted = Study::Goal {
            id: U256::from(2),
            owner,
            title: String::new(),
            description: String::new(),
            targetDate: U256::ZERO,
            achieved: false,
            timestamp: U256::ZERO,
            exists: false,
        };
        let data = (vec![live, deleted],).abi_encode_params();

        let goals = decode_goals(&data).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].title, "Learn alloy");
        assert_eq!(goals[0].target_date, 2_000_000_000);
        assert_eq!(goals[0].owner, owner);
    }

    #[test]
    fn test_decode_courses_clamps_progress() {
        let course = Study::Course {
            id: U256::from(1),
            owner: Address::ZERO,
            title: "Algorithms".to_string(),
            platform: String::new(),
            instructor: String::new(),
            progress: U256::from(250),
            completed: true,
            timestamp: U256::from(10),
            exists: true,
        };
        let data = (vec![course],).abi_encode_params();
        let courses = decode_courses(&data).unwrap();
        assert_eq!(courses[0].progress, 100);
        assert!(courses[0].completed);
    }

    #[test]
    fn test_decode_entry_fee() {
        let fee = U256::from(100_000_000_000_000u64);
        let data = fee.abi_encode();
        assert_eq!(decode_entry_fee(&data).unwrap(), fee);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_notes(&[0x01, 0x02]).is_err());
    }
}
