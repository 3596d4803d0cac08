//
//  toloka-client
//  api/common/status.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Status enumerations shared with the platform.
//!
//! Every variant serializes to the exact string the platform uses, so values
//! round-trip unchanged through requests and responses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares a string-valued platform enum with `as_str` and `Display`.
macro_rules! platform_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// The platform's string for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

platform_enum! {
    /// Lifecycle status of an assignment.
    AssignmentStatus {
        Active => "ACTIVE",
        Submitted => "SUBMITTED",
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
        Skipped => "SKIPPED",
        Expired => "EXPIRED",
    }
}

platform_enum! {
    /// Status of a pool.
    PoolStatus {
        Open => "OPEN",
        Closed => "CLOSED",
        Archived => "ARCHIVED",
    }
}

platform_enum! {
    /// Kind of pool.
    PoolType {
        Regular => "REGULAR",
        Training => "TRAINING",
    }
}

platform_enum! {
    /// Status of a task as reported in worker-facing listings.
    TaskStatus {
        InProgress => "IN_PROGRESS",
        Accepted => "ACCEPTED",
        Active => "ACTIVE",
        Expired => "EXPIRED",
        Rejected => "REJECTED",
        Skipped => "SKIPPED",
        Submitted => "SUBMITTED",
    }
}

platform_enum! {
    /// Date fields an assignment listing can be filtered by.
    TaskDateTag {
        Created => "created",
        Accepted => "accepted",
        Expired => "expired",
        Rejected => "rejected",
        Skipped => "skipped",
        Submitted => "submitted",
    }
}

platform_enum! {
    /// Outcome of looking up a worker's assignment for a task.
    TaskAssignmentResult {
        Found => "FOUND",
        NotFound => "NOT_FOUND",
    }
}

platform_enum! {
    /// Ban state of a worker.
    BanStatus {
        NotBanned => "NOT_BANNED",
        ProjectBan => "PROJECT_BAN",
        SystemBan => "SYSTEM_BAN",
        RequesterBan => "REQUESTER_BAN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_status_round_trip() {
        let json = serde_json::to_string(&AssignmentStatus::Accepted).unwrap();
        assert_eq!(json, "\"ACCEPTED\"");
        let parsed: AssignmentStatus = serde_json::from_str("\"EXPIRED\"").unwrap();
        assert_eq!(parsed, AssignmentStatus::Expired);
    }

    #[test]
    fn test_date_tags_are_lowercase() {
        assert_eq!(TaskDateTag::Submitted.as_str(), "submitted");
        assert_eq!(TaskStatus::InProgress.to_string(), "IN_PROGRESS");
    }

    #[test]
    fn test_unknown_pool_status_is_rejected() {
        assert!(serde_json::from_str::<PoolStatus>("\"DELETED\"").is_err());
        assert_eq!(
            serde_json::from_str::<PoolType>("\"TRAINING\"").unwrap(),
            PoolType::Training
        );
    }
}
