use serde::{Deserialize, Serialize};

// 出勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Enrolled,
    Attended,
    Missed,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Enrolled => write!(f, "enrolled"),
            AttendanceStatus::Attended => write!(f, "attended"),
            AttendanceStatus::Missed => write!(f, "missed"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enrolled" => Ok(AttendanceStatus::Enrolled),
            "attended" => Ok(AttendanceStatus::Attended),
            "missed" => Ok(AttendanceStatus::Missed),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub attendance_status: AttendanceStatus,
}
