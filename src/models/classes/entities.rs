use serde::{Deserialize, Serialize};

// 课程状态：scheduled -> live -> completed，不可回退
//
// 目前没有任何操作会把课程置为 completed（没有“结束课程”操作）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    Scheduled, // 已排课
    Live,      // 直播中
    Completed, // 已结束
}

impl std::fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassStatus::Scheduled => write!(f, "scheduled"),
            ClassStatus::Live => write!(f, "live"),
            ClassStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for ClassStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(ClassStatus::Scheduled),
            "live" => Ok(ClassStatus::Live),
            "completed" => Ok(ClassStatus::Completed),
            _ => Err(format!("Invalid class status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    // 课程ID
    pub id: i64,
    // 课程标题
    pub title: String,
    // 课程描述
    pub description: Option<String>,
    // 授课教师ID
    pub teacher_id: i64,
    // 计划开课时间
    pub scheduled_time: chrono::DateTime<chrono::Utc>,
    // 时长（分钟）
    pub duration_minutes: i32,
    pub is_live: bool,
    pub status: ClassStatus,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
