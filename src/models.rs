use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type Timestamp = i64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Human-facing label shown in the task row.
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<Priority>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            background_color: default_background_color(),
        }
    }
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_background_color() -> String {
    // Plain page background; replaced live by the color picker.
    "#FFFFFF".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TasksFile {
    pub schema_version: u32,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SettingsFile {
    pub schema_version: u32,
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.background_color, "#FFFFFF");
    }

    #[test]
    fn settings_serde_applies_defaults_for_missing_fields() {
        let settings: Settings = serde_json::from_str("{}").expect("settings should deserialize");
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.background_color, "#FFFFFF");
    }

    #[test]
    fn priority_serialization_uses_snake_case() {
        let value = serde_json::to_value(Priority::High).expect("serialize priority");
        assert_eq!(value, serde_json::json!("high"));

        let back: Priority = serde_json::from_value(value).expect("deserialize priority");
        assert_eq!(back, Priority::High);
        assert_eq!(back.label(), "High");
    }

    #[test]
    fn task_due_date_and_priority_default_to_none_when_missing() {
        let json = r#"
        {
          "id": 1,
          "title": "task",
          "completed": false,
          "created_at": 1,
          "updated_at": 1
        }
        "#;

        let task: Task = serde_json::from_str(json).expect("task should deserialize");
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, None);
    }

    #[test]
    fn task_round_trips_field_for_field() {
        let task = Task {
            id: 7,
            title: "buy milk".to_string(),
            completed: true,
            due_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            priority: Some(Priority::Medium),
            created_at: 100,
            updated_at: 200,
        };

        let json = serde_json::to_string(&task).expect("serialize task");
        let back: Task = serde_json::from_str(&json).expect("deserialize task");
        assert_eq!(back, task);
    }
}
