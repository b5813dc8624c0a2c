use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Fixed activity categories offered to clients.
pub const CATEGORIES: &[Category] = &[
    Category { name: "Sleep", icon: "🛌", color: "#667eea" },
    Category { name: "Physical Activity/Exercise", icon: "🏃‍♂️", color: "#764ba2" },
    Category { name: "Nutrition/Meals", icon: "🍎", color: "#f093fb" },
    Category { name: "Work/Productivity", icon: "💼", color: "#f5576c" },
    Category { name: "Personal Care/Hygiene", icon: "🧼", color: "#4facfe" },
    Category { name: "Social/Leisure", icon: "🎉", color: "#00d4aa" },
    Category { name: "Household Chores/Maintenance", icon: "🧹", color: "#ff6b6b" },
    Category { name: "Mindfulness/Mental Well-being", icon: "🧘‍♀️", color: "#a8e6cf" },
    Category { name: "Transportation/Commute", icon: "🚗", color: "#ffd93d" },
    Category { name: "Learning/Skill Development", icon: "📚", color: "#6c5ce7" },
];

pub fn find(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

pub fn is_known(name: &str) -> bool {
    find(name).is_some()
}

/// `{ "<name>": { "icon": ..., "color": ... }, ... }`
pub fn as_json() -> Value {
    let map: Map<String, Value> = CATEGORIES
        .iter()
        .map(|c| (c.name.to_string(), json!({ "icon": c.icon, "color": c.color })))
        .collect();
    Value::Object(map)
}
