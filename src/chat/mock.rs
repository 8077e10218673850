//! In-memory seed data shown on first launch

use super::types::{Chat, Message, Role};
use crate::directories::WorkDirectory;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

fn message(content: &str, role: Role, timestamp: DateTime<Utc>) -> Message {
    Message::new(content, role).with_timestamp(timestamp)
}

fn chat(title: &str, messages: Vec<Message>) -> Chat {
    let created_at = messages.first().map(|m| m.timestamp).unwrap_or_else(Utc::now);
    let updated_at = messages.last().map(|m| m.timestamp).unwrap_or(created_at);
    Chat {
        id: Uuid::new_v4(),
        title: title.to_string(),
        messages,
        created_at,
        updated_at,
    }
}

/// Three sample conversations, oldest exchange first within each chat
pub fn seed_chats(now: DateTime<Utc>) -> Vec<Chat> {
    let day = now - Duration::hours(24);
    let half_day = now - Duration::hours(12);
    let quarter_day = now - Duration::hours(6);

    vec![
        chat(
            "First Chat",
            vec![
                message("Hello, how can I help you?", Role::Assistant, day),
                message(
                    "I need help with my project",
                    Role::User,
                    day + Duration::seconds(100),
                ),
            ],
        ),
        chat(
            "Second Chat",
            vec![
                message("What can I do for you today?", Role::Assistant, half_day),
                message(
                    "I want to learn about React",
                    Role::User,
                    half_day + Duration::seconds(100),
                ),
            ],
        ),
        chat(
            "JavaScript Help",
            vec![
                message(
                    "How can I assist you with JavaScript?",
                    Role::Assistant,
                    quarter_day,
                ),
                message(
                    "I need help with async/await",
                    Role::User,
                    quarter_day + Duration::seconds(100),
                ),
                message(
                    "Async/await is a way to handle promises in JavaScript. \
                     Would you like me to explain with examples?",
                    Role::Assistant,
                    quarter_day + Duration::seconds(200),
                ),
            ],
        ),
    ]
}

pub fn seed_directories(now: DateTime<Utc>) -> Vec<WorkDirectory> {
    vec![
        WorkDirectory {
            id: Uuid::new_v4(),
            path: "/home/user/projects/project1".to_string(),
            name: "Project 1".to_string(),
            added_at: now - Duration::hours(24),
        },
        WorkDirectory {
            id: Uuid::new_v4(),
            path: "/home/user/projects/project2".to_string(),
            name: "Project 2".to_string(),
            added_at: now - Duration::hours(12),
        },
    ]
}
