//! Store behaviour tests: chats, work directories and locale

use parley::chat::{ChatStore, Role};
use parley::chat::mock::seed_chats;
use parley::directories::{DirectoryRegistry, DirectoryUpdate};
use parley::i18n::{resolve_direction, Direction, Language, LocaleState};
use parley::ParleyError;
use chrono::Utc;

#[test]
fn test_messages_kept_in_call_order() {
    let mut store = ChatStore::new();
    store.create_chat();

    let contents: Vec<String> = (0..25).map(|i| format!("message {}", i)).collect();
    for (i, content) in contents.iter().enumerate() {
        let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert!(store.add_message(content.as_str(), role).is_some());
    }

    let chat = store.current_chat().unwrap();
    assert_eq!(chat.message_count(), 25);
    let stored: Vec<&str> = chat.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(stored, contents.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_merge_concatenates_with_single_marker() {
    let mut store = ChatStore::with_chats(seed_chats(Utc::now()));
    let current = store.current_chat().unwrap().clone();
    let previous = store
        .chats()
        .iter()
        .find(|c| c.title == "Second Chat")
        .unwrap()
        .clone();

    let notice = store.add_previous_chat_to_current(previous.id).unwrap();
    assert_eq!(
        notice,
        "Successfully added \"Second Chat\" to the current chat."
    );

    let merged = store.current_chat().unwrap();
    assert_eq!(merged.id, current.id);
    assert_eq!(merged.title, "First Chat + Second Chat");

    let expected: Vec<&str> = current
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .chain(std::iter::once("--- Previous chat \"Second Chat\" added ---"))
        .chain(previous.messages.iter().map(|m| m.content.as_str()))
        .collect();
    let actual: Vec<&str> = merged.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(actual, expected);
    assert_eq!(merged.messages.iter().filter(|m| m.is_system()).count(), 1);

    // The previous chat is left alone
    assert_eq!(store.get(previous.id).unwrap(), &previous);
    assert_eq!(store.len(), 3);
}

#[test]
fn test_merge_without_current_chat_is_noop() {
    let mut chats = seed_chats(Utc::now());
    let id = chats[1].id;
    chats.clear();
    let mut store = ChatStore::with_chats(chats);

    assert!(store.add_previous_chat_to_current(id).is_none());
    assert!(store.add_message("lost", Role::User).is_none());
    assert!(!store.switch_chat(id));
}

#[test]
fn test_duplicate_directory_rejected() {
    let mut registry = DirectoryRegistry::new();

    assert!(registry.add_directory("/work/site", Some("Site")).is_ok());
    let err = registry.add_directory("/work/site", Some("Other")).unwrap_err();

    assert_eq!(err, ParleyError::DuplicateDirectory("/work/site".to_string()));
    assert_eq!(err.user_message(), "Directory already exists");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.directories()[0].name, "Site");
}

#[test]
fn test_remove_unknown_directory_is_noop() {
    let mut registry = DirectoryRegistry::new();
    registry.add_directory("/work/a", None).unwrap();
    let before = registry.directories().to_vec();

    assert!(registry.remove_directory(uuid::Uuid::new_v4()).is_none());
    assert_eq!(registry.directories(), before.as_slice());
}

#[test]
fn test_update_then_readd_old_path() {
    let mut registry = DirectoryRegistry::new();
    let id = registry.add_directory("/work/old", None).unwrap().id;

    assert_eq!(
        registry.update_directory(id, DirectoryUpdate::path("/work/new")),
        Ok(true)
    );
    // The old path is free again
    assert!(registry.add_directory("/work/old", None).is_ok());
    assert_eq!(registry.get(id).unwrap().path, "/work/new");
}

#[test]
fn test_locale_direction_round_trip() {
    assert_eq!(resolve_direction("he"), Direction::Rtl);
    assert_eq!(resolve_direction("en"), Direction::Ltr);

    let mut locale = LocaleState::new(Language::English);
    let changes = locale.subscribe();

    for _ in 0..3 {
        locale.set_language(Language::Hebrew);
        assert_eq!(locale.direction().as_str(), "rtl");
    }
    for _ in 0..3 {
        locale.set_language(Language::English);
        assert_eq!(locale.direction().as_str(), "ltr");
    }

    assert_eq!(changes.try_iter().count(), 2);
}
