use std::collections::HashSet;

use taskboard_core::db::open_db_in_memory;
use taskboard_core::{RepoError, SqliteTaskRepository, TaskService, TaskValidationError};

fn service() -> TaskService<SqliteTaskRepository> {
    TaskService::new(SqliteTaskRepository::new(open_db_in_memory().unwrap()))
}

#[test]
fn list_is_sorted_by_ascending_id_for_any_insertion_order() {
    let service = service();
    for title in ["zeta", "alpha", "mid", "beta"] {
        service.create_task(title).unwrap();
    }

    let ids: Vec<_> = service
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn create_yields_incomplete_task_with_fresh_id_visible_in_list() {
    let service = service();
    let mut seen = HashSet::new();

    for title in ["one", "two", "three"] {
        let task = service.create_task(title).unwrap();
        assert!(!task.completed);
        assert!(seen.insert(task.id), "id {} was reused", task.id);
        assert!(service.list_tasks().unwrap().contains(&task));
    }
}

#[test]
fn create_with_blank_title_is_rejected_and_writes_nothing() {
    let service = service();

    for title in ["", "   ", "\t\n"] {
        let err = service.create_task(title).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(TaskValidationError::EmptyTitle)
        ));
    }
    assert!(service.list_tasks().unwrap().is_empty());
}

#[test]
fn toggle_flips_exactly_one_task_and_twice_restores_it() {
    let service = service();
    let target = service.create_task("target").unwrap();
    let other = service.create_task("other").unwrap();

    service.set_completed(target.id, !target.completed).unwrap();
    let after_first = service.list_tasks().unwrap();
    assert!(after_first.iter().find(|t| t.id == target.id).unwrap().completed);
    assert_eq!(after_first.iter().find(|t| t.id == other.id).unwrap(), &other);

    service.set_completed(target.id, target.completed).unwrap();
    assert_eq!(service.get_task(target.id).unwrap().unwrap(), target);
}

#[test]
fn delete_removes_exactly_one_task() {
    let service = service();
    let keep = service.create_task("keep").unwrap();
    let drop_me = service.create_task("drop").unwrap();

    assert_eq!(service.delete_task(drop_me.id).unwrap(), 1);
    assert_eq!(service.list_tasks().unwrap(), vec![keep]);
}

#[test]
fn update_and_delete_of_missing_id_are_silent_no_ops() {
    let service = service();
    let task = service.create_task("only").unwrap();

    assert_eq!(service.set_completed(task.id + 1, true).unwrap(), 0);
    assert_eq!(service.delete_task(task.id + 1).unwrap(), 0);
    assert_eq!(service.list_tasks().unwrap(), vec![task]);
}

#[test]
fn buy_milk_scenario() {
    let service = service();

    let task = service.create_task("Buy milk").unwrap();
    let listed = service.list_tasks().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Buy milk");
    assert!(!listed[0].completed);

    service.set_completed(task.id, true).unwrap();
    assert!(service.list_tasks().unwrap()[0].completed);

    service.delete_task(task.id).unwrap();
    assert!(service.list_tasks().unwrap().is_empty());
}
