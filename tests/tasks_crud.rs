#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use tasklist::db::tasks::Tasks;
    use tasklist::libs::task::{NewTask, TaskFilter, TaskPatch};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        temp_dir: TempDir,
        tasks: Tasks,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let tasks = Tasks::open(temp_dir.path().join("tasks.db")).unwrap();
            TaskTestContext {
                temp_dir,
                tasks,
            }
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_created_task_is_listed_once(ctx: &mut TaskTestContext) {
        let due = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        let created = ctx.tasks.insert(&NewTask::new("Buy milk", "2%", Some(due))).unwrap();
        let other = ctx.tasks.insert(&NewTask::new("Walk dog", "", None)).unwrap();
        assert_ne!(created.id, other.id);

        let all = ctx.tasks.fetch(TaskFilter::All).unwrap();
        let matching: Vec<_> = all.iter().filter(|t| t.title == "Buy milk").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0], &created);
        assert_eq!(matching[0].description, "2%");
        assert_eq!(matching[0].completed_at, Some(due));
        assert!(!matching[0].completed);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_sorted_by_deadline(ctx: &mut TaskTestContext) {
        let base = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        for offset in [5, 1, 3] {
            ctx.tasks
                .insert(&NewTask::new(&format!("due +{}", offset), "", Some(base + Duration::days(offset))))
                .unwrap();
        }
        ctx.tasks.insert(&NewTask::new("no deadline", "", None)).unwrap();

        let sorted = ctx.tasks.fetch(TaskFilter::ByDeadline).unwrap();
        assert_eq!(sorted.len(), 4);
        // Missing deadlines come first.
        assert_eq!(sorted[0].title, "no deadline");
        let deadlines: Vec<_> = sorted.iter().filter_map(|t| t.completed_at).collect();
        assert!(deadlines.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_due_before_filter(ctx: &mut TaskTestContext) {
        let limit = Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap();
        ctx.tasks.insert(&NewTask::new("today", "", Some(limit - Duration::hours(2)))).unwrap();
        ctx.tasks.insert(&NewTask::new("tomorrow", "", Some(limit + Duration::hours(2)))).unwrap();
        ctx.tasks.insert(&NewTask::new("someday", "", None)).unwrap();

        let due = ctx.tasks.fetch(TaskFilter::DueBefore(limit)).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "today");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_partial_update_changes_only_given_fields(ctx: &mut TaskTestContext) {
        let due = Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0).unwrap();
        let original = ctx.tasks.insert(&NewTask::new("Original", "Keep me", Some(due))).unwrap();

        let mut patch = TaskPatch::new(original.id);
        patch.title = Some("Renamed".to_string());
        let updated = ctx.tasks.update(&patch).unwrap().unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.completed_at, original.completed_at);
        assert_eq!(updated.completed, original.completed);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_clears_deadline(ctx: &mut TaskTestContext) {
        let due = Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0).unwrap();
        let task = ctx.tasks.insert(&NewTask::new("Deadline", "", Some(due))).unwrap();

        let mut patch = TaskPatch::new(task.id);
        patch.completed_at = Some(None);
        let updated = ctx.tasks.update(&patch).unwrap().unwrap();

        assert_eq!(updated.completed_at, None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_unknown_id_is_noop(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.insert(&NewTask::new("Only one", "", None)).unwrap();

        let result = ctx.tasks.update(&TaskPatch::completed(task.id + 100, true)).unwrap();
        assert!(result.is_none());

        let all = ctx.tasks.fetch(TaskFilter::All).unwrap();
        assert_eq!(all, vec![task]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_is_idempotent(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.insert(&NewTask::new("Temporary", "", None)).unwrap();

        let removed = ctx.tasks.delete(task.id).unwrap();
        assert_eq!(removed, Some(task.clone()));
        assert!(ctx.tasks.get_by_id(task.id).unwrap().is_none());

        // Second delete of the same id still succeeds.
        assert!(ctx.tasks.delete(task.id).unwrap().is_none());
        assert!(ctx.tasks.fetch(TaskFilter::All).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_toggle_delete_scenario(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.insert(&NewTask::new("Buy milk", "", None)).unwrap();
        assert_eq!(ctx.tasks.fetch(TaskFilter::All).unwrap().len(), 1);

        let toggled = ctx.tasks.update(&TaskPatch::completed(task.id, true)).unwrap().unwrap();
        assert!(toggled.completed);
        assert!(ctx.tasks.fetch(TaskFilter::All).unwrap()[0].completed);

        ctx.tasks.delete(task.id).unwrap();
        assert!(ctx.tasks.fetch(TaskFilter::All).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_data_survives_reopen(ctx: &mut TaskTestContext) {
        let path = ctx.temp_dir.path().join("reopen.db");
        let created = {
            let mut tasks = Tasks::open(&path).unwrap();
            tasks.insert(&NewTask::new("Persistent", "", None)).unwrap()
        };

        let mut reopened = Tasks::open(&path).unwrap();
        assert_eq!(reopened.get_by_id(created.id).unwrap(), Some(created));
    }
}
