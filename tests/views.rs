#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use chrono::{Duration, TimeZone, Utc};
    use parking_lot::Mutex;
    use tasklist::api::TaskApi;
    use tasklist::libs::task::{NewTask, Task, TaskPatch};
    use tasklist::libs::view::{TaskItemView, TaskListView, View};

    /// In-memory stand-in for the HTTP service.
    #[derive(Default)]
    struct FakeApi {
        tasks: Mutex<Vec<Task>>,
        patches: Mutex<Vec<TaskPatch>>,
        offline: Mutex<bool>,
    }

    impl FakeApi {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            FakeApi {
                tasks: Mutex::new(tasks),
                ..Default::default()
            }
        }

        fn go_offline(&self) {
            *self.offline.lock() = true;
        }

        fn check(&self) -> Result<()> {
            if *self.offline.lock() {
                bail!("connection refused");
            }
            Ok(())
        }

        fn stored(&self, id: i64) -> Option<Task> {
            self.tasks.lock().iter().find(|t| t.id == id).cloned()
        }
    }

    impl TaskApi for FakeApi {
        async fn all_tasks(&self) -> Result<Vec<Task>> {
            self.check()?;
            Ok(self.tasks.lock().clone())
        }

        async fn sorted_tasks(&self) -> Result<Vec<Task>> {
            self.check()?;
            let mut tasks = self.tasks.lock().clone();
            tasks.sort_by_key(|t| (t.completed_at, t.id));
            Ok(tasks)
        }

        async fn due_today(&self) -> Result<Vec<Task>> {
            self.check()?;
            let limit = Utc::now() + Duration::hours(1);
            Ok(self.tasks.lock().iter().filter(|t| t.completed_at.is_some_and(|d| d < limit)).cloned().collect())
        }

        async fn create_task(&self, task: &NewTask) -> Result<Task> {
            self.check()?;
            let mut tasks = self.tasks.lock();
            let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let stored = Task {
                id,
                title: task.title.clone(),
                description: task.description.clone(),
                created_at: task.created_at,
                completed_at: task.completed_at,
                completed: task.completed,
            };
            tasks.push(stored.clone());
            Ok(stored)
        }

        async fn update_task(&self, patch: &TaskPatch) -> Result<Option<Task>> {
            self.patches.lock().push(patch.clone());
            self.check()?;
            let mut tasks = self.tasks.lock();
            Ok(tasks.iter_mut().find(|t| t.id == patch.id).map(|task| {
                patch.apply(task);
                task.clone()
            }))
        }

        async fn delete_task(&self, id: i64) -> Result<Option<Task>> {
            self.check()?;
            let mut tasks = self.tasks.lock();
            let position = tasks.iter().position(|t| t.id == id);
            Ok(position.map(|index| tasks.remove(index)))
        }
    }

    fn task(id: i64, title: &str, due_in_days: Option<i64>) -> Task {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            created_at,
            completed_at: due_in_days.map(|days| Utc::now() + Duration::days(days)),
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_submit_appends_stored_row_and_resets_draft() {
        let api = FakeApi::with_tasks(vec![task(7, "Existing", None)]);
        let mut list = TaskListView::load(&api).await.unwrap();

        list.open_form();
        assert!(list.is_form_open());
        list.draft_mut().title = "Buy milk".to_string();
        list.draft_mut().description = "2%".to_string();
        let created = list.submit().await.unwrap().clone();

        assert_eq!(created.id, 8);
        assert_eq!(api.stored(8), Some(created.clone()));
        assert_eq!(list.tasks().last(), Some(&created));
        assert!(!list.is_form_open());
        assert_eq!(list.draft().title, "");
        assert_eq!(list.draft().description, "");
        assert_eq!(list.draft().completed_at, None);
        assert!(!list.draft().completed);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        let api = FakeApi::default();
        let mut list = TaskListView::new(&api, Vec::new());
        list.open_form();
        list.draft_mut().title = "Offline task".to_string();

        api.go_offline();
        assert!(list.submit().await.is_err());

        assert!(list.tasks().is_empty());
        assert_eq!(list.draft().title, "Offline task");
        assert!(!list.is_form_open());
    }

    #[tokio::test]
    async fn test_sort_limit_and_all_replace_the_list() {
        let api = FakeApi::with_tasks(vec![
            task(1, "later", Some(10)),
            task(2, "overdue", Some(-1)),
            task(3, "no deadline", None),
        ]);
        let mut list = TaskListView::load(&api).await.unwrap();

        list.sort().await.unwrap();
        let titles: Vec<&str> = list.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["no deadline", "overdue", "later"]);

        list.limit().await.unwrap();
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].title, "overdue");

        list.all().await.unwrap();
        assert_eq!(list.tasks().len(), 3);
    }

    #[tokio::test]
    async fn test_toggle_sends_only_completed_flag() {
        let api = FakeApi::with_tasks(vec![task(1, "Walk dog", None)]);
        let mut item = TaskItemView::new(&api, api.stored(1).unwrap());

        item.toggle_complete().await.unwrap();

        assert!(item.task().completed);
        assert!(api.stored(1).unwrap().completed);
        assert_eq!(*api.patches.lock(), vec![TaskPatch::completed(1, true)]);

        item.toggle_complete().await.unwrap();
        assert!(!item.task().completed);
    }

    #[tokio::test]
    async fn test_toggle_is_not_rolled_back_on_failure() {
        let api = FakeApi::with_tasks(vec![task(1, "Walk dog", None)]);
        let mut item = TaskItemView::new(&api, api.stored(1).unwrap());

        api.go_offline();
        assert!(item.toggle_complete().await.is_err());
        assert!(item.task().completed);
        assert!(!api.stored(1).unwrap().completed);
    }

    #[tokio::test]
    async fn test_save_adopts_stored_row() {
        let api = FakeApi::with_tasks(vec![task(1, "Draft report", Some(2))]);
        let list = TaskListView::load(&api).await.unwrap();
        let mut item = list.item(1).unwrap();

        item.open_modal();
        assert!(item.is_modal_open());
        item.draft_mut().title = "Final report".to_string();
        item.draft_mut().completed_at = None;
        item.save().await.unwrap();

        assert!(!item.is_modal_open());
        assert_eq!(item.task(), &api.stored(1).unwrap());
        assert_eq!(item.task().title, "Final report");
        assert_eq!(item.task().completed_at, None);

        let sent = api.patches.lock().last().cloned().unwrap();
        assert_eq!(sent, TaskPatch::from_task(item.draft()));
    }

    #[tokio::test]
    async fn test_save_of_vanished_task_keeps_draft() {
        let api = FakeApi::with_tasks(vec![task(1, "Gone soon", None)]);
        let mut item = TaskItemView::new(&api, api.stored(1).unwrap());
        api.delete_task(1).await.unwrap();

        item.open_modal();
        item.draft_mut().description = "edited".to_string();
        item.save().await.unwrap();

        assert_eq!(item.task().description, "edited");
    }

    #[tokio::test]
    async fn test_delete_hides_even_on_failure() {
        let api = FakeApi::with_tasks(vec![task(1, "Keep", None), task(2, "Remove", None)]);
        let mut item = TaskItemView::new(&api, api.stored(2).unwrap());

        item.delete().await.unwrap();
        assert!(!item.is_visible());
        assert!(api.stored(2).is_none());
        assert!(api.stored(1).is_some());

        let mut other = TaskItemView::new(&api, api.stored(1).unwrap());
        api.go_offline();
        assert!(other.delete().await.is_err());
        assert!(!other.is_visible());
    }

    #[tokio::test]
    async fn test_late_indicator() {
        let api = FakeApi::default();
        let now = Utc::now();
        let overdue = TaskItemView::new(&api, task(1, "Overdue", Some(-1)));
        let upcoming = TaskItemView::new(&api, task(2, "Upcoming", Some(1)));
        let open_ended = TaskItemView::new(&api, task(3, "Open", None));

        assert!(overdue.is_overdue_at(now));
        assert!(!upcoming.is_overdue_at(now));
        assert!(!open_ended.is_overdue_at(now));
    }

    #[test]
    fn test_table_marks_late_tasks() {
        let now = Utc::now();
        let mut done = task(2, "Done", Some(-1));
        done.completed = true;
        let table = View::tasks_at(&[task(1, "Overdue", Some(-1)), done], now).to_string();

        assert!(table.contains("Overdue"));
        assert_eq!(table.matches("(late)").count(), 1);
    }
}
