use crate::{
    api::{TaskApi, TaskClient},
    libs::{
        config::Config,
        formatter::parse_deadline,
        messages::Message,
        task::NewTask,
        view::{TaskItemView, TaskListView, View},
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Order by deadline
    #[arg(short, long, conflicts_with = "due_today")]
    sorted: bool,
    /// Only tasks due before the end of today
    #[arg(short, long)]
    due_today: bool,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    title: String,
    #[arg(short, long, default_value = "")]
    description: String,
    /// Deadline as "YYYY-MM-DD HH:MM" local time
    #[arg(long)]
    due: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    id: i64,
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    /// New deadline as "YYYY-MM-DD HH:MM" local time
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<String>,
    /// Remove the deadline
    #[arg(long)]
    clear_due: bool,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    id: i64,
}

fn client() -> Result<TaskClient> {
    let settings = Config::load()?.client_settings();
    Ok(TaskClient::new(&settings.base_url))
}

pub async fn list(args: ListArgs) -> Result<()> {
    let client = client()?;
    let mut view = TaskListView::new(&client, Vec::new());

    let header = if args.sorted {
        view.sort().await?;
        Message::TasksSortedHeader
    } else if args.due_today {
        view.limit().await?;
        Message::TasksDueTodayHeader
    } else {
        view.all().await?;
        Message::TasksHeader
    };

    if view.tasks().is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    msg_print!(header, true);
    View::tasks(view.tasks());
    Ok(())
}

pub async fn add(args: AddArgs) -> Result<()> {
    let due = args.due.as_deref().map(parse_deadline).transpose()?;
    let client = client()?;
    let mut view = TaskListView::new(&client, Vec::new());

    view.open_form();
    *view.draft_mut() = NewTask::new(&args.title, &args.description, due);
    let task = view.submit().await?;

    msg_success!(Message::TaskCreatedWithId(task.id));
    View::tasks(view.tasks());
    Ok(())
}

pub async fn edit(args: EditArgs) -> Result<()> {
    if args.title.is_none() && args.description.is_none() && args.due.is_none() && !args.clear_due {
        msg_warning!(Message::NoChangesRequested);
        return Ok(());
    }
    let due = args.due.as_deref().map(parse_deadline).transpose()?;

    let client = client()?;
    let mut item = find(&client, args.id).await?;

    item.open_modal();
    let draft = item.draft_mut();
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if due.is_some() || args.clear_due {
        draft.completed_at = due;
    }
    item.save().await?;

    msg_success!(Message::TaskUpdatedWithId(args.id));
    View::tasks(std::slice::from_ref(item.task()));
    Ok(())
}

pub async fn toggle(args: IdArgs) -> Result<()> {
    let client = client()?;
    let mut item = find(&client, args.id).await?;

    item.toggle_complete().await?;

    msg_success!(Message::TaskToggled {
        id: args.id,
        completed: item.task().completed,
    });
    Ok(())
}

pub async fn delete(args: IdArgs) -> Result<()> {
    let client = client()?;
    let mut item = find(&client, args.id).await?;

    item.delete().await?;

    msg_success!(Message::TaskDeletedWithId(args.id));
    Ok(())
}

async fn find<A: TaskApi>(api: &A, id: i64) -> Result<TaskItemView<'_, A>> {
    let list = TaskListView::load(api).await?;
    match list.item(id) {
        Some(item) => Ok(item),
        None => msg_bail_anyhow!(Message::TaskNotFoundWithId(id)),
    }
}
