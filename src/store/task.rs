// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task, user-directory and category container.
//!
//! List fetches replace their collection wholesale. Single-item mutations
//! splice into the existing collection by id. Any rejected task list/create/
//! update/delete or category create bounces the client to the login route;
//! state is left exactly as it was, including a stale draft.

use tokio::sync::watch;

use super::{Effect, Route};
use crate::error::ApiError;
use crate::models::{Category, PostTask, ReadTask, User};
use crate::services::ApiClient;

/// Task slice of the application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    pub tasks: Vec<ReadTask>,
    /// Draft being composed; `PostTask::default()` when none
    pub edited_task: PostTask,
    /// Focused task; `ReadTask::default()` when none
    pub selected_task: ReadTask,
    pub users: Vec<User>,
    pub categories: Vec<Category>,
}

/// Remote task-container operations, used to tag rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOp {
    ListTasks,
    ListUsers,
    ListCategories,
    CreateCategory,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl TaskOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskOp::ListTasks => "list_tasks",
            TaskOp::ListUsers => "list_users",
            TaskOp::ListCategories => "list_categories",
            TaskOp::CreateCategory => "create_category",
            TaskOp::CreateTask => "create_task",
            TaskOp::UpdateTask => "update_task",
            TaskOp::DeleteTask => "delete_task",
        }
    }

    /// Whether a failure of this operation sends the client back to login.
    pub fn bounces_on_failure(&self) -> bool {
        !matches!(self, TaskOp::ListUsers | TaskOp::ListCategories)
    }
}

impl std::fmt::Display for TaskOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settled results of task operations, plus local assignments.
#[derive(Debug, Clone)]
pub enum TaskAction {
    SetEditDraft(PostTask),
    SetSelectedTask(ReadTask),
    TasksFetched(Vec<ReadTask>),
    UsersFetched(Vec<User>),
    CategoriesFetched(Vec<Category>),
    CategoryCreated(Category),
    TaskCreated(ReadTask),
    TaskUpdated(ReadTask),
    TaskDeleted(u64),
    Rejected(TaskOp),
}

impl TaskState {
    /// Apply `action` and return the effects the shell must carry out.
    pub fn reduce(&mut self, action: TaskAction) -> Vec<Effect> {
        match action {
            TaskAction::SetEditDraft(draft) => self.edited_task = draft,
            TaskAction::SetSelectedTask(task) => self.selected_task = task,
            TaskAction::TasksFetched(tasks) => self.tasks = tasks,
            TaskAction::UsersFetched(users) => self.users = users,
            TaskAction::CategoriesFetched(categories) => self.categories = categories,
            TaskAction::CategoryCreated(category) => self.categories.push(category),
            TaskAction::TaskCreated(task) => {
                self.tasks.insert(0, task);
                self.edited_task = PostTask::default();
            }
            TaskAction::TaskUpdated(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
                self.clear_drafts();
            }
            TaskAction::TaskDeleted(id) => {
                self.tasks.retain(|t| t.id != id);
                self.clear_drafts();
            }
            TaskAction::Rejected(op) => {
                if op.bounces_on_failure() {
                    return vec![Effect::Navigate(Route::Root)];
                }
            }
        }
        Vec::new()
    }

    fn clear_drafts(&mut self) {
        self.edited_task = PostTask::default();
        self.selected_task = ReadTask::default();
    }

    /// Task with `id`, if loaded.
    pub fn task(&self, id: u64) -> Option<&ReadTask> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// Observable task container backed by the REST API.
///
/// Operations take `&self`: concurrent calls (e.g. a double-clicked delete)
/// are not serialized and the response that resolves last wins.
pub struct TaskStore {
    api: ApiClient,
    state: watch::Sender<TaskState>,
}

impl TaskStore {
    pub fn new(api: ApiClient) -> Self {
        Self::with_state(api, TaskState::default())
    }

    pub fn with_state(api: ApiClient, initial: TaskState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { api, state }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> TaskState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every commit.
    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.state.subscribe()
    }

    pub fn tasks(&self) -> Vec<ReadTask> {
        self.state.borrow().tasks.clone()
    }

    pub fn edited_task(&self) -> PostTask {
        self.state.borrow().edited_task.clone()
    }

    pub fn selected_task(&self) -> ReadTask {
        self.state.borrow().selected_task.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.state.borrow().users.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    /// Commit `action` and return its effects.
    pub fn dispatch(&self, action: TaskAction) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.state.send_modify(|state| effects = state.reduce(action));
        effects
    }

    pub fn set_edit_draft(&self, draft: PostTask) {
        self.dispatch(TaskAction::SetEditDraft(draft));
    }

    pub fn set_selected_task(&self, task: ReadTask) {
        self.dispatch(TaskAction::SetSelectedTask(task));
    }

    pub async fn list_tasks(&self, token: &str) -> Vec<Effect> {
        match self.api.list_tasks(token).await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "Tasks loaded");
                self.dispatch(TaskAction::TasksFetched(tasks))
            }
            Err(e) => self.reject(TaskOp::ListTasks, e),
        }
    }

    pub async fn list_users(&self, token: &str) -> Vec<Effect> {
        match self.api.list_users(token).await {
            Ok(users) => self.dispatch(TaskAction::UsersFetched(users)),
            Err(e) => self.reject(TaskOp::ListUsers, e),
        }
    }

    pub async fn list_categories(&self, token: &str) -> Vec<Effect> {
        match self.api.list_categories(token).await {
            Ok(categories) => self.dispatch(TaskAction::CategoriesFetched(categories)),
            Err(e) => self.reject(TaskOp::ListCategories, e),
        }
    }

    pub async fn create_category(&self, token: &str, name: &str) -> Vec<Effect> {
        match self.api.create_category(token, name).await {
            Ok(category) => self.dispatch(TaskAction::CategoryCreated(category)),
            Err(e) => self.reject(TaskOp::CreateCategory, e),
        }
    }

    pub async fn create_task(&self, token: &str, draft: &PostTask) -> Vec<Effect> {
        match self.api.create_task(token, draft).await {
            Ok(task) => {
                tracing::debug!(task_id = task.id, "Task created");
                self.dispatch(TaskAction::TaskCreated(task))
            }
            Err(e) => self.reject(TaskOp::CreateTask, e),
        }
    }

    pub async fn update_task(&self, token: &str, draft: &PostTask) -> Vec<Effect> {
        match self.api.update_task(token, draft).await {
            Ok(task) => self.dispatch(TaskAction::TaskUpdated(task)),
            Err(e) => self.reject(TaskOp::UpdateTask, e),
        }
    }

    pub async fn delete_task(&self, token: &str, id: u64) -> Vec<Effect> {
        match self.api.delete_task(token, id).await {
            Ok(id) => self.dispatch(TaskAction::TaskDeleted(id)),
            Err(e) => self.reject(TaskOp::DeleteTask, e),
        }
    }

    /// Commit the failure of `op`, logging `err`.
    pub fn reject(&self, op: TaskOp, err: ApiError) -> Vec<Effect> {
        tracing::warn!(
            operation = %op,
            error = %err,
            session_error = err.is_session_error(),
            bounce = op.bounces_on_failure(),
            "Task operation rejected"
        );
        self.dispatch(TaskAction::Rejected(op))
    }
}
