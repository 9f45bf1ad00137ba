// Bulk task operations used by the task list's multi-select bar

use super::{EntityAction, Store};
use crate::domain::task::{Task, TaskStatus};

impl Store {
    /// Marks the given tasks completed
    ///
    /// Reads the current list, rewrites the matching entries and submits the
    /// whole list back. Returns how many tasks matched.
    pub fn complete_many(&mut self, ids: &[String]) -> usize {
        self.rewrite_tasks(ids, |task| task.status = TaskStatus::Completed)
    }

    /// Reassigns the given tasks to one user
    ///
    /// The user id is not checked against the users collection.
    pub fn assign_many(&mut self, ids: &[String], user_id: &str) -> usize {
        self.rewrite_tasks(ids, |task| task.assigned_to = user_id.to_string())
    }

    /// Deletes the given tasks one by one
    pub fn delete_many(&mut self, ids: &[String]) -> usize {
        let before = self.tasks().len();
        for id in ids {
            self.dispatch(EntityAction::<Task>::Delete(id.clone()));
        }
        before - self.tasks().len()
    }

    fn rewrite_tasks(&mut self, ids: &[String], mut edit: impl FnMut(&mut Task)) -> usize {
        let mut matched = 0;
        let tasks: Vec<Task> = self
            .tasks()
            .items()
            .iter()
            .cloned()
            .map(|mut task| {
                if ids.contains(&task.id) {
                    edit(&mut task);
                    matched += 1;
                }
                task
            })
            .collect();

        self.dispatch(EntityAction::FetchSuccess(tasks));
        matched
    }
}
