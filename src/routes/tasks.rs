use super::{RouteEntry, RoutePolicy};
use crate::controller::Handler;

/// Task routes.
///
/// Only task creation is guarded under the compatible policy; editing and
/// deleting reach their handlers without authorization.
pub fn routes(policy: RoutePolicy) -> Vec<RouteEntry> {
    let strict = policy == RoutePolicy::Strict;

    vec![
        RouteEntry::post("/{list_id}/task", Handler::AddTask).authorize(),
        RouteEntry::get("/tasks", Handler::GetAllTasks),
        RouteEntry::get("/tasks/{task_id}", Handler::GetSingleTask),
        RouteEntry::put("/tasks/{task_id}", Handler::EditTask).when(strict, RouteEntry::authorize),
        RouteEntry::delete("/tasks/{task_id}", Handler::DeleteTask)
            .when(strict, RouteEntry::authorize),
    ]
}
