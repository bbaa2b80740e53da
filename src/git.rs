use std::path::Path;

use git2::Repository;

/// Result of the best-effort remote sync during task completion. Every
/// failure mode degrades to a value the completion report can record.
#[derive(Debug)]
pub enum PushOutcome {
    Pushed { branch: String },
    NoRepository,
    NoRemote,
    DetachedHead,
    Failed(String),
}

/// Push the current branch to `origin`. Never panics and never surfaces an
/// error type: callers fold the outcome into a completion-report step.
pub fn push_current_branch(root: &Path) -> PushOutcome {
    let Ok(repo) = Repository::discover(root) else {
        return PushOutcome::NoRepository;
    };
    let Ok(head) = repo.head() else {
        return PushOutcome::DetachedHead;
    };
    if !head.is_branch() {
        return PushOutcome::DetachedHead;
    }
    let Some(branch) = head.shorthand().map(String::from) else {
        return PushOutcome::DetachedHead;
    };
    let Ok(mut remote) = repo.find_remote("origin") else {
        return PushOutcome::NoRemote;
    };

    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
    match remote.push(&[refspec.as_str()], None) {
        Ok(()) => PushOutcome::Pushed { branch },
        Err(e) => PushOutcome::Failed(e.message().to_string()),
    }
}
