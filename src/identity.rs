/// Resolve the acting role from the environment.
///
/// Checks `HIVE_AGENT` first. Returns `None` if unset, letting callers
/// decide whether a missing role is an error for their command.
pub fn resolve_role() -> Option<String> {
    std::env::var("HIVE_AGENT").ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env-var tests must not run concurrently.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn resolve_role_env_behavior() {
        let _guard = ENV_LOCK.lock().unwrap();

        unsafe { std::env::set_var("HIVE_AGENT", "backend_dev") };
        assert_eq!(resolve_role(), Some("backend_dev".to_string()));

        unsafe { std::env::set_var("HIVE_AGENT", "") };
        assert_eq!(resolve_role(), None);

        unsafe { std::env::remove_var("HIVE_AGENT") };
        assert_eq!(resolve_role(), None);
    }
}
