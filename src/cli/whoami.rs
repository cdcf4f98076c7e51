use crate::cli::Context;
use crate::db::{config, staff_repo};
use crate::error::FarmopsError;
use crate::models::StaffId;
use crate::output;

pub fn run(ctx: &Context, set: Option<&str>, clear: bool) -> Result<(), FarmopsError> {
    let store = ctx.open_store()?;
    let roster = staff_repo::list_staff(&store)?;

    if clear || set.is_some() {
        let mut cfg = config::load_config(&store)?;
        cfg.current_user = match set {
            Some(raw) => {
                let id = StaffId::new(raw);
                if !roster.iter().any(|s| s.id == id) {
                    return Err(FarmopsError::staff_not_found(raw));
                }
                Some(id)
            }
            None => None,
        };
        config::save_config(&store, &cfg)?;
        tracing::info!(user = ?cfg.current_user, "current user updated");
    }

    // Re-read so `--user` still takes precedence over what was just saved.
    let user = ctx.current_user(&store, &roster)?;
    if ctx.json {
        output::json::print(&output::json::success(output::json::user_json(&user)));
    } else {
        output::text::print_user(&user);
    }
    Ok(())
}
