use serde_json::json;

use crate::cli::Context;
use crate::db::Store;
use crate::error::FarmopsError;
use crate::output;

pub fn run(ctx: &Context) -> Result<(), FarmopsError> {
    let store = Store::init(ctx.data_dir.clone())?;
    if ctx.json {
        output::json::print(&output::json::success(json!({
            "path": store.dir().to_string_lossy()
        })));
    } else {
        println!("Initialized farmops data at {}", store.dir().display());
    }
    Ok(())
}
