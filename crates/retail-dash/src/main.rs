mod bootstrap;
mod report;

use anyhow::Result;
use dash_core::settings::Settings;
use dash_runtime::session::DashboardSession;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("retail-dash v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, Holiday filter: {}, Format: {}",
        settings.data.display(),
        settings.holiday,
        settings.format
    );

    let mut session = DashboardSession::new(&settings.data);

    // Empty --stores / --depts means "everything present in the data".
    let stores = (!settings.stores.is_empty()).then(|| settings.stores.iter().copied().collect());
    let depts = (!settings.depts.is_empty()).then(|| settings.depts.iter().copied().collect());
    session.select(stores, depts, settings.holiday_mode())?;

    let snapshot = session.snapshot()?;
    tracing::info!(
        rows_loaded = snapshot.analysis.metadata.rows_loaded,
        rows_selected = snapshot.analysis.metadata.rows_selected,
        "snapshot computed"
    );

    match settings.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        _ => print!("{}", report::render_text(&snapshot, settings.top_stores)),
    }

    Ok(())
}
