use anyhow::Result;
use tracing::info;

use sightline_shell::Session;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("sightline starting");
    Session::new().run()?;
    Ok(())
}
