//! Cities command handler.

use anyhow::Result;

use starsearch_cli::output::OutputFormat;

use super::DataSource;

/// Print the index of every city in the distance matrix.
pub fn handle_cities_command(source: &DataSource, format: OutputFormat) -> Result<()> {
    let dataset = source.load()?;
    print!("{}", format.render_cities(&dataset.distances)?);
    Ok(())
}
