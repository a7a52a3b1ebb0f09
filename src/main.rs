mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::parse_cli;
use workflow::CalculationWorkflow;

fn main() -> Result<()> {
	env_logger::init();
	let cli = parse_cli();

	if cli.list_themes {
		for name in descry::theme::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
		return Ok(());
	}

	let workflow = CalculationWorkflow::from_config(resolved)?;
	let outcome = workflow.run()?;

	if outcome.exported.is_empty() {
		println!("{} molecules loaded", outcome.rows_loaded);
	} else {
		for path in &outcome.exported {
			println!("exported {}", path.display());
		}
	}

	Ok(())
}
