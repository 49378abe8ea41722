use colored::Colorize;
use plugctl_config::PathProvider;

use crate::errors::CliError;
use crate::GlobalOpts;

/// Print the directory layout plugctl is operating on
pub fn handle_paths(opts: &GlobalOpts) -> Result<(), CliError> {
    let paths = opts.paths()?;

    println!("{}", "Paths:".bold().green());
    println!("  {}: {}", "base".cyan(), paths.base_path().display());
    println!("  {}: {}", "index".cyan(), paths.index_plugins_path().display());
    println!("  {}: {}", "receipts".cyan(), paths.install_receipts_path().display());
    println!("  {}: {}", "bin".cyan(), paths.bin_path().display());
    println!("  {}: {}", "store".cyan(), paths.install_path().display());
    Ok(())
}
