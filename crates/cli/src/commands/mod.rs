mod open;
mod solve;

use crate::cli::Commands;
use crate::error::Result;

pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Open(args) => open::execute(args).await,
        Commands::Solve { action } => solve::execute(action).await,
    }
}
