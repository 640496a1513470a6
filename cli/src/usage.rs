use scholar_assist::UsageLimiter;

use crate::Workspace;

#[derive(Debug, clap::Parser)]
pub struct UsageCli {
    #[command(subcommand)]
    pub cmd: UsageCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum UsageCommand {
    /// Show plan and remaining interactions.
    Status,
    /// Spend one interaction; fails when the free allowance is used up.
    Consume,
    /// Switch to the premium plan.
    Upgrade,
    /// Restore the free allowance.
    Reset,
}

pub fn run(ws: &Workspace, cli: UsageCli) -> anyhow::Result<()> {
    let mut limiter = ws.limiter()?;
    match cli.cmd {
        UsageCommand::Status => {}
        UsageCommand::Consume => limiter.require_interaction()?,
        UsageCommand::Upgrade => limiter.upgrade(),
        UsageCommand::Reset => limiter.reset(),
    }
    print_status(&limiter, ws.config.free_interactions);
    Ok(())
}

fn print_status(limiter: &UsageLimiter, allowance: u32) {
    let state = limiter.state();
    if state.is_premium {
        println!("Plan: premium");
        println!("Interactions left: unlimited");
    } else {
        println!("Plan: free");
        println!("Interactions left: {} of {allowance}", state.ai_uses_left);
    }
    println!("Total interactions: {}", state.total_ai_uses);
    println!("Documents uploaded: {}", state.documents_uploaded);
}
