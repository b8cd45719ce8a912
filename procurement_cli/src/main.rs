//! Procurement CLI - command-line interface for the generation and
//! phase-gate core.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial CLI wiring generate and phase-gate subcommands.

mod adapters;
mod agents;
mod commands;
mod config;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    match cli.command {
        commands::Commands::Generate {
            program,
            phase,
            project_type,
            description,
            documents,
            agents_config,
            assumptions_file,
            model_base_url,
            model_api_key,
            completion_model,
            embedding_model,
            project_id,
            state_file,
        } => {
            commands::generate::execute(
                &program,
                &phase,
                &project_type,
                &description,
                &documents,
                agents_config.as_deref(),
                assumptions_file.as_deref(),
                model_base_url.as_deref(),
                model_api_key.as_deref(),
                &completion_model,
                &embedding_model,
                project_id.as_deref(),
                &state_file,
            )
            .await?;
        }
        commands::Commands::PhaseStatus { project_id, state_file } => {
            commands::phase::status(&project_id, &state_file).await?;
        }
        commands::Commands::PhaseRequest { project_id, program, to_phase, requested_by, role, state_file } => {
            commands::phase::request(&project_id, program.as_deref(), &to_phase, &requested_by, &role, &state_file).await?;
        }
        commands::Commands::PhaseApprove { request_id, role, comments, state_file } => {
            commands::phase::approve(&request_id, &role, comments, &state_file).await?;
        }
        commands::Commands::PhaseReject { request_id, role, reason, state_file } => {
            commands::phase::reject(&request_id, &role, reason, &state_file).await?;
        }
    }

    std::result::Result::Ok(())
}
