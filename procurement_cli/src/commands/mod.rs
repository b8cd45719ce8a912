//! Command modules for the procurement CLI.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial command structure.

pub mod generate;
pub mod phase;

/// Procurement generation and phase-gate core, driven from the command line.
#[derive(clap::Parser)]
#[command(name = "procurement")]
#[command(about = "Generate procurement artifacts and manage phase-gate transitions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the agent coordinator end-to-end for a set of document types.
    Generate {
        /// Program name the generated documents are scoped to.
        #[arg(long)]
        program: String,

        /// Project phase, e.g. "pre_solicitation".
        #[arg(long, default_value = "pre_solicitation")]
        phase: String,

        /// Project type, e.g. "services".
        #[arg(long, default_value = "services")]
        project_type: String,

        /// Free-text program description used to shape retrieval queries.
        #[arg(long, default_value = "")]
        description: String,

        /// Comma-separated doc_types to generate, e.g. "igce,acquisition_plan".
        #[arg(long, value_delimiter = ',')]
        documents: std::vec::Vec<String>,

        /// Path to a JSON array of agent definitions; falls back to the
        /// built-in standard roster when omitted.
        #[arg(long)]
        agents_config: std::option::Option<String>,

        /// Path to a JSON array of assumptions, e.g.
        /// [{"id": "scope", "text": "...", "source": null}].
        #[arg(long)]
        assumptions_file: std::option::Option<String>,

        /// Base URL of an OpenAI-compatible completion/embeddings API.
        #[arg(long)]
        model_base_url: std::option::Option<String>,

        /// API key for the completion/embeddings API; read from
        /// PROCUREMENT_API_KEY if not given.
        #[arg(long)]
        model_api_key: std::option::Option<String>,

        /// Chat completion model name.
        #[arg(long, default_value = "gpt-4o-mini")]
        completion_model: String,

        /// Embedding model name.
        #[arg(long, default_value = "text-embedding-3-small")]
        embedding_model: String,

        /// Phase-gate project id whose document checklist generated
        /// artifacts are persisted against; defaults to "<program>-<phase>".
        #[arg(long)]
        project_id: std::option::Option<String>,

        /// Path to the phase-gate state file.
        #[arg(long, default_value = ".procurement/phase_state.json")]
        state_file: String,
    },

    /// Show a project's current phase, document checklist, and pending requests.
    PhaseStatus {
        #[arg(long)]
        project_id: String,

        /// Path to the phase-gate state file.
        #[arg(long, default_value = ".procurement/phase_state.json")]
        state_file: String,
    },

    /// Create a phase transition request.
    PhaseRequest {
        #[arg(long)]
        project_id: String,

        /// Program name, used only when the project doesn't exist yet.
        #[arg(long)]
        program: std::option::Option<String>,

        /// Target phase, e.g. "solicitation".
        #[arg(long)]
        to_phase: String,

        #[arg(long)]
        requested_by: String,

        /// Requester's role: contracting_officer, program_manager, admin, viewer.
        #[arg(long, default_value = "contracting_officer")]
        role: String,

        #[arg(long, default_value = ".procurement/phase_state.json")]
        state_file: String,
    },

    /// Approve a pending phase transition request.
    PhaseApprove {
        #[arg(long)]
        request_id: String,

        /// Approving gatekeeper's role: contracting_officer, program_manager, admin, viewer.
        #[arg(long, default_value = "contracting_officer")]
        role: String,

        #[arg(long)]
        comments: std::option::Option<String>,

        #[arg(long, default_value = ".procurement/phase_state.json")]
        state_file: String,
    },

    /// Reject a pending phase transition request.
    PhaseReject {
        #[arg(long)]
        request_id: String,

        /// Rejecting gatekeeper's role: contracting_officer, program_manager, admin, viewer.
        #[arg(long, default_value = "contracting_officer")]
        role: String,

        #[arg(long)]
        reason: String,

        #[arg(long, default_value = ".procurement/phase_state.json")]
        state_file: String,
    },
}
